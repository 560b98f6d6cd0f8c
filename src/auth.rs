use base64::{engine::general_purpose, Engine as _};
use thiserror::Error;

use crate::config::AuthSettings;

/// Errors produced by the credential gate
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing authorization credentials")]
    MissingCredentials,

    #[error("Unauthorized")]
    Unauthorized,
}

/// Static basic-auth gate in front of the recommendation endpoint.
///
/// Armed only when both an expected user and password are configured.
/// When unarmed the gate accepts everything; startup logs a warning so
/// the open endpoint is a visible configuration choice.
#[derive(Debug, Clone)]
pub struct CredentialGate {
    expected: Option<(String, String)>,
}

impl CredentialGate {
    pub fn new(user: Option<String>, password: Option<String>) -> Self {
        let expected = match (user, password) {
            (Some(user), Some(password)) => Some((user, password)),
            _ => None,
        };
        Self { expected }
    }

    pub fn from_settings(auth: &AuthSettings) -> Self {
        Self::new(auth.user.clone(), auth.password.clone())
    }

    /// Whether the gate actually checks credentials
    pub fn is_armed(&self) -> bool {
        self.expected.is_some()
    }

    /// Validate the raw `Authorization` header value, if any.
    ///
    /// An undecodable header counts as a credential mismatch, not a
    /// client error: the request carried credentials, they just aren't
    /// the configured pair.
    pub fn check(&self, authorization: Option<&str>) -> Result<(), AuthError> {
        let Some((expected_user, expected_password)) = &self.expected else {
            return Ok(());
        };

        let header = authorization.ok_or(AuthError::MissingCredentials)?;

        let (user, password) = decode_basic(header).ok_or(AuthError::Unauthorized)?;
        if &user == expected_user && &password == expected_password {
            Ok(())
        } else {
            Err(AuthError::Unauthorized)
        }
    }
}

/// Decode a `Basic <base64(user:pass)>` header into its credential pair
fn decode_basic(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?.trim();
    let decoded = general_purpose::STANDARD.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, password) = decoded.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed_gate() -> CredentialGate {
        CredentialGate::new(Some("service".to_string()), Some("secret".to_string()))
    }

    fn basic_header(user: &str, password: &str) -> String {
        format!(
            "Basic {}",
            general_purpose::STANDARD.encode(format!("{}:{}", user, password))
        )
    }

    #[test]
    fn test_open_gate_accepts_anything() {
        let gate = CredentialGate::new(None, None);
        assert!(!gate.is_armed());
        assert_eq!(gate.check(None), Ok(()));
        assert_eq!(gate.check(Some("Basic garbage")), Ok(()));
    }

    #[test]
    fn test_partial_config_leaves_gate_open() {
        let gate = CredentialGate::new(Some("service".to_string()), None);
        assert!(!gate.is_armed());
        assert_eq!(gate.check(None), Ok(()));
    }

    #[test]
    fn test_missing_header_rejected() {
        let gate = armed_gate();
        assert_eq!(gate.check(None), Err(AuthError::MissingCredentials));
    }

    #[test]
    fn test_matching_credentials_accepted() {
        let gate = armed_gate();
        let header = basic_header("service", "secret");
        assert_eq!(gate.check(Some(&header)), Ok(()));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let gate = armed_gate();
        let header = basic_header("service", "wrong");
        assert_eq!(gate.check(Some(&header)), Err(AuthError::Unauthorized));
    }

    #[test]
    fn test_undecodable_header_rejected() {
        let gate = armed_gate();
        assert_eq!(gate.check(Some("Basic !!!")), Err(AuthError::Unauthorized));
        assert_eq!(gate.check(Some("Bearer token")), Err(AuthError::Unauthorized));
    }
}
