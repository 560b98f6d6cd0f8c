use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request for recommendations.
///
/// Exactly one of `email` / `diffbotUri` identifies the requesting user;
/// `tenant` optionally scopes candidates to one organization or event.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_identity"))]
pub struct RecommendRequest {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1))]
    #[serde(alias = "diffbot_uri", rename = "diffbotUri")]
    pub diffbot_uri: Option<String>,
    #[serde(default)]
    pub tenant: Option<String>,
    #[validate(range(min = 1))]
    #[serde(default = "default_max_recommendations")]
    #[serde(alias = "max_recommendations", rename = "maxRecommendations")]
    pub max_recommendations: u32,
}

fn default_max_recommendations() -> u32 {
    9
}

fn validate_identity(request: &RecommendRequest) -> Result<(), ValidationError> {
    let mut error = ValidationError::new("identity");
    match (&request.email, &request.diffbot_uri) {
        (None, None) => {
            error.message = Some("either email or diffbotUri must be provided".into());
            Err(error)
        }
        (Some(_), Some(_)) => {
            error.message = Some("email and diffbotUri are mutually exclusive".into());
            Err(error)
        }
        _ => Ok(()),
    }
}
