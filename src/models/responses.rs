use serde::{Deserialize, Serialize};

/// A recommended user, as returned to the caller.
///
/// Field names are part of the API contract; optional fields are omitted
/// from the JSON entirely when absent. The match-count fields are only
/// produced by the weighted ranking strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "diffbotUri", skip_serializing_if = "Option::is_none")]
    pub diffbot_uri: Option<String>,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "directMatches", skip_serializing_if = "Option::is_none")]
    pub direct_matches: Option<i64>,
    #[serde(rename = "indirectMatches", skip_serializing_if = "Option::is_none")]
    pub indirect_matches: Option<i64>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_are_omitted() {
        let user = RecommendedUser {
            email: None,
            diffbot_uri: None,
            first_name: "Ada".to_string(),
            direct_matches: None,
            indirect_matches: None,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({"firstName": "Ada"}));
    }

    #[test]
    fn test_weighted_fields_serialize_camel_case() {
        let user = RecommendedUser {
            email: Some("ada@example.com".to_string()),
            diffbot_uri: None,
            first_name: "Ada".to_string(),
            direct_matches: Some(4),
            indirect_matches: Some(2),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["directMatches"], 4);
        assert_eq!(json["indirectMatches"], 2);
        assert_eq!(json["firstName"], "Ada");
    }
}
