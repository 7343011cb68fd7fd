use ev_core::domain::entities::identity::AuthIdentity;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Refresh token required"))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokeTokensRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub all_tokens: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: AuthIdentity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokedCountResponse {
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_request_uses_camel_case() {
        let request: RefreshTokenRequest =
            serde_json::from_str(r#"{"refreshToken": "abc"}"#).unwrap();

        assert_eq!(request.refresh_token, "abc");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_refresh_request_fails_validation() {
        let request: RefreshTokenRequest = serde_json::from_str("{}").unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_revoke_request_defaults() {
        let request: RevokeTokensRequest = serde_json::from_str("{}").unwrap();
        assert!(request.refresh_token.is_none());
        assert!(!request.all_tokens);

        let request: RevokeTokensRequest =
            serde_json::from_str(r#"{"refreshToken": "r", "allTokens": true}"#).unwrap();
        assert_eq!(request.refresh_token.as_deref(), Some("r"));
        assert!(request.all_tokens);
    }
}
