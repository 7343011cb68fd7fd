//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::Role;

/// Access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Token type reported alongside every issued pair
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Which secret a credential is signed with and what it may be used for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived credential presented on every request
    #[default]
    Access,
    /// Long-lived, single-use credential exchanged for a new pair
    Refresh,
}

impl TokenKind {
    /// Access tokens leave the `type` claim out entirely
    pub fn is_access(&self) -> bool {
        matches!(self, TokenKind::Access)
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Subject (user ID)
    pub user_id: String,

    /// Role at issuance time
    pub role: Role,

    /// Token kind; absent on access tokens
    #[serde(rename = "type", default, skip_serializing_if = "TokenKind::is_access")]
    pub kind: TokenKind,

    /// JWT ID, keeps tokens issued within the same second distinct
    pub jti: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for an access token
    pub fn new_access_token(subject: &str, role: Role, lifetime: Duration) -> Self {
        Self::issue(subject, role, TokenKind::Access, lifetime)
    }

    /// Creates new claims for a refresh token
    pub fn new_refresh_token(subject: &str, role: Role, lifetime: Duration) -> Self {
        Self::issue(subject, role, TokenKind::Refresh, lifetime)
    }

    fn issue(subject: &str, role: Role, kind: TokenKind, lifetime: Duration) -> Self {
        let now = Utc::now();
        Self {
            user_id: subject.to_string(),
            role,
            kind,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }

    /// Checks if `now` is past the embedded expiry
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    // `iat` and `exp` come from claims this service signed with bounded
    // lifetimes, so both are in chrono's range; the epoch fallback is unreachable.

    /// Issued-at as a timestamp
    pub fn issued_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.iat, 0).single().unwrap_or_default()
    }

    /// Expiry as a timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0).single().unwrap_or_default()
    }
}

/// Token pair returned at login and on every refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,

    /// Always "Bearer"
    pub token_type: String,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_in,
            token_type: TOKEN_TYPE_BEARER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_claims_omit_type() {
        let claims = Claims::new_access_token("u-1", Role::User, Duration::minutes(15));
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["userId"], "u-1");
        assert_eq!(json["role"], "User");
        assert!(json.get("type").is_none());
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_timestamps_match_lifetime() {
        let claims = Claims::new_access_token("u-1", Role::User, Duration::minutes(15));
        assert_eq!(claims.expires_at() - claims.issued_at(), Duration::minutes(15));

        let mut claims = claims;
        claims.exp = i64::MAX;
        assert_eq!(claims.expires_at(), DateTime::<Utc>::default());
    }

    #[test]
    fn test_refresh_claims_tagged() {
        let claims = Claims::new_refresh_token("u-1", Role::Organizer, Duration::days(7));
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["type"], "refresh");
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);

        let parsed: Claims = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.kind, TokenKind::Refresh);
    }

    #[test]
    fn test_claims_without_type_parse_as_access() {
        let json = serde_json::json!({
            "userId": "u-2",
            "role": "Admin",
            "jti": "abc",
            "iat": 1,
            "exp": 2
        });
        let claims: Claims = serde_json::from_value(json).unwrap();
        assert_eq!(claims.kind, TokenKind::Access);
    }

    #[test]
    fn test_jti_distinguishes_same_second_tokens() {
        let a = Claims::new_access_token("u-1", Role::User, Duration::minutes(15));
        let b = Claims::new_access_token("u-1", Role::User, Duration::minutes(15));
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_expiry_boundary() {
        let claims = Claims::new_access_token("u-1", Role::User, Duration::minutes(15));
        assert!(!claims.is_expired());
        assert!(!claims.is_expired_at(claims.expires_at()));
        assert!(claims.is_expired_at(claims.expires_at() + Duration::seconds(1)));
    }

    #[test]
    fn test_token_pair_defaults() {
        let pair = TokenPair::new("a".into(), "r".into(), 900);
        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json["tokenType"], "Bearer");
        assert_eq!(json["expiresIn"], 900);
    }
}
