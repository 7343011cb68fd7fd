//! Shared error response structure

use serde::{Deserialize, Serialize};

/// Error payload returned by every rejected request
///
/// `required` and `current` are only present for permission failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,

    /// Human-readable error message
    pub message: String,

    /// Error code for client identification
    pub error: String,

    /// Roles the endpoint accepts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    /// Role the caller presented
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: error.into(),
            required: None,
            current: None,
        }
    }

    /// Attach the role diagnostics of a permission failure
    pub fn with_roles(mut self, required: Vec<String>, current: impl Into<String>) -> Self {
        self.required = Some(required);
        self.current = Some(current.into());
        self
    }
}

/// Common error codes used across the application
pub mod error_codes {
    pub const MISSING_TOKEN: &str = "MISSING_TOKEN";
    pub const MISSING_REFRESH_TOKEN: &str = "MISSING_REFRESH_TOKEN";
    pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
    pub const INVALID_TOKEN: &str = "INVALID_TOKEN";
    pub const TOKEN_REVOKED: &str = "TOKEN_REVOKED";
    pub const INVALID_REFRESH_TOKEN: &str = "INVALID_REFRESH_TOKEN";
    pub const NOT_AUTHENTICATED: &str = "NOT_AUTHENTICATED";
    pub const INSUFFICIENT_PERMISSIONS: &str = "INSUFFICIENT_PERMISSIONS";
    pub const TOKEN_GENERATION_FAILED: &str = "TOKEN_GENERATION_FAILED";
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}
