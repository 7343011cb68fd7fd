//! User roles carried in every credential.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of an authenticated user
///
/// `Admin` implicitly satisfies every role requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    User,
    Organizer,
    Admin,
}

impl Role {
    /// The role name as it appears in tokens and error payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Organizer => "Organizer",
            Role::Admin => "Admin",
        }
    }

    /// Whether this is the distinguished administrator role
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(Role::User),
            "Organizer" => Ok(Role::Organizer),
            "Admin" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}
