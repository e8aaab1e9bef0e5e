//! User roles.
//!
//! Scoping decisions dispatch on this enum, never on raw strings. The
//! string forms match the `user_type` column seeded by the identity
//! service.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The five portal roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    Teacher,
    Parent,
    Manager,
    Admin,
}

impl Role {
    /// The canonical string form, as stored in `users.user_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Teacher => "TEACHER",
            Role::Parent => "PARENT",
            Role::Manager => "MANAGER",
            Role::Admin => "ADMIN",
        }
    }

    /// Parse a role string (case-insensitive).
    pub fn parse(s: &str) -> Result<Role, CoreError> {
        match s.to_ascii_uppercase().as_str() {
            "STUDENT" => Ok(Role::Student),
            "TEACHER" => Ok(Role::Teacher),
            "PARENT" => Ok(Role::Parent),
            "MANAGER" => Ok(Role::Manager),
            "ADMIN" => Ok(Role::Admin),
            other => Err(CoreError::Validation(format!("Unknown role: {other}"))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
