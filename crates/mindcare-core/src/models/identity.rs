use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Role {
    Student,
    Counsellor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Counsellor => "counsellor",
            Role::Admin => "admin",
        }
    }

    /// Parse a role name as issued by the identity provider.
    pub fn parse(value: &str) -> Option<Role> {
        match value.trim().to_ascii_lowercase().as_str() {
            "student" => Some(Role::Student),
            "counsellor" | "counselor" => Some(Role::Counsellor),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated caller, as established by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject_id: String,
    pub role: Role,
    pub email: Option<String>,
}

impl Identity {
    /// Obtain the admin capability, or fail with `Forbidden`.
    pub fn admin_access(&self) -> Result<AdminAccess, CoreError> {
        if self.role == Role::Admin {
            Ok(AdminAccess { _private: () })
        } else {
            Err(CoreError::Forbidden(format!(
                "role '{}' may not access admin resources",
                self.role
            )))
        }
    }

    /// Students may only read their own records; staff may read anyone's.
    pub fn can_read_subject(&self, subject_id: &str) -> bool {
        match self.role {
            Role::Student => self.subject_id == subject_id,
            Role::Counsellor | Role::Admin => true,
        }
    }
}

/// Proof that the caller was authorized as an admin at the HTTP boundary.
///
/// Only [`Identity::admin_access`] can construct one; admin-only read paths
/// take it by reference instead of re-checking roles.
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess {
    _private: (),
}
