//! User accounts, roles and sessions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role, gating which gradebook operations a session may invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access: marks entry, course management, every report
    Admin,
    /// Own report and the read-only summary
    Student,
}

impl Role {
    /// Lowercase label as stored in the accounts table
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Student => "student",
        }
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
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "student" => Ok(Self::Student),
            _ => Err(format!("Unknown role: '{s}' (expected admin or student)")),
        }
    }
}

/// A stored login.
///
/// Passwords are kept in clear text to stay compatible with existing
/// `users.csv` files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Unique login name
    pub username: String,
    /// Clear-text password
    pub password: String,
    /// Account role
    pub role: Role,
}

impl UserAccount {
    /// Create a new account
    #[must_use]
    pub const fn new(username: String, password: String, role: Role) -> Self {
        Self {
            username,
            password,
            role,
        }
    }

    /// The account provisioned when no accounts table exists yet
    #[must_use]
    pub fn default_admin() -> Self {
        Self::new("admin".to_string(), "admin".to_string(), Role::Admin)
    }
}

/// An authenticated caller, passed explicitly into every gated operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Login name (for students, also their student ID)
    pub username: String,
    /// Role granted at login
    pub role: Role,
}

impl Session {
    /// Create a session for `username` with `role`
    #[must_use]
    pub const fn new(username: String, role: Role) -> Self {
        Self { username, role }
    }

    /// Whether this session has admin rights
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_label() {
        for role in [Role::Admin, Role::Student] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert!("teacher".parse::<Role>().is_err());
    }

    #[test]
    fn test_default_admin() {
        let admin = UserAccount::default_admin();
        assert_eq!(admin.username, "admin");
        assert_eq!(admin.password, "admin");
        assert_eq!(admin.role, Role::Admin);
    }
}
