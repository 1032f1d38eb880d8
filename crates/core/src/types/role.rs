//! User roles and role-gated dashboard dispatch.
//!
//! Roles are a closed set. Dispatching on the enum with an exhaustive match
//! (rather than comparing role strings at each gate) means a new role cannot
//! be added without the compiler pointing at every place that must handle it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role assigned to a marketplace account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Platform administrator.
    Admin,
    /// Storefront owner.
    Seller,
    /// Regular shopper.
    User,
}

/// Error parsing a role from its stored string form.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown user role: {0:?}")]
pub struct RoleParseError(pub String);

impl UserRole {
    /// Stored string form of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Seller => "seller",
            Self::User => "user",
        }
    }

    /// Dashboard path this role lands on after login.
    #[must_use]
    pub const fn dashboard_path(&self) -> &'static str {
        match self {
            Self::Admin => "/admin/dashboard",
            Self::Seller => "/seller/dashboard",
            Self::User => "/dashboard",
        }
    }

    /// Whether this role may access a view gated to `required`.
    #[must_use]
    pub fn can_access(&self, required: Self) -> bool {
        *self == required
    }
}

impl std::str::FromStr for UserRole {
    type Err = RoleParseError;

    /// Parse a stored role string.
    ///
    /// Legacy role values were written by several code paths with
    /// inconsistent casing and whitespace, so parsing trims and lowercases
    /// before matching.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "seller" => Ok(Self::Seller),
            "user" => Ok(Self::User),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        assert_eq!(" Admin ".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("SELLER".parse::<UserRole>().unwrap(), UserRole::Seller);
        assert_eq!("user".parse::<UserRole>().unwrap(), UserRole::User);
    }

    #[test]
    fn test_parse_rejects_unknown_roles() {
        assert!("superuser".parse::<UserRole>().is_err());
        assert!("".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_dashboard_dispatch() {
        assert_eq!(UserRole::Admin.dashboard_path(), "/admin/dashboard");
        assert_eq!(UserRole::Seller.dashboard_path(), "/seller/dashboard");
        assert_eq!(UserRole::User.dashboard_path(), "/dashboard");
    }

    #[test]
    fn test_access_gate() {
        assert!(UserRole::Seller.can_access(UserRole::Seller));
        assert!(!UserRole::User.can_access(UserRole::Admin));
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&UserRole::Seller).unwrap(),
            "\"seller\""
        );
        let back: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(back, UserRole::Admin);
    }
}
