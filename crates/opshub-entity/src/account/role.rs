//! Account role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available to staff accounts.
///
/// Roles are ordered by privilege level: Owner > Admin > Manager >
/// Employee > Packer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// Business owner with full access.
    Owner,
    /// Full system administrator.
    Admin,
    /// Can manage staff and day-to-day operations.
    Manager,
    /// Regular staff member.
    Employee,
    /// Warehouse packing staff.
    Packer,
}

impl AccountRole {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Owner => 5,
            Self::Admin => 4,
            Self::Manager => 3,
            Self::Employee => 2,
            Self::Packer => 1,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &AccountRole) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Check if this role can administer accounts.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Employee => "employee",
            Self::Packer => "packer",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccountRole {
    type Err = opshub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "employee" => Ok(Self::Employee),
            "packer" => Ok(Self::Packer),
            _ => Err(opshub_core::AppError::validation(format!(
                "Invalid account role: '{s}'. Expected one of: owner, admin, manager, employee, packer"
            ))),
        }
    }
}
