//! User entity - an account on the platform

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Account role determining which operations a user may perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A nurse browsing and working shifts
    Nurse,
    /// A facility-side administrator posting shifts and deciding applications
    Admin,
}

impl UserRole {
    /// Database/string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nurse => "nurse",
            Self::Admin => "admin",
        }
    }

    /// Parse from the database representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "nurse" => Some(Self::Nurse),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity holding account credentials and contact fields.
/// The password hash never leaves the database layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub email: String,
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(
        id: Snowflake,
        email: String,
        role: UserRole,
        first_name: String,
        last_name: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            role,
            first_name,
            last_name,
            phone: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    #[inline]
    pub fn is_nurse(&self) -> bool {
        self.role == UserRole::Nurse
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Update the contact name
    pub fn set_name(&mut self, first_name: String, last_name: String) {
        self.first_name = first_name;
        self.last_name = last_name;
        self.updated_at = Utc::now();
    }

    /// Update the phone number
    pub fn set_phone(&mut self, phone: Option<String>) {
        self.phone = phone;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role: UserRole) -> User {
        User::new(
            Snowflake::new(1),
            "nora@example.com".to_string(),
            role,
            "Nora".to_string(),
            "Reyes".to_string(),
        )
    }

    #[test]
    fn test_full_name() {
        let user = sample_user(UserRole::Nurse);
        assert_eq!(user.full_name(), "Nora Reyes");
    }

    #[test]
    fn test_role_predicates() {
        assert!(sample_user(UserRole::Nurse).is_nurse());
        assert!(!sample_user(UserRole::Nurse).is_admin());
        assert!(sample_user(UserRole::Admin).is_admin());
    }

    #[test]
    fn test_role_roundtrip() {
        assert_eq!(UserRole::parse("nurse"), Some(UserRole::Nurse));
        assert_eq!(UserRole::parse("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("janitor"), None);
        assert_eq!(UserRole::Admin.as_str(), "admin");
    }

    #[test]
    fn test_set_phone_touches_updated_at() {
        let mut user = sample_user(UserRole::Nurse);
        let before = user.updated_at;
        user.set_phone(Some("+1-555-0100".to_string()));
        assert_eq!(user.phone.as_deref(), Some("+1-555-0100"));
        assert!(user.updated_at >= before);
    }
}
