//! User entity <-> model mapper

use shift_core::entities::{User, UserRole};
use shift_core::error::DomainError;
use shift_core::value_objects::Snowflake;

use crate::models::UserModel;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let role = UserRole::parse(&model.role).ok_or_else(|| {
            DomainError::InternalError(format!("unknown user role in database: {}", model.role))
        })?;

        Ok(User {
            id: Snowflake::new(model.id),
            email: model.email,
            role,
            first_name: model.first_name,
            last_name: model.last_name,
            phone: model.phone,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_model(role: &str) -> UserModel {
        UserModel {
            id: 1,
            email: "nora@example.com".into(),
            password_hash: "$argon2id$hash".into(),
            role: role.into(),
            first_name: "Nora".into(),
            last_name: "Reyes".into(),
            phone: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_model_to_entity() {
        let user = User::try_from(sample_model("nurse")).unwrap();
        assert_eq!(user.role, UserRole::Nurse);
        assert_eq!(user.email, "nora@example.com");
    }

    #[test]
    fn test_unknown_role_is_error() {
        assert!(User::try_from(sample_model("janitor")).is_err());
    }
}
