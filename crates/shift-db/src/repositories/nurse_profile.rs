//! PostgreSQL implementation of NurseProfileRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use shift_core::entities::NurseProfile;
use shift_core::error::DomainError;
use shift_core::traits::{NurseProfileRepository, RepoResult};
use shift_core::value_objects::Snowflake;

use crate::models::NurseProfileModel;

use super::error::{map_db_error, map_unique_violation};

const SELECT_COLUMNS: &str = r"
    id, user_id, specialty, years_experience, desired_hourly_rate_cents,
    bio, city, state, created_at, updated_at, deleted_at
";

/// PostgreSQL implementation of NurseProfileRepository
#[derive(Clone)]
pub struct PgNurseProfileRepository {
    pool: PgPool,
}

impl PgNurseProfileRepository {
    /// Create a new PgNurseProfileRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NurseProfileRepository for PgNurseProfileRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<NurseProfile>> {
        let result = sqlx::query_as::<_, NurseProfileModel>(&format!(
            "SELECT {SELECT_COLUMNS} FROM nurse_profiles WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(NurseProfile::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<NurseProfile>> {
        let result = sqlx::query_as::<_, NurseProfileModel>(&format!(
            "SELECT {SELECT_COLUMNS} FROM nurse_profiles WHERE user_id = $1 AND deleted_at IS NULL"
        ))
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(NurseProfile::from))
    }

    #[instrument(skip(self))]
    async fn create(&self, profile: &NurseProfile) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO nurse_profiles
                (id, user_id, specialty, years_experience, desired_hourly_rate_cents,
                 bio, city, state, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(profile.id.as_i64())
        .bind(profile.user_id.as_i64())
        .bind(&profile.specialty)
        .bind(profile.years_experience)
        .bind(profile.desired_hourly_rate_cents)
        .bind(&profile.bio)
        .bind(&profile.city)
        .bind(&profile.state)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::NurseProfileAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(&self, profile: &NurseProfile) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE nurse_profiles
            SET specialty = $2, years_experience = $3, desired_hourly_rate_cents = $4,
                bio = $5, city = $6, state = $7, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(profile.id.as_i64())
        .bind(&profile.specialty)
        .bind(profile.years_experience)
        .bind(profile.desired_hourly_rate_cents)
        .bind(&profile.bio)
        .bind(&profile.city)
        .bind(&profile.state)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NurseProfileNotFound(profile.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE nurse_profiles
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NurseProfileNotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgNurseProfileRepository>();
    }
}
