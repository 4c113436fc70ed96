//! PostgreSQL implementation of FacilityRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use shift_core::entities::Facility;
use shift_core::error::DomainError;
use shift_core::traits::{FacilityRepository, RepoResult};
use shift_core::value_objects::Snowflake;

use crate::models::FacilityModel;

use super::error::map_db_error;

const SELECT_COLUMNS: &str = r"
    id, name, address, city, state, postal_code, phone, email,
    created_at, updated_at, deleted_at
";

/// PostgreSQL implementation of FacilityRepository
#[derive(Clone)]
pub struct PgFacilityRepository {
    pool: PgPool,
}

impl PgFacilityRepository {
    /// Create a new PgFacilityRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FacilityRepository for PgFacilityRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Facility>> {
        let result = sqlx::query_as::<_, FacilityModel>(&format!(
            "SELECT {SELECT_COLUMNS} FROM facilities WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Facility::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, limit: i64, after: Option<Snowflake>) -> RepoResult<Vec<Facility>> {
        let result = sqlx::query_as::<_, FacilityModel>(&format!(
            r"
            SELECT {SELECT_COLUMNS} FROM facilities
            WHERE deleted_at IS NULL AND ($2::BIGINT IS NULL OR id > $2)
            ORDER BY id
            LIMIT $1
            "
        ))
        .bind(limit)
        .bind(after.map(Snowflake::as_i64))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Facility::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, facility: &Facility) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO facilities
                (id, name, address, city, state, postal_code, phone, email, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(facility.id.as_i64())
        .bind(&facility.name)
        .bind(&facility.address)
        .bind(&facility.city)
        .bind(&facility.state)
        .bind(&facility.postal_code)
        .bind(&facility.phone)
        .bind(&facility.email)
        .bind(facility.created_at)
        .bind(facility.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(&self, facility: &Facility) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE facilities
            SET name = $2, address = $3, city = $4, state = $5, postal_code = $6,
                phone = $7, email = $8, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(facility.id.as_i64())
        .bind(&facility.name)
        .bind(&facility.address)
        .bind(&facility.city)
        .bind(&facility.state)
        .bind(&facility.postal_code)
        .bind(&facility.phone)
        .bind(&facility.email)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::FacilityNotFound(facility.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE facilities
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::FacilityNotFound(id));
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
        assert_send_sync::<PgFacilityRepository>();
    }
}
