//! PostgreSQL implementation of TimeRecordRepository
//!
//! Clock-out is a conditional update (`WHERE clock_out_at IS NULL`) so a
//! record can only be closed once.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use shift_core::entities::TimeRecord;
use shift_core::error::DomainError;
use shift_core::traits::{RepoResult, TimeRecordRepository};
use shift_core::value_objects::Snowflake;

use crate::models::TimeRecordModel;

use super::error::{map_db_error, map_unique_violation};

const SELECT_COLUMNS: &str = r"
    id, shift_id, nurse_id, clock_in_at, clock_out_at, worked_minutes,
    created_at, updated_at
";

/// PostgreSQL implementation of TimeRecordRepository
#[derive(Clone)]
pub struct PgTimeRecordRepository {
    pool: PgPool,
}

impl PgTimeRecordRepository {
    /// Create a new PgTimeRecordRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimeRecordRepository for PgTimeRecordRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<TimeRecord>> {
        let result = sqlx::query_as::<_, TimeRecordModel>(&format!(
            "SELECT {SELECT_COLUMNS} FROM time_records WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(TimeRecord::from))
    }

    #[instrument(skip(self))]
    async fn find_open(
        &self,
        shift_id: Snowflake,
        nurse_id: Snowflake,
    ) -> RepoResult<Option<TimeRecord>> {
        let result = sqlx::query_as::<_, TimeRecordModel>(&format!(
            r"
            SELECT {SELECT_COLUMNS} FROM time_records
            WHERE shift_id = $1 AND nurse_id = $2 AND clock_out_at IS NULL
            "
        ))
        .bind(shift_id.as_i64())
        .bind(nurse_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(TimeRecord::from))
    }

    #[instrument(skip(self))]
    async fn find_by_shift(&self, shift_id: Snowflake) -> RepoResult<Vec<TimeRecord>> {
        let result = sqlx::query_as::<_, TimeRecordModel>(&format!(
            "SELECT {SELECT_COLUMNS} FROM time_records WHERE shift_id = $1 ORDER BY id"
        ))
        .bind(shift_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(TimeRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_nurse(
        &self,
        nurse_id: Snowflake,
        limit: i64,
        after: Option<Snowflake>,
    ) -> RepoResult<Vec<TimeRecord>> {
        let result = sqlx::query_as::<_, TimeRecordModel>(&format!(
            r"
            SELECT {SELECT_COLUMNS} FROM time_records
            WHERE nurse_id = $1 AND ($3::BIGINT IS NULL OR id > $3)
            ORDER BY id
            LIMIT $2
            "
        ))
        .bind(nurse_id.as_i64())
        .bind(limit)
        .bind(after.map(Snowflake::as_i64))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(TimeRecord::from).collect())
    }

    #[instrument(skip(self, record))]
    async fn create(&self, record: &TimeRecord) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO time_records
                (id, shift_id, nurse_id, clock_in_at, clock_out_at, worked_minutes,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(record.id.as_i64())
        .bind(record.shift_id.as_i64())
        .bind(record.nurse_id.as_i64())
        .bind(record.clock_in_at)
        .bind(record.clock_out_at)
        .bind(record.worked_minutes)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyClockedIn))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn close(
        &self,
        id: Snowflake,
        clock_out_at: DateTime<Utc>,
        worked_minutes: i32,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE time_records
            SET clock_out_at = $2, worked_minutes = $3, updated_at = NOW()
            WHERE id = $1 AND clock_out_at IS NULL
            ",
        )
        .bind(id.as_i64())
        .bind(clock_out_at)
        .bind(worked_minutes)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            let exists =
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM time_records WHERE id = $1)")
                    .bind(id.as_i64())
                    .fetch_one(&self.pool)
                    .await
                    .map_err(map_db_error)?;

            return if exists {
                Err(DomainError::TimeRecordAlreadyClosed)
            } else {
                Err(DomainError::TimeRecordNotFound(id))
            };
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
        assert_send_sync::<PgTimeRecordRepository>();
    }
}
