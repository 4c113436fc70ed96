//! PostgreSQL implementation of ApplicationRepository
//!
//! `approve` runs in a single transaction with the shift row locked, so
//! two concurrent approvals for the same shift cannot both succeed.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use shift_core::entities::{ApplicationStatus, ShiftApplication, ShiftStatus};
use shift_core::error::DomainError;
use shift_core::traits::{ApplicationRepository, RepoResult};
use shift_core::value_objects::Snowflake;

use crate::models::ApplicationModel;

use super::error::{map_db_error, map_unique_violation};

const SELECT_COLUMNS: &str = r"
    id, shift_id, nurse_id, note, status, created_at, updated_at
";

/// PostgreSQL implementation of ApplicationRepository
#[derive(Clone)]
pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
    /// Create a new PgApplicationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn parse_status(s: &str) -> RepoResult<ApplicationStatus> {
        ApplicationStatus::parse(s).ok_or_else(|| {
            DomainError::InternalError(format!("unknown application status in database: {s}"))
        })
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ShiftApplication>> {
        let result = sqlx::query_as::<_, ApplicationModel>(&format!(
            "SELECT {SELECT_COLUMNS} FROM shift_applications WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(ShiftApplication::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_shift(&self, shift_id: Snowflake) -> RepoResult<Vec<ShiftApplication>> {
        let result = sqlx::query_as::<_, ApplicationModel>(&format!(
            "SELECT {SELECT_COLUMNS} FROM shift_applications WHERE shift_id = $1 ORDER BY id"
        ))
        .bind(shift_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.into_iter().map(ShiftApplication::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_nurse(
        &self,
        nurse_id: Snowflake,
        limit: i64,
        after: Option<Snowflake>,
    ) -> RepoResult<Vec<ShiftApplication>> {
        let result = sqlx::query_as::<_, ApplicationModel>(&format!(
            r"
            SELECT {SELECT_COLUMNS} FROM shift_applications
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

        result.into_iter().map(ShiftApplication::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_shift_and_nurse(
        &self,
        shift_id: Snowflake,
        nurse_id: Snowflake,
    ) -> RepoResult<Option<ShiftApplication>> {
        let result = sqlx::query_as::<_, ApplicationModel>(&format!(
            "SELECT {SELECT_COLUMNS} FROM shift_applications WHERE shift_id = $1 AND nurse_id = $2"
        ))
        .bind(shift_id.as_i64())
        .bind(nurse_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(ShiftApplication::try_from).transpose()
    }

    #[instrument(skip(self, application))]
    async fn create(&self, application: &ShiftApplication) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO shift_applications
                (id, shift_id, nurse_id, note, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(application.id.as_i64())
        .bind(application.shift_id.as_i64())
        .bind(application.nurse_id.as_i64())
        .bind(&application.note)
        .bind(application.status.as_str())
        .bind(application.created_at)
        .bind(application.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateApplication))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn decide(&self, id: Snowflake, to: ApplicationStatus) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE shift_applications
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            ",
        )
        .bind(id.as_i64())
        .bind(to.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            let current = sqlx::query_scalar::<_, String>(
                "SELECT status FROM shift_applications WHERE id = $1",
            )
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

            return match current {
                None => Err(DomainError::ApplicationNotFound(id)),
                Some(s) => Err(DomainError::InvalidApplicationTransition {
                    from: Self::parse_status(&s)?,
                    to,
                }),
            };
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn approve(
        &self,
        id: Snowflake,
        shift_id: Snowflake,
        nurse_id: Snowflake,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock the shift row for the rest of the transaction
        let shift_status = sqlx::query_scalar::<_, String>(
            r"
            SELECT status FROM shifts
            WHERE id = $1 AND deleted_at IS NULL
            FOR UPDATE
            ",
        )
        .bind(shift_id.as_i64())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::ShiftNotFound(shift_id))?;

        if shift_status != ShiftStatus::Open.as_str() {
            return Err(DomainError::ShiftNotOpen);
        }

        // Accept the application while it is still pending
        let accepted = sqlx::query(
            r"
            UPDATE shift_applications
            SET status = 'accepted', updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            ",
        )
        .bind(id.as_i64())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if accepted.rows_affected() == 0 {
            let current =
                sqlx::query_scalar::<_, String>("SELECT status FROM shift_applications WHERE id = $1")
                    .bind(id.as_i64())
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(map_db_error)?;

            return match current {
                None => Err(DomainError::ApplicationNotFound(id)),
                Some(s) => Err(DomainError::InvalidApplicationTransition {
                    from: Self::parse_status(&s)?,
                    to: ApplicationStatus::Accepted,
                }),
            };
        }

        // Assign the shift; the row is locked and verified open above
        sqlx::query(
            r"
            UPDATE shifts
            SET status = 'assigned', assigned_nurse_id = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'open'
            ",
        )
        .bind(shift_id.as_i64())
        .bind(nurse_id.as_i64())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // Reject every sibling pending application in the same transaction
        let rejected = sqlx::query(
            r"
            UPDATE shift_applications
            SET status = 'rejected', updated_at = NOW()
            WHERE shift_id = $1 AND id <> $2 AND status = 'pending'
            ",
        )
        .bind(shift_id.as_i64())
        .bind(id.as_i64())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        tracing::info!(
            application_id = %id,
            shift_id = %shift_id,
            nurse_id = %nurse_id,
            siblings_rejected = rejected.rows_affected(),
            "Application approved and shift assigned"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgApplicationRepository>();
    }
}
