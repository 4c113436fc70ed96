//! PostgreSQL implementation of ShiftRepository
//!
//! Status changes are conditional updates guarded by the expected current
//! status, so concurrent transitions cannot both win.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use shift_core::entities::{Shift, ShiftStatus};
use shift_core::error::DomainError;
use shift_core::traits::{RepoResult, ShiftQuery, ShiftRepository};
use shift_core::value_objects::Snowflake;

use crate::models::ShiftModel;

use super::error::map_db_error;

const SELECT_COLUMNS: &str = r"
    id, facility_id, specialty, starts_at, ends_at, hourly_rate_cents,
    requirements, notes, status, assigned_nurse_id, created_at, updated_at, deleted_at
";

/// PostgreSQL implementation of ShiftRepository
#[derive(Clone)]
pub struct PgShiftRepository {
    pool: PgPool,
}

impl PgShiftRepository {
    /// Create a new PgShiftRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the live status of a shift, if it exists
    async fn current_status(&self, id: Snowflake) -> RepoResult<Option<ShiftStatus>> {
        let status = sqlx::query_scalar::<_, String>(
            "SELECT status FROM shifts WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match status {
            None => Ok(None),
            Some(s) => ShiftStatus::parse(&s)
                .map(Some)
                .ok_or_else(|| {
                    DomainError::InternalError(format!("unknown shift status in database: {s}"))
                }),
        }
    }
}

#[async_trait]
impl ShiftRepository for PgShiftRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Shift>> {
        let result = sqlx::query_as::<_, ShiftModel>(&format!(
            "SELECT {SELECT_COLUMNS} FROM shifts WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Shift::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_facility(
        &self,
        facility_id: Snowflake,
        limit: i64,
        after: Option<Snowflake>,
    ) -> RepoResult<Vec<Shift>> {
        let result = sqlx::query_as::<_, ShiftModel>(&format!(
            r"
            SELECT {SELECT_COLUMNS} FROM shifts
            WHERE facility_id = $1 AND deleted_at IS NULL
              AND ($3::BIGINT IS NULL OR id > $3)
            ORDER BY id
            LIMIT $2
            "
        ))
        .bind(facility_id.as_i64())
        .bind(limit)
        .bind(after.map(Snowflake::as_i64))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.into_iter().map(Shift::try_from).collect()
    }

    #[instrument(skip(self, query))]
    async fn search(&self, query: &ShiftQuery) -> RepoResult<Vec<Shift>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {SELECT_COLUMNS} FROM shifts WHERE deleted_at IS NULL"
        ));

        if let Some(status) = query.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(facility_id) = query.facility_id {
            builder
                .push(" AND facility_id = ")
                .push_bind(facility_id.as_i64());
        }
        if let Some(specialty) = &query.specialty {
            builder.push(" AND specialty = ").push_bind(specialty);
        }
        if let Some(starts_after) = query.starts_after {
            builder.push(" AND starts_at >= ").push_bind(starts_after);
        }
        if let Some(starts_before) = query.starts_before {
            builder.push(" AND starts_at <= ").push_bind(starts_before);
        }
        if let Some(min_rate) = query.min_hourly_rate_cents {
            builder
                .push(" AND hourly_rate_cents >= ")
                .push_bind(min_rate);
        }
        if let Some(before) = query.before {
            builder.push(" AND id < ").push_bind(before.as_i64());
        }
        if let Some(after) = query.after {
            builder.push(" AND id > ").push_bind(after.as_i64());
        }

        builder.push(" ORDER BY id LIMIT ").push_bind(query.limit);

        let result = builder
            .build_query_as::<ShiftModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.into_iter().map(Shift::try_from).collect()
    }

    #[instrument(skip(self, shift))]
    async fn create(&self, shift: &Shift) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO shifts
                (id, facility_id, specialty, starts_at, ends_at, hourly_rate_cents,
                 requirements, notes, status, assigned_nurse_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(shift.id.as_i64())
        .bind(shift.facility_id.as_i64())
        .bind(&shift.specialty)
        .bind(shift.starts_at)
        .bind(shift.ends_at)
        .bind(shift.hourly_rate_cents)
        .bind(&shift.requirements)
        .bind(&shift.notes)
        .bind(shift.status.as_str())
        .bind(shift.assigned_nurse_id.map(Snowflake::as_i64))
        .bind(shift.created_at)
        .bind(shift.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, shift))]
    async fn update(&self, shift: &Shift) -> RepoResult<()> {
        // Posting terms are only mutable while the shift is open; the
        // status guard also protects against a concurrent assignment
        let result = sqlx::query(
            r"
            UPDATE shifts
            SET specialty = $2, starts_at = $3, ends_at = $4, hourly_rate_cents = $5,
                requirements = $6, notes = $7, updated_at = NOW()
            WHERE id = $1 AND status = 'open' AND deleted_at IS NULL
            ",
        )
        .bind(shift.id.as_i64())
        .bind(&shift.specialty)
        .bind(shift.starts_at)
        .bind(shift.ends_at)
        .bind(shift.hourly_rate_cents)
        .bind(&shift.requirements)
        .bind(&shift.notes)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return match self.current_status(shift.id).await? {
                None => Err(DomainError::ShiftNotFound(shift.id)),
                Some(_) => Err(DomainError::ShiftNotOpen),
            };
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn transition_status(
        &self,
        id: Snowflake,
        from: ShiftStatus,
        to: ShiftStatus,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE shifts
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2 AND deleted_at IS NULL
            ",
        )
        .bind(id.as_i64())
        .bind(from.as_str())
        .bind(to.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            // Guard missed: distinguish a missing shift from a lost race
            return match self.current_status(id).await? {
                None => Err(DomainError::ShiftNotFound(id)),
                Some(actual) => Err(DomainError::InvalidShiftTransition { from: actual, to }),
            };
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_open(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE shifts
            SET deleted_at = NOW()
            WHERE id = $1 AND status = 'open' AND deleted_at IS NULL
            ",
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return match self.current_status(id).await? {
                None => Err(DomainError::ShiftNotFound(id)),
                Some(_) => Err(DomainError::ShiftNotDeletable),
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
        assert_send_sync::<PgShiftRepository>();
    }
}
