//! PostgreSQL implementation of PaymentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use shift_core::entities::{Payment, PaymentStatus};
use shift_core::error::DomainError;
use shift_core::traits::{PaymentRepository, RepoResult};
use shift_core::value_objects::Snowflake;

use crate::models::PaymentModel;

use super::error::{map_db_error, map_unique_violation};

const SELECT_COLUMNS: &str = r"
    id, time_record_id, amount_cents, reference, status, created_at, updated_at
";

/// PostgreSQL implementation of PaymentRepository
#[derive(Clone)]
pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    /// Create a new PgPaymentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn parse_status(s: &str) -> RepoResult<PaymentStatus> {
        PaymentStatus::parse(s).ok_or_else(|| {
            DomainError::InternalError(format!("unknown payment status in database: {s}"))
        })
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Payment>> {
        let result = sqlx::query_as::<_, PaymentModel>(&format!(
            "SELECT {SELECT_COLUMNS} FROM payments WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Payment::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_time_record(
        &self,
        time_record_id: Snowflake,
    ) -> RepoResult<Option<Payment>> {
        let result = sqlx::query_as::<_, PaymentModel>(&format!(
            "SELECT {SELECT_COLUMNS} FROM payments WHERE time_record_id = $1"
        ))
        .bind(time_record_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Payment::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_nurse(
        &self,
        nurse_id: Snowflake,
        limit: i64,
        after: Option<Snowflake>,
    ) -> RepoResult<Vec<Payment>> {
        let result = sqlx::query_as::<_, PaymentModel>(
            r"
            SELECT p.id, p.time_record_id, p.amount_cents, p.reference, p.status,
                   p.created_at, p.updated_at
            FROM payments p
            JOIN time_records tr ON tr.id = p.time_record_id
            WHERE tr.nurse_id = $1 AND ($3::BIGINT IS NULL OR p.id > $3)
            ORDER BY p.id
            LIMIT $2
            ",
        )
        .bind(nurse_id.as_i64())
        .bind(limit)
        .bind(after.map(Snowflake::as_i64))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.into_iter().map(Payment::try_from).collect()
    }

    #[instrument(skip(self, payment))]
    async fn create(&self, payment: &Payment) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO payments
                (id, time_record_id, amount_cents, reference, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(payment.id.as_i64())
        .bind(payment.time_record_id.as_i64())
        .bind(payment.amount_cents)
        .bind(&payment.reference)
        .bind(payment.status.as_str())
        .bind(payment.created_at)
        .bind(payment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::PaymentAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn transition_status(
        &self,
        id: Snowflake,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE payments
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            ",
        )
        .bind(id.as_i64())
        .bind(from.as_str())
        .bind(to.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            let current =
                sqlx::query_scalar::<_, String>("SELECT status FROM payments WHERE id = $1")
                    .bind(id.as_i64())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(map_db_error)?;

            return match current {
                None => Err(DomainError::PaymentNotFound(id)),
                Some(s) => Err(DomainError::InvalidPaymentTransition {
                    from: Self::parse_status(&s)?,
                    to,
                }),
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
        assert_send_sync::<PgPaymentRepository>();
    }
}
