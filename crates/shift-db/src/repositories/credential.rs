//! PostgreSQL implementation of CredentialRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use shift_core::entities::{Certification, License};
use shift_core::error::DomainError;
use shift_core::traits::{CredentialRepository, RepoResult};
use shift_core::value_objects::Snowflake;

use crate::models::{CertificationModel, LicenseModel};

use super::error::map_db_error;

const LICENSE_COLUMNS: &str = r"
    id, nurse_id, license_number, state, kind, expires_at, document_url,
    created_at, updated_at
";

const CERTIFICATION_COLUMNS: &str = r"
    id, nurse_id, name, issuing_body, issued_at, expires_at, document_url,
    created_at, updated_at
";

/// PostgreSQL implementation of CredentialRepository
#[derive(Clone)]
pub struct PgCredentialRepository {
    pool: PgPool,
}

impl PgCredentialRepository {
    /// Create a new PgCredentialRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialRepository for PgCredentialRepository {
    #[instrument(skip(self))]
    async fn find_license(&self, id: Snowflake) -> RepoResult<Option<License>> {
        let result = sqlx::query_as::<_, LicenseModel>(&format!(
            "SELECT {LICENSE_COLUMNS} FROM licenses WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(License::from))
    }

    #[instrument(skip(self))]
    async fn find_licenses_by_nurse(&self, nurse_id: Snowflake) -> RepoResult<Vec<License>> {
        let result = sqlx::query_as::<_, LicenseModel>(&format!(
            "SELECT {LICENSE_COLUMNS} FROM licenses WHERE nurse_id = $1 ORDER BY id"
        ))
        .bind(nurse_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(License::from).collect())
    }

    #[instrument(skip(self, license))]
    async fn create_license(&self, license: &License) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO licenses
                (id, nurse_id, license_number, state, kind, expires_at, document_url,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(license.id.as_i64())
        .bind(license.nurse_id.as_i64())
        .bind(&license.license_number)
        .bind(&license.state)
        .bind(&license.kind)
        .bind(license.expires_at)
        .bind(&license.document_url)
        .bind(license.created_at)
        .bind(license.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, license))]
    async fn update_license(&self, license: &License) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE licenses
            SET license_number = $2, state = $3, kind = $4, expires_at = $5,
                document_url = $6, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(license.id.as_i64())
        .bind(&license.license_number)
        .bind(&license.state)
        .bind(&license.kind)
        .bind(license.expires_at)
        .bind(&license.document_url)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::LicenseNotFound(license.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_license(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM licenses WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::LicenseNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_certification(&self, id: Snowflake) -> RepoResult<Option<Certification>> {
        let result = sqlx::query_as::<_, CertificationModel>(&format!(
            "SELECT {CERTIFICATION_COLUMNS} FROM certifications WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Certification::from))
    }

    #[instrument(skip(self))]
    async fn find_certifications_by_nurse(
        &self,
        nurse_id: Snowflake,
    ) -> RepoResult<Vec<Certification>> {
        let result = sqlx::query_as::<_, CertificationModel>(&format!(
            "SELECT {CERTIFICATION_COLUMNS} FROM certifications WHERE nurse_id = $1 ORDER BY id"
        ))
        .bind(nurse_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Certification::from).collect())
    }

    #[instrument(skip(self, certification))]
    async fn create_certification(&self, certification: &Certification) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO certifications
                (id, nurse_id, name, issuing_body, issued_at, expires_at, document_url,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(certification.id.as_i64())
        .bind(certification.nurse_id.as_i64())
        .bind(&certification.name)
        .bind(&certification.issuing_body)
        .bind(certification.issued_at)
        .bind(certification.expires_at)
        .bind(&certification.document_url)
        .bind(certification.created_at)
        .bind(certification.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, certification))]
    async fn update_certification(&self, certification: &Certification) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE certifications
            SET name = $2, issuing_body = $3, issued_at = $4, expires_at = $5,
                document_url = $6, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(certification.id.as_i64())
        .bind(&certification.name)
        .bind(&certification.issuing_body)
        .bind(certification.issued_at)
        .bind(certification.expires_at)
        .bind(&certification.document_url)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CertificationNotFound(certification.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_certification(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM certifications WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CertificationNotFound(id));
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
        assert_send_sync::<PgCredentialRepository>();
    }
}
