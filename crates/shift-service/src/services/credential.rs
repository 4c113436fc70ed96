//! Credential service
//!
//! License and certification records for nurse profiles. All operations
//! require the owning nurse or an admin.

use shift_core::entities::{Certification, License};
use shift_core::{Snowflake, UserRole};
use tracing::{info, instrument};

use crate::dto::{
    CertificationResponse, CreateCertificationRequest, CreateLicenseRequest, LicenseResponse,
    UpdateCertificationRequest, UpdateLicenseRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::nurse::NurseService;

/// Credential service
pub struct CredentialService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CredentialService<'a> {
    /// Create a new CredentialService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // Licenses
    // ========================================================================

    /// List a nurse's licenses
    #[instrument(skip(self))]
    pub async fn list_licenses(
        &self,
        nurse_id: Snowflake,
        caller_id: Snowflake,
        caller_role: UserRole,
    ) -> ServiceResult<Vec<LicenseResponse>> {
        self.authorize(nurse_id, caller_id, caller_role).await?;

        let licenses = self
            .ctx
            .credential_repo()
            .find_licenses_by_nurse(nurse_id)
            .await?;
        Ok(licenses.iter().map(LicenseResponse::from).collect())
    }

    /// Add a license to a nurse profile
    #[instrument(skip(self, request))]
    pub async fn create_license(
        &self,
        nurse_id: Snowflake,
        caller_id: Snowflake,
        caller_role: UserRole,
        request: CreateLicenseRequest,
    ) -> ServiceResult<LicenseResponse> {
        self.authorize(nurse_id, caller_id, caller_role).await?;

        let mut license = License::new(
            self.ctx.generate_id(),
            nurse_id,
            request.license_number,
            request.state,
            request.kind,
            request.expires_at,
        );
        license.document_url = request.document_url;

        self.ctx.credential_repo().create_license(&license).await?;

        info!(license_id = %license.id, nurse_id = %nurse_id, "License added");

        Ok(LicenseResponse::from(&license))
    }

    /// Update a license
    #[instrument(skip(self, request))]
    pub async fn update_license(
        &self,
        nurse_id: Snowflake,
        license_id: Snowflake,
        caller_id: Snowflake,
        caller_role: UserRole,
        request: UpdateLicenseRequest,
    ) -> ServiceResult<LicenseResponse> {
        self.authorize(nurse_id, caller_id, caller_role).await?;

        let mut license = self.load_license(nurse_id, license_id).await?;

        if let Some(number) = request.license_number {
            license.license_number = number;
        }
        if let Some(state) = request.state {
            license.state = state;
        }
        if let Some(kind) = request.kind {
            license.kind = kind;
        }
        if let Some(expires_at) = request.expires_at {
            license.expires_at = expires_at;
        }
        if let Some(url) = request.document_url {
            license.document_url = Some(url);
        }

        self.ctx.credential_repo().update_license(&license).await?;

        Ok(LicenseResponse::from(&license))
    }

    /// Delete a license
    #[instrument(skip(self))]
    pub async fn delete_license(
        &self,
        nurse_id: Snowflake,
        license_id: Snowflake,
        caller_id: Snowflake,
        caller_role: UserRole,
    ) -> ServiceResult<()> {
        self.authorize(nurse_id, caller_id, caller_role).await?;
        self.load_license(nurse_id, license_id).await?;
        self.ctx.credential_repo().delete_license(license_id).await?;
        info!(license_id = %license_id, "License deleted");
        Ok(())
    }

    // ========================================================================
    // Certifications
    // ========================================================================

    /// List a nurse's certifications
    #[instrument(skip(self))]
    pub async fn list_certifications(
        &self,
        nurse_id: Snowflake,
        caller_id: Snowflake,
        caller_role: UserRole,
    ) -> ServiceResult<Vec<CertificationResponse>> {
        self.authorize(nurse_id, caller_id, caller_role).await?;

        let certifications = self
            .ctx
            .credential_repo()
            .find_certifications_by_nurse(nurse_id)
            .await?;
        Ok(certifications
            .iter()
            .map(CertificationResponse::from)
            .collect())
    }

    /// Add a certification to a nurse profile
    #[instrument(skip(self, request))]
    pub async fn create_certification(
        &self,
        nurse_id: Snowflake,
        caller_id: Snowflake,
        caller_role: UserRole,
        request: CreateCertificationRequest,
    ) -> ServiceResult<CertificationResponse> {
        self.authorize(nurse_id, caller_id, caller_role).await?;

        let mut certification = Certification::new(
            self.ctx.generate_id(),
            nurse_id,
            request.name,
            request.issuing_body,
            request.issued_at,
        );
        certification.expires_at = request.expires_at;
        certification.document_url = request.document_url;

        self.ctx
            .credential_repo()
            .create_certification(&certification)
            .await?;

        info!(certification_id = %certification.id, nurse_id = %nurse_id, "Certification added");

        Ok(CertificationResponse::from(&certification))
    }

    /// Update a certification
    #[instrument(skip(self, request))]
    pub async fn update_certification(
        &self,
        nurse_id: Snowflake,
        certification_id: Snowflake,
        caller_id: Snowflake,
        caller_role: UserRole,
        request: UpdateCertificationRequest,
    ) -> ServiceResult<CertificationResponse> {
        self.authorize(nurse_id, caller_id, caller_role).await?;

        let mut certification = self.load_certification(nurse_id, certification_id).await?;

        if let Some(name) = request.name {
            certification.name = name;
        }
        if let Some(issuing_body) = request.issuing_body {
            certification.issuing_body = issuing_body;
        }
        if let Some(issued_at) = request.issued_at {
            certification.issued_at = issued_at;
        }
        if let Some(expires_at) = request.expires_at {
            certification.expires_at = Some(expires_at);
        }
        if let Some(url) = request.document_url {
            certification.document_url = Some(url);
        }

        self.ctx
            .credential_repo()
            .update_certification(&certification)
            .await?;

        Ok(CertificationResponse::from(&certification))
    }

    /// Delete a certification
    #[instrument(skip(self))]
    pub async fn delete_certification(
        &self,
        nurse_id: Snowflake,
        certification_id: Snowflake,
        caller_id: Snowflake,
        caller_role: UserRole,
    ) -> ServiceResult<()> {
        self.authorize(nurse_id, caller_id, caller_role).await?;
        self.load_certification(nurse_id, certification_id).await?;
        self.ctx
            .credential_repo()
            .delete_certification(certification_id)
            .await?;
        info!(certification_id = %certification_id, "Certification deleted");
        Ok(())
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn authorize(
        &self,
        nurse_id: Snowflake,
        caller_id: Snowflake,
        caller_role: UserRole,
    ) -> ServiceResult<()> {
        NurseService::new(self.ctx)
            .authorize_profile_access(nurse_id, caller_id, caller_role)
            .await
            .map(|_| ())
    }

    /// Load a license and verify it belongs to the given nurse
    async fn load_license(
        &self,
        nurse_id: Snowflake,
        license_id: Snowflake,
    ) -> ServiceResult<License> {
        let license = self
            .ctx
            .credential_repo()
            .find_license(license_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("License", license_id.to_string()))?;

        if license.nurse_id != nurse_id {
            return Err(ServiceError::not_found("License", license_id.to_string()));
        }

        Ok(license)
    }

    /// Load a certification and verify it belongs to the given nurse
    async fn load_certification(
        &self,
        nurse_id: Snowflake,
        certification_id: Snowflake,
    ) -> ServiceResult<Certification> {
        let certification = self
            .ctx
            .credential_repo()
            .find_certification(certification_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("Certification", certification_id.to_string())
            })?;

        if certification.nurse_id != nurse_id {
            return Err(ServiceError::not_found(
                "Certification",
                certification_id.to_string(),
            ));
        }

        Ok(certification)
    }
}
