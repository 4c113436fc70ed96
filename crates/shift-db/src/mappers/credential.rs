//! License and Certification entity <-> model mappers

use shift_core::entities::{Certification, License};
use shift_core::value_objects::Snowflake;

use crate::models::{CertificationModel, LicenseModel};

impl From<LicenseModel> for License {
    fn from(model: LicenseModel) -> Self {
        License {
            id: Snowflake::new(model.id),
            nurse_id: Snowflake::new(model.nurse_id),
            license_number: model.license_number,
            state: model.state,
            kind: model.kind,
            expires_at: model.expires_at,
            document_url: model.document_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<CertificationModel> for Certification {
    fn from(model: CertificationModel) -> Self {
        Certification {
            id: Snowflake::new(model.id),
            nurse_id: Snowflake::new(model.nurse_id),
            name: model.name,
            issuing_body: model.issuing_body,
            issued_at: model.issued_at,
            expires_at: model.expires_at,
            document_url: model.document_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
