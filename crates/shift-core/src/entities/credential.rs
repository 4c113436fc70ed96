//! License and Certification entities - nurse credential records

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Nursing license held by a nurse profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct License {
    pub id: Snowflake,
    pub nurse_id: Snowflake,
    pub license_number: String,
    /// Issuing state, e.g. "TX"
    pub state: String,
    /// License kind, e.g. "RN", "LPN"
    pub kind: String,
    pub expires_at: DateTime<Utc>,
    pub document_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl License {
    /// Create a new License
    pub fn new(
        id: Snowflake,
        nurse_id: Snowflake,
        license_number: String,
        state: String,
        kind: String,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            nurse_id,
            license_number,
            state,
            kind,
            expires_at,
            document_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a document URL
    pub fn with_document(mut self, url: impl Into<String>) -> Self {
        self.document_url = Some(url.into());
        self
    }

    /// Whether the license has lapsed
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

/// Professional certification held by a nurse profile (e.g. BLS, ACLS)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certification {
    pub id: Snowflake,
    pub nurse_id: Snowflake,
    pub name: String,
    pub issuing_body: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub document_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Certification {
    /// Create a new Certification
    pub fn new(
        id: Snowflake,
        nurse_id: Snowflake,
        name: String,
        issuing_body: String,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            nurse_id,
            name,
            issuing_body,
            issued_at,
            expires_at: None,
            document_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach an expiry date
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Attach a document URL
    pub fn with_document(mut self, url: impl Into<String>) -> Self {
        self.document_url = Some(url.into());
        self
    }

    /// Whether the certification has lapsed (never, if no expiry)
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at < Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_license_expiry() {
        let live = License::new(
            Snowflake::new(1),
            Snowflake::new(5),
            "RN-443210".into(),
            "TX".into(),
            "RN".into(),
            Utc::now() + Duration::days(365),
        );
        assert!(!live.is_expired());

        let lapsed = License::new(
            Snowflake::new(2),
            Snowflake::new(5),
            "RN-001122".into(),
            "TX".into(),
            "RN".into(),
            Utc::now() - Duration::days(1),
        );
        assert!(lapsed.is_expired());
    }

    #[test]
    fn test_certification_without_expiry_never_expires() {
        let cert = Certification::new(
            Snowflake::new(3),
            Snowflake::new(5),
            "BLS".into(),
            "AHA".into(),
            Utc::now() - Duration::days(700),
        );
        assert!(!cert.is_expired());
    }

    #[test]
    fn test_certification_with_expiry() {
        let cert = Certification::new(
            Snowflake::new(3),
            Snowflake::new(5),
            "ACLS".into(),
            "AHA".into(),
            Utc::now() - Duration::days(800),
        )
        .with_expiry(Utc::now() - Duration::days(30));
        assert!(cert.is_expired());
    }
}
