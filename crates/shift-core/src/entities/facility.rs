//! Facility entity - a healthcare site posting shifts

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Healthcare facility posting shifts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facility {
    pub id: Snowflake,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Facility {
    /// Create a new Facility with required fields
    pub fn new(
        id: Snowflake,
        name: String,
        address: String,
        city: String,
        state: String,
        postal_code: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            address,
            city,
            state,
            postal_code,
            phone: None,
            email: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach contact details
    pub fn with_contact(mut self, phone: Option<String>, email: Option<String>) -> Self {
        self.phone = phone;
        self.email = email;
        self
    }

    /// Single-line mailing address
    pub fn full_address(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.address, self.city, self.state, self.postal_code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_address() {
        let facility = Facility::new(
            Snowflake::new(10),
            "St. Anne Medical Center".into(),
            "400 Oak St".into(),
            "Denver".into(),
            "CO".into(),
            "80203".into(),
        );
        assert_eq!(facility.full_address(), "400 Oak St, Denver, CO 80203");
    }
}
