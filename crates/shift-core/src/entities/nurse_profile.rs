//! NurseProfile entity - extended profile for users with the nurse role

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// 1:1 extension of a nurse User holding specialty, experience, and rate
/// preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NurseProfile {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub specialty: String,
    pub years_experience: i32,
    /// Desired hourly rate in integer cents
    pub desired_hourly_rate_cents: i64,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NurseProfile {
    /// Create a new NurseProfile with required fields
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        specialty: String,
        years_experience: i32,
        desired_hourly_rate_cents: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            specialty,
            years_experience,
            desired_hourly_rate_cents,
            bio: None,
            city: None,
            state: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a bio
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    /// Attach a home location
    pub fn with_location(mut self, city: impl Into<String>, state: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self.state = Some(state.into());
        self
    }

    /// Update the specialty
    pub fn set_specialty(&mut self, specialty: String) {
        self.specialty = specialty;
        self.updated_at = Utc::now();
    }

    /// Update the desired hourly rate
    pub fn set_desired_rate(&mut self, cents: i64) {
        self.desired_hourly_rate_cents = cents;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_style_construction() {
        let profile = NurseProfile::new(Snowflake::new(2), Snowflake::new(1), "ICU".into(), 6, 5500)
            .with_bio("Night-shift ICU nurse")
            .with_location("Austin", "TX");

        assert_eq!(profile.specialty, "ICU");
        assert_eq!(profile.desired_hourly_rate_cents, 5500);
        assert_eq!(profile.city.as_deref(), Some("Austin"));
        assert_eq!(profile.state.as_deref(), Some("TX"));
    }

    #[test]
    fn test_set_desired_rate_touches_updated_at() {
        let mut profile =
            NurseProfile::new(Snowflake::new(2), Snowflake::new(1), "ER".into(), 3, 4800);
        let before = profile.updated_at;
        profile.set_desired_rate(5200);
        assert_eq!(profile.desired_hourly_rate_cents, 5200);
        assert!(profile.updated_at >= before);
    }
}
