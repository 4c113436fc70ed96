//! Entity -> response DTO mappers

use shift_core::entities::{
    Certification, Facility, License, NurseProfile, Payment, Shift, ShiftApplication, TimeRecord,
    User,
};
use shift_core::Snowflake;

use super::responses::{
    ApplicationResponse, CertificationResponse, CurrentUserResponse, FacilityResponse,
    LicenseResponse, NurseProfileResponse, PaymentResponse, ShiftResponse, TimeRecordResponse,
};

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<&NurseProfile> for NurseProfileResponse {
    fn from(profile: &NurseProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            user_id: profile.user_id.to_string(),
            specialty: profile.specialty.clone(),
            years_experience: profile.years_experience,
            desired_hourly_rate_cents: profile.desired_hourly_rate_cents,
            bio: profile.bio.clone(),
            city: profile.city.clone(),
            state: profile.state.clone(),
            created_at: profile.created_at,
        }
    }
}

impl From<&Facility> for FacilityResponse {
    fn from(facility: &Facility) -> Self {
        Self {
            id: facility.id.to_string(),
            name: facility.name.clone(),
            address: facility.address.clone(),
            city: facility.city.clone(),
            state: facility.state.clone(),
            postal_code: facility.postal_code.clone(),
            phone: facility.phone.clone(),
            email: facility.email.clone(),
            created_at: facility.created_at,
        }
    }
}

impl From<&Shift> for ShiftResponse {
    fn from(shift: &Shift) -> Self {
        Self {
            id: shift.id.to_string(),
            facility_id: shift.facility_id.to_string(),
            specialty: shift.specialty.clone(),
            starts_at: shift.starts_at,
            ends_at: shift.ends_at,
            hourly_rate_cents: shift.hourly_rate_cents,
            requirements: shift.requirements.clone(),
            notes: shift.notes.clone(),
            status: shift.status,
            assigned_nurse_id: shift.assigned_nurse_id.as_ref().map(Snowflake::to_string),
            created_at: shift.created_at,
            updated_at: shift.updated_at,
        }
    }
}

impl From<&ShiftApplication> for ApplicationResponse {
    fn from(application: &ShiftApplication) -> Self {
        Self {
            id: application.id.to_string(),
            shift_id: application.shift_id.to_string(),
            nurse_id: application.nurse_id.to_string(),
            note: application.note.clone(),
            status: application.status,
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }
}

impl From<&License> for LicenseResponse {
    fn from(license: &License) -> Self {
        Self {
            id: license.id.to_string(),
            nurse_id: license.nurse_id.to_string(),
            license_number: license.license_number.clone(),
            state: license.state.clone(),
            kind: license.kind.clone(),
            expires_at: license.expires_at,
            document_url: license.document_url.clone(),
            expired: license.is_expired(),
            created_at: license.created_at,
        }
    }
}

impl From<&Certification> for CertificationResponse {
    fn from(certification: &Certification) -> Self {
        Self {
            id: certification.id.to_string(),
            nurse_id: certification.nurse_id.to_string(),
            name: certification.name.clone(),
            issuing_body: certification.issuing_body.clone(),
            issued_at: certification.issued_at,
            expires_at: certification.expires_at,
            document_url: certification.document_url.clone(),
            expired: certification.is_expired(),
            created_at: certification.created_at,
        }
    }
}

impl From<&TimeRecord> for TimeRecordResponse {
    fn from(record: &TimeRecord) -> Self {
        Self {
            id: record.id.to_string(),
            shift_id: record.shift_id.to_string(),
            nurse_id: record.nurse_id.to_string(),
            clock_in_at: record.clock_in_at,
            clock_out_at: record.clock_out_at,
            worked_minutes: record.worked_minutes,
        }
    }
}

impl From<&Payment> for PaymentResponse {
    fn from(payment: &Payment) -> Self {
        Self {
            id: payment.id.to_string(),
            time_record_id: payment.time_record_id.to_string(),
            amount_cents: payment.amount_cents,
            reference: payment.reference.clone(),
            status: payment.status,
            created_at: payment.created_at,
            updated_at: payment.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use shift_core::{Snowflake, UserRole};

    #[test]
    fn test_user_response_serializes_id_as_string() {
        let user = User::new(
            Snowflake::new(123456789012345678),
            "nora@example.com".into(),
            UserRole::Nurse,
            "Nora".into(),
            "Reyes".into(),
        );
        let response = CurrentUserResponse::from(&user);
        assert_eq!(response.id, "123456789012345678");

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"role\":\"nurse\""));
    }

    #[test]
    fn test_shift_response_carries_status() {
        let starts = Utc::now();
        let shift = Shift::new(
            Snowflake::new(1),
            Snowflake::new(2),
            "ICU".into(),
            starts,
            starts + Duration::hours(8),
            6200,
        );
        let response = ShiftResponse::from(&shift);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"open\""));
        assert!(!json.contains("assigned_nurse_id"));
    }
}
