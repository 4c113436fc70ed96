//! Request and response DTOs for the API

mod mappers;
mod requests;
mod responses;

pub use requests::{
    ApplyToShiftRequest, CreateCertificationRequest, CreateFacilityRequest, CreateLicenseRequest,
    CreateNurseProfileRequest, CreatePaymentRequest, CreateShiftRequest, LoginRequest,
    LogoutRequest, RefreshTokenRequest, RegisterRequest, UpdateCertificationRequest,
    UpdateFacilityRequest, UpdateLicenseRequest, UpdateNurseProfileRequest, UpdatePaymentRequest,
    UpdateShiftRequest, UpdateUserRequest,
};
pub use responses::{
    ApplicationResponse, AuthResponse, CertificationResponse, ClockOutResponse,
    CurrentUserResponse, FacilityResponse, HealthResponse, LicenseResponse, NurseProfileResponse,
    PaymentResponse, ReadinessResponse, ShiftResponse, TimeRecordResponse,
};
