//! # shift-service
//!
//! Application layer containing business logic, request/response DTOs,
//! and the service context dependency container.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::{
    ApplicationResponse, ApplyToShiftRequest, AuthResponse, CertificationResponse,
    ClockOutResponse, CreateCertificationRequest, CreateFacilityRequest, CreateLicenseRequest,
    CreateNurseProfileRequest, CreatePaymentRequest, CreateShiftRequest, CurrentUserResponse,
    FacilityResponse, LicenseResponse, LoginRequest, LogoutRequest, NurseProfileResponse,
    PaymentResponse, RefreshTokenRequest, RegisterRequest, ShiftResponse, TimeRecordResponse,
    UpdateCertificationRequest, UpdateFacilityRequest, UpdateLicenseRequest,
    UpdateNurseProfileRequest, UpdatePaymentRequest, UpdateShiftRequest, UpdateUserRequest,
};
pub use services::{
    ApplicationService, AuthService, CredentialService, FacilityService, NurseService,
    PaymentService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    ShiftService, TimeRecordService, UserService,
};
