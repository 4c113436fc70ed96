//! Application services - one per resource

mod application;
mod auth;
mod context;
mod credential;
mod error;
mod facility;
mod nurse;
mod payment;
mod shift;
mod time_record;
mod user;

pub use application::ApplicationService;
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use credential::CredentialService;
pub use error::{ServiceError, ServiceResult};
pub use facility::FacilityService;
pub use nurse::NurseService;
pub use payment::PaymentService;
pub use shift::ShiftService;
pub use time_record::TimeRecordService;
pub use user::UserService;
