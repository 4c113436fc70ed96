//! PostgreSQL repository implementations

mod application;
mod credential;
mod error;
mod facility;
mod nurse_profile;
mod payment;
mod shift;
mod time_record;
mod user;

pub use application::PgApplicationRepository;
pub use credential::PgCredentialRepository;
pub use facility::PgFacilityRepository;
pub use nurse_profile::PgNurseProfileRepository;
pub use payment::PgPaymentRepository;
pub use shift::PgShiftRepository;
pub use time_record::PgTimeRecordRepository;
pub use user::PgUserRepository;
