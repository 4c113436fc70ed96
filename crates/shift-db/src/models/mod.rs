//! Database row models with SQLx `FromRow` derives

mod application;
mod credential;
mod facility;
mod nurse_profile;
mod payment;
mod shift;
mod time_record;
mod user;

pub use application::ApplicationModel;
pub use credential::{CertificationModel, LicenseModel};
pub use facility::FacilityModel;
pub use nurse_profile::NurseProfileModel;
pub use payment::PaymentModel;
pub use shift::ShiftModel;
pub use time_record::TimeRecordModel;
pub use user::UserModel;
