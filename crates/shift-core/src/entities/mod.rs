//! Domain entities for the staffing marketplace

mod application;
mod credential;
mod facility;
mod nurse_profile;
mod payment;
mod shift;
mod time_record;
mod user;

pub use application::{ApplicationStatus, ShiftApplication};
pub use credential::{Certification, License};
pub use facility::Facility;
pub use nurse_profile::NurseProfile;
pub use payment::{generate_payment_reference, Payment, PaymentStatus};
pub use shift::{Shift, ShiftStatus};
pub use time_record::TimeRecord;
pub use user::{User, UserRole};
