//! Entity <-> model mappers
//!
//! Models with status/role columns convert via `TryFrom` so a corrupt
//! enum value surfaces as a `DomainError` instead of a panic.

mod application;
mod credential;
mod facility;
mod nurse_profile;
mod payment;
mod shift;
mod time_record;
mod user;
