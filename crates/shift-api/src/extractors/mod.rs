//! Request extractors

mod auth;
mod pagination;
mod validated;

pub use auth::AuthUser;
pub use pagination::Pagination;
pub use validated::{OptionalValidatedJson, ValidatedJson};
