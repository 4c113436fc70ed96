//! HTTP request handlers, one module per resource

pub mod applications;
pub mod auth;
pub mod credentials;
pub mod facilities;
pub mod health;
pub mod nurses;
pub mod payments;
pub mod shifts;
pub mod time_records;
pub mod users;

use shift_core::Snowflake;

use crate::response::ApiError;

/// Parse a Snowflake path segment, naming the parameter in the error
pub(crate) fn parse_id(raw: &str, param: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {param} format")))
}
