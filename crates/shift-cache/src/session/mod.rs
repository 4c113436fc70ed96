//! Session storage - server-side refresh token records

mod refresh_token;

pub use refresh_token::{RefreshTokenData, RefreshTokenStore};
