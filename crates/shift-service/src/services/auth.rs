//! Authentication service
//!
//! Handles user registration, login, token refresh, and logout.

use shift_cache::RefreshTokenData;
use shift_common::auth::{hash_password, validate_password_strength, verify_password};
use shift_core::entities::User;
use shift_core::Snowflake;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{AuthResponse, CurrentUserResponse, LoginRequest, RefreshTokenRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(email = %request.email, role = %request.role))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        // Validate password strength before proceeding
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        // Check if email already exists
        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(ServiceError::conflict("Email already registered"));
        }

        // Hash password
        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        // Create user
        let user_id = self.ctx.generate_id();
        let mut user = User::new(
            user_id,
            request.email,
            request.role,
            request.first_name,
            request.last_name,
        );
        user.phone = request.phone;

        // Save to database
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user_id, "User registered successfully");

        self.issue_tokens(&user).await
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        // Find user by email
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Login failed: user not found");
                ServiceError::App(shift_common::AppError::InvalidCredentials)
            })?;

        // Get password hash
        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(shift_common::AppError::InvalidCredentials)
            })?;

        // Verify password
        let is_valid = verify_password(&request.password, &password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(shift_common::AppError::InvalidCredentials));
        }

        info!(user_id = %user.id, "User logged in successfully");

        self.issue_tokens(&user).await
    }

    /// Refresh access token using refresh token
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        // Validate refresh token exists in Redis
        let refresh_data = self
            .ctx
            .refresh_token_store()
            .validate(&request.refresh_token)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?
            .ok_or(ServiceError::App(shift_common::AppError::InvalidToken))?;

        // Get user
        let user = self
            .ctx
            .user_repo()
            .find_by_id(refresh_data.user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", refresh_data.user_id.to_string()))?;

        // Revoke old refresh token (rotation)
        self.ctx
            .refresh_token_store()
            .revoke(&request.refresh_token)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        info!(user_id = %user.id, "Tokens refreshed successfully");

        self.issue_tokens(&user).await
    }

    /// Logout user by revoking refresh token(s)
    #[instrument(skip(self, refresh_token))]
    pub async fn logout(
        &self,
        user_id: Snowflake,
        refresh_token: Option<String>,
    ) -> ServiceResult<()> {
        if let Some(token) = refresh_token {
            // Revoke specific refresh token
            self.ctx
                .refresh_token_store()
                .revoke(&token)
                .await
                .map_err(|e| ServiceError::internal(e.to_string()))?;
        } else {
            // Revoke all refresh tokens for user
            self.ctx
                .refresh_token_store()
                .revoke_all_for_user(user_id)
                .await
                .map_err(|e| ServiceError::internal(e.to_string()))?;
        }

        info!(user_id = %user_id, "User logged out successfully");
        Ok(())
    }

    /// Generate a token pair for a user and persist the refresh side
    async fn issue_tokens(&self, user: &User) -> ServiceResult<AuthResponse> {
        let token_pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(user.id, user.role)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        let session_id = Uuid::new_v4().to_string();
        let refresh_data = RefreshTokenData::new(user.id, session_id);
        self.ctx
            .refresh_token_store()
            .store(&token_pair.refresh_token, &refresh_data)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        Ok(AuthResponse::new(
            token_pair.access_token,
            token_pair.refresh_token,
            token_pair.expires_in,
            CurrentUserResponse::from(user),
        ))
    }
}

#[cfg(test)]
mod tests {
    // Covered by the end-to-end auth tests in tests/integration.
}
