//! Service context - dependency container for services
//!
//! Holds all repositories, cache stores, and other dependencies needed by services.

use std::sync::Arc;

use shift_cache::{Publisher, RefreshTokenStore, SharedRedisPool};
use shift_common::auth::JwtService;
use shift_core::traits::{
    ApplicationRepository, CredentialRepository, FacilityRepository, NurseProfileRepository,
    PaymentRepository, ShiftRepository, TimeRecordRepository, UserRepository,
};
use shift_core::{DomainEvent, SnowflakeGenerator};
use shift_db::PgPool;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - Redis-backed refresh token store
/// - JWT service for authentication
/// - Snowflake generator for ID generation
/// - Redis pub/sub publisher for domain events
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Redis pool
    redis_pool: SharedRedisPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    nurse_repo: Arc<dyn NurseProfileRepository>,
    facility_repo: Arc<dyn FacilityRepository>,
    shift_repo: Arc<dyn ShiftRepository>,
    application_repo: Arc<dyn ApplicationRepository>,
    credential_repo: Arc<dyn CredentialRepository>,
    time_record_repo: Arc<dyn TimeRecordRepository>,
    payment_repo: Arc<dyn PaymentRepository>,

    // Cache stores
    refresh_token_store: RefreshTokenStore,

    // Pub/Sub
    publisher: Publisher,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        redis_pool: SharedRedisPool,
        user_repo: Arc<dyn UserRepository>,
        nurse_repo: Arc<dyn NurseProfileRepository>,
        facility_repo: Arc<dyn FacilityRepository>,
        shift_repo: Arc<dyn ShiftRepository>,
        application_repo: Arc<dyn ApplicationRepository>,
        credential_repo: Arc<dyn CredentialRepository>,
        time_record_repo: Arc<dyn TimeRecordRepository>,
        payment_repo: Arc<dyn PaymentRepository>,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        // Clone the inner RedisPool out of the Arc for the stores
        let inner_pool = (*redis_pool).clone();
        let refresh_token_store = RefreshTokenStore::new(inner_pool.clone());
        let publisher = Publisher::new(inner_pool);

        Self {
            pool,
            redis_pool,
            user_repo,
            nurse_repo,
            facility_repo,
            shift_repo,
            application_repo,
            credential_repo,
            time_record_repo,
            payment_repo,
            refresh_token_store,
            publisher,
            jwt_service,
            snowflake_generator,
        }
    }

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the nurse profile repository
    pub fn nurse_repo(&self) -> &dyn NurseProfileRepository {
        self.nurse_repo.as_ref()
    }

    /// Get the facility repository
    pub fn facility_repo(&self) -> &dyn FacilityRepository {
        self.facility_repo.as_ref()
    }

    /// Get the shift repository
    pub fn shift_repo(&self) -> &dyn ShiftRepository {
        self.shift_repo.as_ref()
    }

    /// Get the application repository
    pub fn application_repo(&self) -> &dyn ApplicationRepository {
        self.application_repo.as_ref()
    }

    /// Get the credential repository
    pub fn credential_repo(&self) -> &dyn CredentialRepository {
        self.credential_repo.as_ref()
    }

    /// Get the time record repository
    pub fn time_record_repo(&self) -> &dyn TimeRecordRepository {
        self.time_record_repo.as_ref()
    }

    /// Get the payment repository
    pub fn payment_repo(&self) -> &dyn PaymentRepository {
        self.payment_repo.as_ref()
    }

    /// Get the refresh token store
    pub fn refresh_token_store(&self) -> &RefreshTokenStore {
        &self.refresh_token_store
    }

    /// Get the Redis pub/sub publisher
    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> shift_core::Snowflake {
        self.snowflake_generator.generate()
    }

    /// Publish a domain event, logging (not failing) on delivery errors.
    ///
    /// Event fan-out is best effort: a Redis hiccup must not roll back a
    /// committed write.
    pub async fn publish_event(&self, event: &DomainEvent) {
        if let Err(e) = self.publisher.publish_domain_event(event).await {
            tracing::warn!(
                event_type = event.event_type(),
                error = %e,
                "Failed to publish domain event"
            );
        }
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &"SharedRedisPool")
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    nurse_repo: Option<Arc<dyn NurseProfileRepository>>,
    facility_repo: Option<Arc<dyn FacilityRepository>>,
    shift_repo: Option<Arc<dyn ShiftRepository>>,
    application_repo: Option<Arc<dyn ApplicationRepository>>,
    credential_repo: Option<Arc<dyn CredentialRepository>>,
    time_record_repo: Option<Arc<dyn TimeRecordRepository>>,
    payment_repo: Option<Arc<dyn PaymentRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn nurse_repo(mut self, repo: Arc<dyn NurseProfileRepository>) -> Self {
        self.nurse_repo = Some(repo);
        self
    }

    pub fn facility_repo(mut self, repo: Arc<dyn FacilityRepository>) -> Self {
        self.facility_repo = Some(repo);
        self
    }

    pub fn shift_repo(mut self, repo: Arc<dyn ShiftRepository>) -> Self {
        self.shift_repo = Some(repo);
        self
    }

    pub fn application_repo(mut self, repo: Arc<dyn ApplicationRepository>) -> Self {
        self.application_repo = Some(repo);
        self
    }

    pub fn credential_repo(mut self, repo: Arc<dyn CredentialRepository>) -> Self {
        self.credential_repo = Some(repo);
        self
    }

    pub fn time_record_repo(mut self, repo: Arc<dyn TimeRecordRepository>) -> Self {
        self.time_record_repo = Some(repo);
        self
    }

    pub fn payment_repo(mut self, repo: Arc<dyn PaymentRepository>) -> Self {
        self.payment_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| ServiceError::validation("pool is required"))?,
            self.redis_pool
                .ok_or_else(|| ServiceError::validation("redis_pool is required"))?,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.nurse_repo
                .ok_or_else(|| ServiceError::validation("nurse_repo is required"))?,
            self.facility_repo
                .ok_or_else(|| ServiceError::validation("facility_repo is required"))?,
            self.shift_repo
                .ok_or_else(|| ServiceError::validation("shift_repo is required"))?,
            self.application_repo
                .ok_or_else(|| ServiceError::validation("application_repo is required"))?,
            self.credential_repo
                .ok_or_else(|| ServiceError::validation("credential_repo is required"))?,
            self.time_record_repo
                .ok_or_else(|| ServiceError::validation("time_record_repo is required"))?,
            self.payment_repo
                .ok_or_else(|| ServiceError::validation("payment_repo is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
        ))
    }
}
