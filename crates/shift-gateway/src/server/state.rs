//! Shared gateway state

use std::sync::Arc;

use shift_cache::{Publisher, Subscriber};
use shift_common::JwtService;

use crate::connection::ConnectionManager;

/// Shared state for the gateway server
#[derive(Clone)]
pub struct GatewayState {
    connection_manager: Arc<ConnectionManager>,
    jwt_service: Arc<JwtService>,
    publisher: Publisher,
    subscriber: Arc<Subscriber>,
}

impl GatewayState {
    /// Create a new gateway state
    pub fn new(
        connection_manager: Arc<ConnectionManager>,
        jwt_service: Arc<JwtService>,
        publisher: Publisher,
        subscriber: Arc<Subscriber>,
    ) -> Self {
        Self {
            connection_manager,
            jwt_service,
            publisher,
            subscriber,
        }
    }

    /// Get the connection manager
    pub fn connection_manager(&self) -> &Arc<ConnectionManager> {
        &self.connection_manager
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// Get the pub/sub publisher
    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    /// Get the pub/sub subscriber
    pub fn subscriber(&self) -> &Arc<Subscriber> {
        &self.subscriber
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field(
                "connections",
                &self.connection_manager.connection_count(),
            )
            .finish_non_exhaustive()
    }
}
