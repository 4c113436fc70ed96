//! Gateway server state and routing

mod handler;
mod state;

pub use handler::gateway_handler;
pub use state::GatewayState;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// Build the gateway router
pub fn gateway_router(state: GatewayState) -> Router {
    Router::new()
        .route("/gateway", get(gateway_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
