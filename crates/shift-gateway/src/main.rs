//! Shift Gateway entry point
//!
//! Run with:
//! ```bash
//! cargo run -p shift-gateway
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use shift_cache::{PubSubChannel, RedisPool, RedisPoolConfig, SubscriberBuilder};
use shift_common::{try_init_tracing, AppConfig, JwtService};
use shift_gateway::connection::ConnectionManager;
use shift_gateway::events::run_event_bridge;
use shift_gateway::{gateway_router, GatewayState};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {}", e);
    }

    if let Err(e) = run().await {
        error!(error = %e, "Gateway failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Shift Gateway...");

    let config = AppConfig::from_env()?;

    info!(
        env = ?config.app.env,
        port = config.gateway.port,
        "Configuration loaded"
    );

    // Redis: publisher side for chat sends, subscriber side for fan-in
    let redis_pool = RedisPool::new(RedisPoolConfig::from(&config.redis))?;
    let publisher = shift_cache::Publisher::new(redis_pool);

    let subscriber = Arc::new(
        SubscriberBuilder::new()
            .redis_url(config.redis.url.clone())
            .subscribe(PubSubChannel::broadcast())
            .build()
            .await?,
    );

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    let state = GatewayState::new(
        ConnectionManager::new_shared(),
        jwt_service,
        publisher,
        subscriber,
    );

    // Bridge Redis pub/sub into WebSocket rooms
    tokio::spawn(run_event_bridge(state.clone()));

    let app = gateway_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.gateway.port));

    info!("Gateway listening on ws://{}/gateway", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
