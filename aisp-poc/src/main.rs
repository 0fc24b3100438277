//! AISP PoC - Dynamic Component Service
//!
//! # Service Topology
//!
//! - `/healthz` - Health check endpoint
//! - `/components` - Mounted component routes
//! - `/<component_id>` - One POST endpoint per ready component specification
//!
//! Component routes are synthesized once, before the listener is bound.
//! Specifications stored after startup are served after the next restart.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aisp_agents::{load_routes, EchoAgentFactory, SupabaseClient};

mod config;
mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    // A local .env file, if any, fills variables not already set
    dotenvy::dotenv().ok();

    // Load configuration from environment
    let config = config::Config::load()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!(
        service = %config.service_name,
        version = %config.service_version,
        "Starting AISP PoC service"
    );
    info!(
        port = config.port,
        store_url = %config.store.base_url,
        model = %config.model,
        "Configuration loaded"
    );

    // Store client, created once and passed to the synthesizer
    let store = SupabaseClient::new(config.store.clone())?;
    let agents = Arc::new(EchoAgentFactory::new(config.model.clone()));

    // Synthesize component routes before accepting connections
    let component_routes = load_routes(&store).await;
    info!(count = component_routes.len(), "Component routes ready");

    let app = routes::build_router(component_routes, agents);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
