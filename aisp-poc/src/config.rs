//! Configuration for the AISP PoC service
//!
//! This module enforces FAIL-FAST behavior for the store credentials: the
//! service refuses to start without them.
//!
//! Environment variables:
//! - SUPABASE_URL: Specification store endpoint (REQUIRED)
//! - SUPABASE_SERVICE_KEY: Store service credential (REQUIRED)
//! - SUPABASE_TIMEOUT_SECS: Store request timeout (default 30)
//! - OPENAI_MODEL: Model name handed to agents (default gpt-4o-mini)
//! - AISP_PORT: HTTP port (default 8000)
//! - AISP_LOG_LEVEL: Default log filter when RUST_LOG is unset (default info)

use anyhow::{Context, Result};
use std::env;

use aisp_agents::{StoreConfig, DEFAULT_MODEL};

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub port: u16,

    /// Specification store connection
    pub store: StoreConfig,

    /// Model name for agents
    pub model: String,

    /// Log level
    pub log_level: String,

    /// Service name
    pub service_name: String,

    /// Service version
    pub service_version: String,
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "aisp-poc".to_string()
}

fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing store credentials abort startup.
    pub fn load() -> Result<Self> {
        let store = StoreConfig::from_env()
            .context("Specification store is not configured. ABORTING STARTUP.")?;

        Ok(Self {
            port: env::var("AISP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_port),
            store,
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            log_level: env::var("AISP_LOG_LEVEL").unwrap_or_else(|_| default_log_level()),
            service_name: default_service_name(),
            service_version: default_service_version(),
        })
    }

    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> String {
        format!(
            "aisp_poc={level},aisp_agents={level},tower_http={level}",
            level = self.log_level
        )
    }
}
