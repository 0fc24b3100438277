//! AISP PoC Agent Infrastructure
//!
//! Component specifications live in a shared store. Each one in the `ready`
//! state is exposed as an HTTP route whose handler builds an agent from the
//! specification's AISP instruction and hands it the request body.
//!
//! # Flow
//!
//! ```text
//! ComponentStore ──(startup)──▶ synthesize_routes ──▶ RouteDescriptor*
//!                                                        │
//!                        request ──▶ ComponentHandler ◀──┘
//!                                          │
//!                                   AgentFactory::build(aisp) ──▶ Agent::invoke
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use aisp_agents::{load_routes, ComponentHandler, EchoAgentFactory, SupabaseClient};
//!
//! let store = SupabaseClient::from_env()?;
//! let agents = Arc::new(EchoAgentFactory::from_env());
//!
//! for route in load_routes(&store).await {
//!     let handler = ComponentHandler::new(route, agents.clone());
//!     // mount handler.route().path on the router
//! }
//! ```
//!
//! # Modules
//!
//! - [`agents`]: Agent capability and the echo placeholder
//! - [`clients`]: Specification store trait, Supabase and in-memory stores
//! - [`contracts`]: Store rows and the shared request body
//! - [`handlers`]: Route synthesis and the instruction-bound handler

#![warn(rustdoc::missing_crate_level_docs)]

pub mod agents;
pub mod clients;
pub mod contracts;
pub mod handlers;

pub use agents::{Agent, AgentError, AgentFactory, EchoAgent, EchoAgentFactory, DEFAULT_MODEL};
pub use clients::{ComponentStore, MemoryStore, StoreConfig, StoreError, SupabaseClient};
pub use contracts::{
    AispRawRow, ComponentPayload, ComponentRecord, ComponentRow, ComponentStatus,
};
pub use handlers::{
    load_routes, resolve_aisp, synthesize_routes, AispSource, ComponentHandler, RouteDescriptor,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
