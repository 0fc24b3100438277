//! Agent Traits
//!
//! The capability every AISP agent implements, and the factory the route
//! handlers use to build one per request.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while invoking an agent.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AgentError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPayload(_) => "AGENT_PAYLOAD_INVALID",
            Self::Model(_) => "AGENT_MODEL_FAILED",
            Self::Serialization(_) => "AGENT_SERIALIZATION_FAILED",
        }
    }
}

/// An agent conditioned by one AISP instruction.
#[async_trait]
pub trait Agent: Send + Sync {
    /// System framing derived from the bound instruction.
    fn system_prompt(&self) -> &str;

    /// Model the agent would consult.
    fn model(&self) -> &str;

    /// Answer a single field-keyed payload.
    async fn invoke(&self, payload: Map<String, Value>) -> Result<Value, AgentError>;
}

/// Builds a fresh agent for an instruction.
pub trait AgentFactory: Send + Sync {
    fn build(&self, aisp: &str) -> Box<dyn Agent>;
}
