//! Echo Agent
//!
//! Placeholder agent: frames the instruction as a system prompt and returns
//! the payload unchanged inside an `echo` envelope.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::{Agent, AgentError, AgentFactory};

/// Preamble placed before every bound instruction.
pub const SYSTEM_PREAMBLE: &str = "You are an API stub obeying this AISP:\n";

/// Model used when `OPENAI_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Envelope key of the echo response.
pub const ECHO_KEY: &str = "echo";

/// Agent that echoes its payload.
#[derive(Debug, Clone)]
pub struct EchoAgent {
    system_prompt: String,
    model: String,
}

impl EchoAgent {
    pub fn new(aisp: &str) -> Self {
        Self::with_model(aisp, DEFAULT_MODEL)
    }

    pub fn with_model(aisp: &str, model: impl Into<String>) -> Self {
        Self {
            system_prompt: format!("{}{}", SYSTEM_PREAMBLE, aisp),
            model: model.into(),
        }
    }
}

#[async_trait]
impl Agent for EchoAgent {
    fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, payload), fields(model = %self.model, fields = payload.len()))]
    async fn invoke(&self, payload: Map<String, Value>) -> Result<Value, AgentError> {
        debug!("Echoing payload");

        let mut envelope = Map::with_capacity(1);
        envelope.insert(ECHO_KEY.to_string(), Value::Object(payload));
        Ok(Value::Object(envelope))
    }
}

/// Factory for [`EchoAgent`]s sharing one model name.
#[derive(Debug, Clone)]
pub struct EchoAgentFactory {
    model: String,
}

impl EchoAgentFactory {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    /// Model name from `OPENAI_MODEL`, falling back to [`DEFAULT_MODEL`].
    pub fn from_env() -> Self {
        Self::new(std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()))
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Default for EchoAgentFactory {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

impl AgentFactory for EchoAgentFactory {
    fn build(&self, aisp: &str) -> Box<dyn Agent> {
        Box::new(EchoAgent::with_model(aisp, self.model.clone()))
    }
}
