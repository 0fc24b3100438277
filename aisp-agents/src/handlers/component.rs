//! Instruction-Bound Component Handler
//!
//! Serves one synthesized route. The descriptor is fixed at startup; every
//! request builds its own agent from the bound instruction and discards it
//! after answering.

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, instrument};

use super::RouteDescriptor;
use crate::agents::{AgentError, AgentFactory};
use crate::contracts::ComponentPayload;

/// Handler for one component route.
#[derive(Clone)]
pub struct ComponentHandler {
    route: Arc<RouteDescriptor>,
    agents: Arc<dyn AgentFactory>,
}

impl ComponentHandler {
    pub fn new(route: RouteDescriptor, agents: Arc<dyn AgentFactory>) -> Self {
        Self {
            route: Arc::new(route),
            agents,
        }
    }

    pub fn route(&self) -> &RouteDescriptor {
        &self.route
    }

    /// Answer a request body that already passed shape validation.
    #[instrument(skip(self, payload), fields(
        component_id = %self.route.component_id,
        operation = %self.route.operation_name
    ))]
    pub async fn handle(&self, payload: ComponentPayload) -> Result<Value, AgentError> {
        let agent = self.agents.build(&self.route.aisp);

        match agent.invoke(payload.into_map()).await {
            Ok(response) => {
                info!("Component request answered");
                Ok(response)
            }
            Err(e) => {
                error!(error = %e, "Agent invocation failed");
                Err(e)
            }
        }
    }
}
