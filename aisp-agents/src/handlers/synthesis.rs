//! Route Synthesis
//!
//! Turns the ready rows of the specification store into route descriptors.
//!
//! Instruction precedence for each row:
//!
//! 1. the `AISP` field embedded in the specification body
//! 2. the raw instruction stored in `aisp_raw`
//! 3. an empty instruction (logged)

use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::clients::ComponentStore;
use crate::contracts::ComponentRecord;

/// Suffix of the operation name registered for each component route.
pub const OPERATION_SUFFIX: &str = "_create";

/// Where an instruction was resolved from.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AispSource {
    Embedded,
    Raw,
    Missing,
}

/// A route derived from one ready component specification.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteDescriptor {
    /// Component identifier
    pub component_id: String,

    /// HTTP path, `/<component_id>`
    pub path: String,

    /// Operation name, `<component_id>_create`
    pub operation_name: String,

    /// Instruction bound to the route
    #[serde(skip)]
    pub aisp: String,

    /// Origin of the bound instruction
    pub aisp_source: AispSource,
}

impl RouteDescriptor {
    pub fn from_record(record: &ComponentRecord) -> Self {
        let id = record.id();
        let (aisp, aisp_source) = resolve_aisp(record);

        Self {
            component_id: id.to_string(),
            path: format!("/{}", id),
            operation_name: format!("{}{}", id, OPERATION_SUFFIX),
            aisp,
            aisp_source,
        }
    }
}

/// Resolve the instruction text of a component.
///
/// An embedded string is used verbatim; any other embedded JSON value is
/// bound as its compact JSON text.
pub fn resolve_aisp(record: &ComponentRecord) -> (String, AispSource) {
    if let Some(embedded) = record.row.embedded_aisp() {
        let text = match embedded {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return (text, AispSource::Embedded);
    }

    match &record.raw_aisp {
        Some(raw) => (raw.clone(), AispSource::Raw),
        None => (String::new(), AispSource::Missing),
    }
}

/// One descriptor per record, in input order.
pub fn synthesize_routes(records: &[ComponentRecord]) -> Vec<RouteDescriptor> {
    records
        .iter()
        .map(|record| {
            let route = RouteDescriptor::from_record(record);
            if route.aisp_source == AispSource::Missing {
                warn!(
                    component_id = %route.component_id,
                    "No AISP embedded or stored; binding an empty instruction"
                );
            }
            route
        })
        .collect()
}

/// Read the store and synthesize routes.
///
/// A store failure is not fatal: it is logged and no routes are produced.
#[instrument(skip(store))]
pub async fn load_routes(store: &dyn ComponentStore) -> Vec<RouteDescriptor> {
    let records = match store.list_ready_components().await {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "Specification store unavailable; no component routes synthesized");
            return Vec::new();
        }
    };

    let routes = synthesize_routes(&records);
    info!(routes = routes.len(), "Component routes synthesized");
    routes
}
