//! Component Specification Contracts
//!
//! Mirrors of the two store tables:
//!
//! - `components`: identifier (primary key), JSON specification body, status
//! - `aisp_raw`: component identifier, raw instruction text

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field inside a specification body that carries an embedded instruction.
pub const EMBEDDED_AISP_FIELD: &str = "AISP";

/// Lifecycle status of a component specification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    /// Written but not yet eligible for serving
    #[default]
    Draft,
    /// Eligible for route synthesis
    Ready,
    /// Withdrawn from serving
    Disabled,
    /// Any status value this build does not know about
    #[serde(other)]
    Unknown,
}

impl ComponentStatus {
    /// Value stored in the `status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Ready => "ready",
            Self::Disabled => "disabled",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of the `components` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentRow {
    /// Unique component identifier (e.g. `API-CRUD-WIDGET-1A2B`)
    pub id: String,

    /// Specification body
    pub json_spec: Value,

    /// Lifecycle status
    pub status: ComponentStatus,
}

impl ComponentRow {
    /// Create a row in the `ready` state.
    pub fn ready(id: impl Into<String>, json_spec: Value) -> Self {
        Self {
            id: id.into(),
            json_spec,
            status: ComponentStatus::Ready,
        }
    }

    /// The `AISP` field embedded in the specification body, if present.
    pub fn embedded_aisp(&self) -> Option<&Value> {
        self.json_spec.get(EMBEDDED_AISP_FIELD)
    }
}

/// A row of the `aisp_raw` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AispRawRow {
    /// Identifier of the owning component
    pub component_id: String,

    /// Raw instruction text
    pub aisp: String,
}

/// A component row joined with its separately stored instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentRecord {
    pub row: ComponentRow,
    pub raw_aisp: Option<String>,
}

impl ComponentRecord {
    pub fn new(row: ComponentRow, raw_aisp: Option<String>) -> Self {
        Self { row, raw_aisp }
    }

    pub fn id(&self) -> &str {
        &self.row.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_round_trips_lowercase() {
        let status: ComponentStatus = serde_json::from_value(json!("ready")).unwrap();
        assert_eq!(status, ComponentStatus::Ready);
        assert_eq!(serde_json::to_value(ComponentStatus::Disabled).unwrap(), json!("disabled"));
    }

    #[test]
    fn test_unrecognised_status_is_unknown() {
        let row: ComponentRow = serde_json::from_value(json!({
            "id": "API-CRUD-X-0000",
            "json_spec": {},
            "status": "archived"
        }))
        .unwrap();
        assert_eq!(row.status, ComponentStatus::Unknown);
    }

    #[test]
    fn test_embedded_aisp_lookup_is_case_sensitive() {
        let row = ComponentRow::ready("C-1", json!({"aisp": "lower", "AISP": "upper"}));
        assert_eq!(row.embedded_aisp(), Some(&json!("upper")));

        let row = ComponentRow::ready("C-2", json!({"aisp": "lower"}));
        assert!(row.embedded_aisp().is_none());
    }
}
