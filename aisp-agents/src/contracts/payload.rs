//! Component Request Body
//!
//! Every synthesized route accepts the same body shape:
//!
//! ```json
//! { "id": 5, "name": "widget" }
//! ```
//!
//! `name` is required; `id` is optional and may be `null`. Fields beyond
//! these two are kept verbatim so that the agent sees exactly what the
//! caller sent.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Request body shared by all component routes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentPayload {
    /// Optional integer identifier: `None` when absent, `Some(None)` when
    /// sent as `null`
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Option<i64>>,

    /// Required name
    pub name: String,

    /// Additional caller-supplied fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ComponentPayload {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            extra: Map::new(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(Some(id));
        self
    }

    /// Integer identifier, if one was sent.
    pub fn id_value(&self) -> Option<i64> {
        self.id.flatten()
    }

    /// Field-keyed mapping handed to the agent.
    pub fn into_map(self) -> Map<String, Value> {
        let mut map = Map::new();
        match self.id {
            Some(Some(id)) => {
                map.insert("id".to_string(), Value::from(id));
            }
            Some(None) => {
                map.insert("id".to_string(), Value::Null);
            }
            None => {}
        }
        map.insert("name".to_string(), Value::String(self.name));
        map.extend(self.extra);
        map
    }
}

/// A present field, `null` included; absence is handled by `default`.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}
