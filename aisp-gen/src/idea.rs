//! Idea sheets.

use std::path::Path;

use serde::Deserialize;

use crate::GeneratorError;

/// Prefix marking a feature that yields a CRUD component.
pub const CRUD_MARKER: &str = "CRUD";

/// A YAML idea sheet. Keys other than `features` are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct IdeaSheet {
    pub features: Vec<String>,
}

impl IdeaSheet {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, GeneratorError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        let yaml = std::fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))?;
        Self::from_yaml_str(&yaml)
    }
}

/// Entity named by a CRUD feature: the feature's last word.
///
/// Features without the marker yield `None`.
pub fn crud_entity(feature: &str) -> Option<&str> {
    if !feature.starts_with(CRUD_MARKER) {
        return None;
    }
    feature.split_whitespace().last()
}
