//! Component schema validation.
//!
//! Wraps the `jsonschema` crate's `Validator`. Only the first violation is
//! reported; the generator stops on it.

use std::path::Path;

use serde_json::Value;

use crate::GeneratorError;

/// Default location of the component schema.
pub const DEFAULT_SCHEMA_PATH: &str = "schema/aisp_component.schema.json";

#[derive(Debug)]
pub struct SpecValidator {
    validator: jsonschema::Validator,
}

impl SpecValidator {
    pub fn new(schema: &Value) -> Result<Self, GeneratorError> {
        let validator = jsonschema::options()
            .build(schema)
            .map_err(|e| GeneratorError::InvalidSchema(e.to_string()))?;

        Ok(Self { validator })
    }

    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        let text = std::fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))?;
        let schema: Value = serde_json::from_str(&text)
            .map_err(|e| GeneratorError::InvalidSchema(format!("{}: {}", path.display(), e)))?;
        Self::new(&schema)
    }

    /// # Errors
    ///
    /// Returns [`GeneratorError::Schema`] with the first violation message.
    pub fn validate(&self, spec: &Value) -> Result<(), GeneratorError> {
        match self.validator.iter_errors(spec).next() {
            Some(error) => Err(GeneratorError::Schema {
                message: error.to_string(),
            }),
            None => Ok(()),
        }
    }
}
