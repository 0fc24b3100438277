//! Generator errors.

use std::path::PathBuf;

use aisp_agents::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid idea sheet: {0}")]
    Idea(#[from] serde_yaml::Error),

    #[error("template error: {0}")]
    Template(String),

    #[error("rendered specification is not valid JSON: {0}")]
    RenderedJson(#[from] serde_json::Error),

    #[error("invalid component schema: {0}")]
    InvalidSchema(String),

    #[error("schema error: {message}")]
    Schema { message: String },

    #[error("specification {component_id} has no string `aisp` field")]
    MissingAisp { component_id: String },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl GeneratorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
