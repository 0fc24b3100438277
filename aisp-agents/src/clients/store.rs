//! Specification Store Trait

use async_trait::async_trait;
use thiserror::Error;

use crate::contracts::{AispRawRow, ComponentRecord, ComponentRow};

/// Errors from specification store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request error: {0}")]
    Request(String),

    #[error("Response error: status={status}, message={message}")]
    Response { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Timeout error")]
    Timeout,
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StoreError::Timeout
        } else if err.is_connect() {
            StoreError::Connection(err.to_string())
        } else if err.is_decode() {
            StoreError::Serialization(err.to_string())
        } else {
            StoreError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Persistence operations on component specifications.
///
/// The serving process only reads; the generator only writes.
#[async_trait]
pub trait ComponentStore: Send + Sync {
    /// All components in the `ready` state, each joined with its raw
    /// instruction when one is stored.
    async fn list_ready_components(&self) -> Result<Vec<ComponentRecord>, StoreError>;

    /// Insert or replace a component row, keyed by its identifier.
    async fn upsert_component(&self, row: &ComponentRow) -> Result<(), StoreError>;

    /// Insert or replace the raw instruction of a component.
    async fn upsert_aisp_raw(&self, row: &AispRawRow) -> Result<(), StoreError>;

    /// Whether the store answers at all.
    async fn health_check(&self) -> Result<bool, StoreError>;
}
