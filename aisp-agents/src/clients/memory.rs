//! In-process specification store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{ComponentStore, StoreError};
use crate::contracts::{AispRawRow, ComponentRecord, ComponentRow, ComponentStatus};

#[derive(Debug, Default)]
struct Tables {
    components: BTreeMap<String, ComponentRow>,
    aisp_raw: BTreeMap<String, String>,
    writes: usize,
}

/// Specification store held in memory.
///
/// Rows are kept ordered by identifier, so listings are deterministic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with rows, bypassing the write counter.
    pub fn with_rows(
        components: impl IntoIterator<Item = ComponentRow>,
        aisp_raw: impl IntoIterator<Item = AispRawRow>,
    ) -> Self {
        let store = Self::new();
        {
            let mut tables = store.tables.write();
            for row in components {
                tables.components.insert(row.id.clone(), row);
            }
            for raw in aisp_raw {
                tables.aisp_raw.insert(raw.component_id, raw.aisp);
            }
        }
        store
    }

    pub fn component(&self, id: &str) -> Option<ComponentRow> {
        self.tables.read().components.get(id).cloned()
    }

    pub fn aisp_raw(&self, component_id: &str) -> Option<String> {
        self.tables.read().aisp_raw.get(component_id).cloned()
    }

    pub fn component_count(&self) -> usize {
        self.tables.read().components.len()
    }

    pub fn aisp_raw_count(&self) -> usize {
        self.tables.read().aisp_raw.len()
    }

    /// Number of upserts applied since construction.
    pub fn write_count(&self) -> usize {
        self.tables.read().writes
    }
}

#[async_trait]
impl ComponentStore for MemoryStore {
    async fn list_ready_components(&self) -> Result<Vec<ComponentRecord>, StoreError> {
        let tables = self.tables.read();
        Ok(tables
            .components
            .values()
            .filter(|row| row.status == ComponentStatus::Ready)
            .map(|row| ComponentRecord::new(row.clone(), tables.aisp_raw.get(&row.id).cloned()))
            .collect())
    }

    async fn upsert_component(&self, row: &ComponentRow) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        tables.components.insert(row.id.clone(), row.clone());
        tables.writes += 1;
        Ok(())
    }

    async fn upsert_aisp_raw(&self, row: &AispRawRow) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        tables
            .aisp_raw
            .insert(row.component_id.clone(), row.aisp.clone());
        tables.writes += 1;
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
