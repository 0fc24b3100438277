//! Supabase Store Client
//!
//! Reads and writes the `components` and `aisp_raw` tables through the
//! PostgREST interface exposed at `<SUPABASE_URL>/rest/v1/`.
//!
//! Every request carries the service key both as `apikey` and as a bearer
//! token. Requests are sent once; failures surface to the caller.
//!
//! Both upserts resolve conflicts on a unique column: `components.id` and
//! `aisp_raw.component_id`. The latter must also reference `components.id`
//! so the raw instruction can be embedded in the listing query. The DDL is
//! shipped as `schema/store.sql`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::{ComponentStore, StoreError};
use crate::contracts::{AispRawRow, ComponentRecord, ComponentRow, ComponentStatus};

const COMPONENTS_TABLE: &str = "components";
const AISP_RAW_TABLE: &str = "aisp_raw";
/// Ready rows with their raw instruction embedded through the foreign key.
const READY_SELECT: &str = "*,aisp_raw(aisp)";
const UPSERT_PREFERENCE: &str = "resolution=merge-duplicates,return=minimal";

fn default_timeout_secs() -> u64 {
    30
}

/// Store client configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Project URL, always ending in `/`
    pub base_url: Url,

    /// Service role key
    pub service_key: String,

    /// Request timeout
    pub timeout: Duration,
}

impl StoreConfig {
    /// Create a config from a project URL and service key.
    pub fn new(base_url: &str, service_key: impl Into<String>) -> Result<Self, StoreError> {
        let service_key = service_key.into();
        if service_key.trim().is_empty() {
            return Err(StoreError::Configuration(
                "SUPABASE_SERVICE_KEY must not be empty".to_string(),
            ));
        }

        let mut base_url =
            Url::parse(base_url).map_err(|e| StoreError::Configuration(e.to_string()))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            service_key,
            timeout: Duration::from_secs(default_timeout_secs()),
        })
    }

    /// Create config from environment variables.
    ///
    /// `SUPABASE_URL` and `SUPABASE_SERVICE_KEY` are required.
    pub fn from_env() -> Result<Self, StoreError> {
        Self::from_vars(
            std::env::var("SUPABASE_URL").ok(),
            std::env::var("SUPABASE_SERVICE_KEY").ok(),
            std::env::var("SUPABASE_TIMEOUT_SECS").ok(),
        )
    }

    fn from_vars(
        url: Option<String>,
        service_key: Option<String>,
        timeout_secs: Option<String>,
    ) -> Result<Self, StoreError> {
        let url = url.ok_or_else(|| {
            StoreError::Configuration("SUPABASE_URL environment variable is required".to_string())
        })?;
        let service_key = service_key.ok_or_else(|| {
            StoreError::Configuration(
                "SUPABASE_SERVICE_KEY environment variable is required".to_string(),
            )
        })?;

        let timeout_secs = timeout_secs
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_secs);

        Ok(Self {
            timeout: Duration::from_secs(timeout_secs),
            ..Self::new(&url, service_key)?
        })
    }
}

/// HTTP client for the Supabase REST interface.
#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    config: StoreConfig,
}

impl SupabaseClient {
    /// Create a new store client.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Configuration(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self, StoreError> {
        Self::new(StoreConfig::from_env()?)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// URL of a table endpoint with the given query pairs.
    fn table_url(&self, table: &str, query: &[(&str, &str)]) -> Result<Url, StoreError> {
        let mut url = self
            .config
            .base_url
            .join(&format!("rest/v1/{}", table))
            .map_err(|e| StoreError::Configuration(e.to_string()))?;

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = self.authorized(request).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), message = %message, "Store request rejected");
        Err(StoreError::Response {
            status: status.as_u16(),
            message,
        })
    }

    async fn upsert<T: serde::Serialize + Sync>(
        &self,
        table: &str,
        on_conflict: &str,
        row: &T,
    ) -> Result<(), StoreError> {
        let url = self.table_url(table, &[("on_conflict", on_conflict)])?;
        self.send(
            self.client
                .post(url)
                .header("Prefer", UPSERT_PREFERENCE)
                .json(row),
        )
        .await?;
        Ok(())
    }
}

/// A `components` row as returned by the listing query.
///
/// PostgREST embeds a one-to-one relation as an object (or `null`) and
/// older servers embed it as an array; both shapes are accepted.
#[derive(Debug, Deserialize)]
struct ListedRow {
    #[serde(flatten)]
    row: ComponentRow,

    #[serde(default)]
    aisp_raw: Option<EmbeddedRaw>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EmbeddedRaw {
    One(RawText),
    Many(Vec<RawText>),
}

#[derive(Debug, Deserialize)]
struct RawText {
    aisp: String,
}

impl From<ListedRow> for ComponentRecord {
    fn from(listed: ListedRow) -> Self {
        let raw_aisp = match listed.aisp_raw {
            Some(EmbeddedRaw::One(raw)) => Some(raw.aisp),
            Some(EmbeddedRaw::Many(raws)) => raws.into_iter().next().map(|r| r.aisp),
            None => None,
        };
        ComponentRecord::new(listed.row, raw_aisp)
    }
}

#[async_trait]
impl ComponentStore for SupabaseClient {
    #[instrument(skip(self))]
    async fn list_ready_components(&self) -> Result<Vec<ComponentRecord>, StoreError> {
        let status_filter = format!("eq.{}", ComponentStatus::Ready);
        let url = self.table_url(
            COMPONENTS_TABLE,
            &[("select", READY_SELECT), ("status", status_filter.as_str())],
        )?;

        let rows: Vec<ListedRow> = self.send(self.client.get(url)).await?.json().await?;
        debug!(rows = rows.len(), "Fetched ready components");

        Ok(rows.into_iter().map(ComponentRecord::from).collect())
    }

    #[instrument(skip(self, row), fields(component_id = %row.id))]
    async fn upsert_component(&self, row: &ComponentRow) -> Result<(), StoreError> {
        self.upsert(COMPONENTS_TABLE, "id", row).await?;
        info!("Component upserted");
        Ok(())
    }

    #[instrument(skip(self, row), fields(component_id = %row.component_id))]
    async fn upsert_aisp_raw(&self, row: &AispRawRow) -> Result<(), StoreError> {
        self.upsert(AISP_RAW_TABLE, "component_id", row).await?;
        info!("Raw AISP upserted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, StoreError> {
        let url = self.table_url("", &[])?;

        match self.authorized(self.client.get(url)).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                warn!("Health check failed: {}", e);
                Ok(false)
            }
        }
    }
}
