use anyhow::{Context, Result};
use log::{info, warn};
use serde_json::Value;

use crate::cache::Cache;
use crate::config::settings::CatalogSettings;
use crate::domain::Catalog;
use crate::http::HttpClient;

/// Cache key of the last catalog the remote API returned
pub const SNAPSHOT_KEY: &str = "catalog_snapshot";

/// Client for the remote tournaments API
pub struct CatalogClient {
    client: HttpClient,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str, settings: &CatalogSettings) -> Result<Self> {
        let client = HttpClient::new(settings.user_agent, settings.timeout_secs)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the full catalog (`GET {base}/tournaments`)
    pub async fn fetch_catalog(&self) -> Result<Catalog> {
        let url = self.build_catalog_url();
        info!("Fetching tournament catalog from {}", url);

        let value: Value = self
            .client
            .get(&url)
            .await?
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON from {}", url))?;

        serde_json::from_value(value).context("Failed to map JSON to Catalog")
    }

    /// Fetch the catalog and store it as the offline snapshot
    pub async fn fetch_and_cache_catalog(&self, cache: &Cache) -> Result<Catalog> {
        let catalog = self.fetch_catalog().await?;

        if let Err(e) = cache.save(SNAPSHOT_KEY, &catalog) {
            warn!("Failed to save catalog snapshot: {:?}", e);
        }

        info!(
            "Fetched {} one-off and {} recurring tournaments",
            catalog.one_off.len(),
            catalog.recurring.len()
        );
        Ok(catalog)
    }

    // --- Helper Methods ---

    fn build_catalog_url(&self) -> String {
        format!("{}/tournaments", self.base_url)
    }
}
