// HTTP catalog repository implementation
use crate::application::catalog_repository::CatalogRepository;
use crate::domain::templates::{ChartTemplate, DataMart, DataSource, LayoutTemplate, ThemeTemplate};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct HttpCatalogRepository {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl HttpCatalogRepository {
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_json(&self, path: &str) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url).header("Accept", "application/json");
        if !self.token.is_empty() {
            request = request.header("Authorization", format!("Bearer {}", self.token));
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send request to catalog: {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Catalog request failed with status {}: {}", status, body);
        }

        response
            .json::<serde_json::Value>()
            .await
            .context("Failed to parse catalog response")
    }

    async fn fetch_records<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let payload = self.fetch_json(path).await?;
        Ok(coerce_records(payload, path))
    }
}

/// Defensively coerce a collaborator payload into a record list: a
/// non-array payload becomes an empty list, and records that do not parse
/// are skipped. Keeps the synthesis pipeline total on bad external input.
fn coerce_records<T: DeserializeOwned>(payload: serde_json::Value, path: &str) -> Vec<T> {
    let Some(items) = payload.as_array() else {
        tracing::warn!("Catalog payload for {} is not an array; treating as empty", path);
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(record) => Some(record),
            Err(error) => {
                tracing::warn!("Skipping malformed catalog record from {}: {}", path, error);
                None
            }
        })
        .collect()
}

#[async_trait]
impl CatalogRepository for HttpCatalogRepository {
    async fn list_data_sources(&self) -> Result<Vec<DataSource>> {
        self.fetch_records("/datasources").await
    }

    async fn list_tables(&self, source_id: &str) -> Result<Vec<String>> {
        let path = format!("/datasources/{}/tables", urlencoding::encode(source_id));
        self.fetch_records(&path).await
    }

    async fn list_data_marts(&self) -> Result<Vec<DataMart>> {
        self.fetch_records("/datamarts").await
    }

    async fn list_themes(&self) -> Result<Vec<ThemeTemplate>> {
        self.fetch_records("/templates/themes").await
    }

    async fn list_layout_templates(&self) -> Result<Vec<LayoutTemplate>> {
        self.fetch_records("/templates/layouts").await
    }

    async fn list_chart_templates(&self) -> Result<Vec<ChartTemplate>> {
        self.fetch_records("/templates/charts").await
    }
}
