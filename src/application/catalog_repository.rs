// Repository trait for the backend catalog - data sources, marts, and
// imported templates
use crate::domain::templates::{ChartTemplate, DataMart, DataSource, LayoutTemplate, ThemeTemplate};
use async_trait::async_trait;

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// List the connected data sources.
    async fn list_data_sources(&self) -> anyhow::Result<Vec<DataSource>>;

    /// List the tables available inside one data source.
    async fn list_tables(&self, source_id: &str) -> anyhow::Result<Vec<String>>;

    /// List the pre-built data marts.
    async fn list_data_marts(&self) -> anyhow::Result<Vec<DataMart>>;

    /// List the imported theme templates.
    async fn list_themes(&self) -> anyhow::Result<Vec<ThemeTemplate>>;

    /// List the imported layout templates.
    async fn list_layout_templates(&self) -> anyhow::Result<Vec<LayoutTemplate>>;

    /// List the imported single-chart templates.
    async fn list_chart_templates(&self) -> anyhow::Result<Vec<ChartTemplate>>;
}
