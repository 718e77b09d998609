// Workspace loading - concurrent, independently failable catalog fetches
use crate::application::catalog_repository::CatalogRepository;
use crate::domain::templates::{ChartTemplate, DataMart, DataSource, LayoutTemplate, ThemeTemplate};
use serde::Serialize;
use std::sync::Arc;

/// User-facing note about one catalog resource that could not be loaded.
/// Only the data-source case is retryable; the wizard cannot proceed
/// without it. The rest are informational.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadNotice {
    pub resource: String,
    pub message: String,
    pub retryable: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSnapshot {
    pub data_sources: Vec<DataSource>,
    pub data_marts: Vec<DataMart>,
    pub themes: Vec<ThemeTemplate>,
    pub layout_templates: Vec<LayoutTemplate>,
    pub chart_templates: Vec<ChartTemplate>,
    pub notices: Vec<LoadNotice>,
}

#[derive(Clone)]
pub struct WorkspaceService {
    catalog: Arc<dyn CatalogRepository>,
}

impl WorkspaceService {
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog }
    }

    /// Fetch every catalog resource concurrently. The fetches have no
    /// ordering dependency on each other and fail independently: a failed
    /// resource becomes an empty list plus a notice, and never blocks the
    /// others from populating.
    pub async fn load(&self) -> WorkspaceSnapshot {
        let (sources, marts, themes, layouts, charts) = futures::join!(
            self.catalog.list_data_sources(),
            self.catalog.list_data_marts(),
            self.catalog.list_themes(),
            self.catalog.list_layout_templates(),
            self.catalog.list_chart_templates(),
        );

        let mut notices = Vec::new();
        let data_sources = recover(sources, "data sources", true, &mut notices);
        let data_marts = recover(marts, "data marts", false, &mut notices);
        let themes = recover(themes, "themes", false, &mut notices);
        let layout_templates = recover(layouts, "layout templates", false, &mut notices);
        let chart_templates = recover(charts, "chart templates", false, &mut notices);

        WorkspaceSnapshot {
            data_sources,
            data_marts,
            themes,
            layout_templates,
            chart_templates,
            notices,
        }
    }

    /// Tables for one data source. Errors propagate: the caller surfaces
    /// them with a retry affordance, since the wizard needs a table.
    pub async fn list_tables(&self, source_id: &str) -> anyhow::Result<Vec<String>> {
        self.catalog.list_tables(source_id).await
    }

    pub async fn find_theme(&self, theme_id: &str) -> Option<ThemeTemplate> {
        let themes = self.catalog.list_themes().await.unwrap_or_default();
        themes.into_iter().find(|t| t.id == theme_id)
    }

    pub async fn find_layout_template(&self, layout_id: &str) -> Option<LayoutTemplate> {
        let layouts = self.catalog.list_layout_templates().await.unwrap_or_default();
        layouts.into_iter().find(|l| l.id == layout_id)
    }
}

fn recover<T>(
    result: anyhow::Result<Vec<T>>,
    resource: &str,
    retryable: bool,
    notices: &mut Vec<LoadNotice>,
) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(error) => {
            tracing::warn!("Failed to load {}: {:#}", resource, error);
            notices.push(LoadNotice {
                resource: resource.to_string(),
                message: format!("Could not load {}", resource),
                retryable,
            });
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Catalog stub where each resource can be switched to fail.
    struct FlakyCatalog {
        fail_sources: bool,
        fail_themes: bool,
    }

    #[async_trait]
    impl CatalogRepository for FlakyCatalog {
        async fn list_data_sources(&self) -> anyhow::Result<Vec<DataSource>> {
            if self.fail_sources {
                anyhow::bail!("connection refused");
            }
            Ok(vec![DataSource {
                id: "pg1".to_string(),
                name: "Postgres".to_string(),
                kind: "postgres".to_string(),
            }])
        }

        async fn list_tables(&self, _source_id: &str) -> anyhow::Result<Vec<String>> {
            Ok(vec!["orders".to_string()])
        }

        async fn list_data_marts(&self) -> anyhow::Result<Vec<DataMart>> {
            Ok(vec![DataMart {
                id: "sales_mart".to_string(),
                name: "Sales".to_string(),
                description: String::new(),
            }])
        }

        async fn list_themes(&self) -> anyhow::Result<Vec<ThemeTemplate>> {
            if self.fail_themes {
                anyhow::bail!("timeout");
            }
            Ok(Vec::new())
        }

        async fn list_layout_templates(&self) -> anyhow::Result<Vec<LayoutTemplate>> {
            Ok(Vec::new())
        }

        async fn list_chart_templates(&self) -> anyhow::Result<Vec<ChartTemplate>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_failed_theme_fetch_does_not_block_sources() {
        let service = WorkspaceService::new(Arc::new(FlakyCatalog {
            fail_sources: false,
            fail_themes: true,
        }));
        let snapshot = service.load().await;
        assert_eq!(snapshot.data_sources.len(), 1);
        assert_eq!(snapshot.data_marts.len(), 1);
        assert!(snapshot.themes.is_empty());
        assert_eq!(snapshot.notices.len(), 1);
        assert_eq!(snapshot.notices[0].resource, "themes");
        assert!(!snapshot.notices[0].retryable);
    }

    #[tokio::test]
    async fn test_source_failure_is_retryable() {
        let service = WorkspaceService::new(Arc::new(FlakyCatalog {
            fail_sources: true,
            fail_themes: false,
        }));
        let snapshot = service.load().await;
        assert!(snapshot.data_sources.is_empty());
        // The other resources still populated.
        assert_eq!(snapshot.data_marts.len(), 1);
        let notice = &snapshot.notices[0];
        assert_eq!(notice.resource, "data sources");
        assert!(notice.retryable);
    }
}
