// Dashboard specification aggregate - the wire contract other components
// (chart renderer, save endpoint) depend on
use crate::domain::chart::ChartPlaceholder;
use crate::domain::grid::GridCell;
use crate::domain::templates::ThemeTemplate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Theme reference embedded in a specification. Absence of a user choice is
/// represented by the built-in default record, so the wire field is always
/// present and comparisons are total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub font_family: String,
    #[serde(default)]
    pub border_radius: String,
}

impl ThemeRef {
    pub fn default_theme() -> Self {
        Self {
            id: "default".to_string(),
            name: "default".to_string(),
            colors: vec![
                "#2563eb".to_string(),
                "#0ea66c".to_string(),
                "#d97706".to_string(),
                "#e11d48".to_string(),
                "#7c3aed".to_string(),
            ],
            font_family: "Inter, system-ui, sans-serif".to_string(),
            border_radius: "8px".to_string(),
        }
    }

    pub fn from_template(template: &ThemeTemplate) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            colors: template.colors.clone(),
            font_family: template.font_family.clone(),
            border_radius: template.border_radius.clone(),
        }
    }
}

/// An active filter. Produced only by the generation collaborator; the
/// wizard path always starts with an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub field: String,
    pub operator: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Generator {
    Wizard,
    Generated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecMetadata {
    pub layout_applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_template_name: Option<String>,
    pub generator: Generator,
}

impl SpecMetadata {
    pub fn wizard() -> Self {
        Self {
            layout_applied: false,
            layout_template_id: None,
            layout_template_name: None,
            generator: Generator::Wizard,
        }
    }
}

/// The aggregate root: one structured document describing an entire
/// dashboard. Replaced wholesale by the refinement loop, never patched in
/// place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSpecification {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub theme: ThemeRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_mart_id: Option<String>,
    #[serde(default)]
    pub charts: Vec<ChartPlaceholder>,
    #[serde(default)]
    pub layout: Vec<GridCell>,
    #[serde(default)]
    pub filters: Vec<Filter>,
    pub metadata: SpecMetadata,
}

impl DashboardSpecification {
    /// Aggregate invariant: exactly one grid cell per chart, same id sets,
    /// no duplicates, no orphans.
    pub fn layout_aligned(&self) -> bool {
        if self.layout.len() != self.charts.len() {
            return false;
        }
        let chart_ids: HashSet<&str> = self.charts.iter().map(|c| c.id.as_str()).collect();
        if chart_ids.len() != self.charts.len() {
            return false;
        }
        let cell_ids: HashSet<&str> = self.layout.iter().map(|c| c.chart_id.as_str()).collect();
        cell_ids.len() == self.layout.len() && cell_ids == chart_ids
    }
}
