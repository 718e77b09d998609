// Catalog record models - externally produced template and source listings
use serde::{Deserialize, Serialize};

/// A connected data source the user can pick tables from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: String,
}

/// A pre-built data mart, selectable as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataMart {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Structural pattern guiding how many charts of which type to synthesize.
/// Unrecognized kinds fall back to `Other`, which synthesizes the default
/// chart set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    KpiFocused,
    Comparison,
    Trend,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutTemplate {
    pub id: String,
    pub name: String,
    pub layout_type: LayoutKind,
    #[serde(default)]
    pub description: String,
}

/// Theme record as produced by the template importer. Shares the shape of
/// the theme reference embedded in a specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub font_family: String,
    #[serde(default)]
    pub border_radius: String,
}

/// Imported single-chart template. Read only for its id/name/type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartTemplate {
    pub id: String,
    pub name: String,
    pub chart_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_kind_wire_names() {
        let template: LayoutTemplate = serde_json::from_value(serde_json::json!({
            "id": "l1",
            "name": "KPI board",
            "layoutType": "kpi-focused"
        }))
        .unwrap();
        assert_eq!(template.layout_type, LayoutKind::KpiFocused);
    }

    #[test]
    fn test_unknown_layout_kind_is_other() {
        let template: LayoutTemplate = serde_json::from_value(serde_json::json!({
            "id": "l2",
            "name": "Mystery",
            "layoutType": "masonry"
        }))
        .unwrap();
        assert_eq!(template.layout_type, LayoutKind::Other);
    }
}
