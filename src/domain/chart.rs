// Chart placeholder domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Kpi,
    Line,
    Bar,
    Pie,
    Area,
    Table,
    Scatter,
}

/// A chart definition with a title and a query template but no executed
/// data. `id` is unique within a specification and is the join key into the
/// layout grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPlaceholder {
    pub id: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub title: String,
    pub query: String,
    pub x_field: String,
    pub y_field: String,
}

impl ChartPlaceholder {
    pub fn new(
        id: String,
        chart_type: ChartType,
        title: String,
        query: String,
        x_field: String,
        y_field: String,
    ) -> Self {
        Self {
            id,
            chart_type,
            title,
            query,
            x_field,
            y_field,
        }
    }
}
