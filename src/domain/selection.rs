// Data selection domain model
use serde::{Deserialize, Serialize};

/// What the user is building the dashboard over: a table inside a data
/// source, or a pre-built data mart. The two modes are mutually exclusive;
/// switching modes discards the other variant's fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum DataSelection {
    #[serde(rename_all = "camelCase")]
    Datasource { source_id: String, table_name: String },
    #[serde(rename_all = "camelCase")]
    Datamart { mart_id: String },
}

impl DataSelection {
    pub fn datasource(source_id: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self::Datasource {
            source_id: source_id.into(),
            table_name: table_name.into(),
        }
    }

    pub fn datamart(mart_id: impl Into<String>) -> Self {
        Self::Datamart {
            mart_id: mart_id.into(),
        }
    }

    /// The queryable relation this selection resolves to: the table name for
    /// a data source, the mart id for a data mart.
    pub fn relation(&self) -> &str {
        match self {
            Self::Datasource { table_name, .. } => table_name,
            Self::Datamart { mart_id } => mart_id,
        }
    }

    /// True when every field the mode requires is non-empty.
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Datasource {
                source_id,
                table_name,
            } => !source_id.trim().is_empty() && !table_name.trim().is_empty(),
            Self::Datamart { mart_id } => !mart_id.trim().is_empty(),
        }
    }
}
