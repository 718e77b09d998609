// Conversation transcript and specification deltas
use crate::domain::specification::DashboardSpecification;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    System,
}

/// One turn of the refinement conversation. Turns are append-only and never
/// mutated or reordered; the transcript is context for the generation
/// collaborator, not the source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn now(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Computed difference between two specification versions. Derived fresh on
/// every comparison; never stored. Count-based, so composition changes of
/// equal cardinality are not visible — known behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecDelta {
    pub chart_count_change: i64,
    pub filter_count_change: i64,
    pub theme_changed: bool,
}

impl SpecDelta {
    pub fn between(old: &DashboardSpecification, new: &DashboardSpecification) -> Self {
        Self {
            chart_count_change: new.charts.len() as i64 - old.charts.len() as i64,
            filter_count_change: new.filters.len() as i64 - old.filters.len() as i64,
            theme_changed: new.theme != old.theme,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chart_count_change == 0 && self.filter_count_change == 0 && !self.theme_changed
    }

    /// Human-readable change narration. Never empty: when no facet changed,
    /// falls back to a generic line.
    pub fn summary(&self, new: &DashboardSpecification) -> String {
        let mut parts = Vec::new();
        if let Some(phrase) = count_phrase(self.chart_count_change, "chart") {
            parts.push(phrase);
        }
        if let Some(phrase) = count_phrase(self.filter_count_change, "filter") {
            parts.push(phrase);
        }
        if self.theme_changed {
            parts.push(format!("Changed theme to \"{}\"", new.theme.name));
        }
        if parts.is_empty() {
            "Regenerated with your preferences".to_string()
        } else {
            parts.join(". ")
        }
    }
}

fn count_phrase(change: i64, noun: &str) -> Option<String> {
    if change == 0 {
        return None;
    }
    let verb = if change > 0 { "Added" } else { "Removed" };
    let count = change.unsigned_abs();
    let plural = if count == 1 { "" } else { "s" };
    Some(format!("{} {} {}{}", verb, count, noun, plural))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::specification::{Filter, SpecMetadata, ThemeRef};

    fn base_spec() -> DashboardSpecification {
        DashboardSpecification {
            title: "Sales".to_string(),
            description: String::new(),
            theme: ThemeRef::default_theme(),
            data_source_id: None,
            table_name: None,
            data_mart_id: Some("sales_mart".to_string()),
            charts: Vec::new(),
            layout: Vec::new(),
            filters: Vec::new(),
            metadata: SpecMetadata::wizard(),
        }
    }

    #[test]
    fn test_noop_diff_is_empty_and_falls_back() {
        let spec = base_spec();
        let delta = SpecDelta::between(&spec, &spec);
        assert!(delta.is_empty());
        assert_eq!(delta.summary(&spec), "Regenerated with your preferences");
    }

    #[test]
    fn test_added_and_removed_phrasing() {
        assert_eq!(count_phrase(1, "chart").unwrap(), "Added 1 chart");
        assert_eq!(count_phrase(3, "chart").unwrap(), "Added 3 charts");
        assert_eq!(count_phrase(-2, "filter").unwrap(), "Removed 2 filters");
        assert!(count_phrase(0, "chart").is_none());
    }

    #[test]
    fn test_theme_change_summary() {
        let old = base_spec();
        let mut new = base_spec();
        new.theme = ThemeRef {
            id: "ocean".to_string(),
            name: "Ocean".to_string(),
            colors: Vec::new(),
            font_family: String::new(),
            border_radius: String::new(),
        };
        let delta = SpecDelta::between(&old, &new);
        assert!(delta.theme_changed);
        assert_eq!(delta.summary(&new), "Changed theme to \"Ocean\"");
    }

    #[test]
    fn test_combined_summary_joins_facets() {
        let old = base_spec();
        let mut new = base_spec();
        new.filters.push(Filter {
            field: "region".to_string(),
            operator: "eq".to_string(),
            value: serde_json::json!("EMEA"),
        });
        new.theme = ThemeRef {
            id: "ocean".to_string(),
            name: "Ocean".to_string(),
            colors: Vec::new(),
            font_family: String::new(),
            border_radius: String::new(),
        };
        let delta = SpecDelta::between(&old, &new);
        assert_eq!(
            delta.summary(&new),
            "Added 1 filter. Changed theme to \"Ocean\""
        );
    }
}
