// Chart placeholder synthesis - deterministic chart sets per layout pattern
use crate::domain::chart::{ChartPlaceholder, ChartType};
use crate::domain::selection::DataSelection;
use crate::domain::templates::{LayoutKind, LayoutTemplate};
use std::collections::HashMap;

/// Fixed definition of one synthesized chart before the relation name is
/// resolved into its query template.
struct ChartSeed {
    chart_type: ChartType,
    title: &'static str,
    query: &'static str,
    x_field: &'static str,
    y_field: &'static str,
}

const KPI_COUNT: ChartSeed = ChartSeed {
    chart_type: ChartType::Kpi,
    title: "Record Count",
    query: "SELECT COUNT(*) AS value FROM ${table}",
    x_field: "",
    y_field: "value",
};

const KPI_SUM: ChartSeed = ChartSeed {
    chart_type: ChartType::Kpi,
    title: "Total Value",
    query: "SELECT SUM(value) AS value FROM ${table}",
    x_field: "",
    y_field: "value",
};

const KPI_AVG: ChartSeed = ChartSeed {
    chart_type: ChartType::Kpi,
    title: "Average Value",
    query: "SELECT AVG(value) AS value FROM ${table}",
    x_field: "",
    y_field: "value",
};

const KPI_MAX: ChartSeed = ChartSeed {
    chart_type: ChartType::Kpi,
    title: "Peak Value",
    query: "SELECT MAX(value) AS value FROM ${table}",
    x_field: "",
    y_field: "value",
};

const LINE_OVER_TIME: ChartSeed = ChartSeed {
    chart_type: ChartType::Line,
    title: "Records Over Time",
    query: "SELECT created_at AS bucket, COUNT(*) AS count FROM ${table} \
            GROUP BY bucket ORDER BY bucket DESC LIMIT 30",
    x_field: "bucket",
    y_field: "count",
};

const BAR_CATEGORIES: ChartSeed = ChartSeed {
    chart_type: ChartType::Bar,
    title: "Top Categories",
    query: "SELECT category, COUNT(*) AS count FROM ${table} \
            GROUP BY category ORDER BY count DESC LIMIT 10",
    x_field: "category",
    y_field: "count",
};

const TABLE_PREVIEW: ChartSeed = ChartSeed {
    chart_type: ChartType::Table,
    title: "Data Preview",
    query: "SELECT * FROM ${table} LIMIT 100",
    x_field: "",
    y_field: "",
};

/// Fallback when no layout template was chosen or its kind is unrecognized.
/// Must never be empty.
const DEFAULT_SET: &[ChartSeed] = &[
    KPI_COUNT,
    KPI_SUM,
    KPI_AVG,
    LINE_OVER_TIME,
    BAR_CATEGORIES,
    TABLE_PREVIEW,
];

const KPI_FOCUSED_SET: &[ChartSeed] = &[
    KPI_COUNT,
    KPI_SUM,
    KPI_AVG,
    KPI_MAX,
    ChartSeed {
        chart_type: ChartType::Line,
        title: "Trend Over Time",
        query: "SELECT created_at AS bucket, COUNT(*) AS count FROM ${table} \
                GROUP BY bucket ORDER BY bucket DESC LIMIT 30",
        x_field: "bucket",
        y_field: "count",
    },
    ChartSeed {
        chart_type: ChartType::Bar,
        title: "Category Breakdown",
        query: "SELECT category, COUNT(*) AS count FROM ${table} \
                GROUP BY category ORDER BY count DESC LIMIT 10",
        x_field: "category",
        y_field: "count",
    },
];

const COMPARISON_SET: &[ChartSeed] = &[
    KPI_COUNT,
    KPI_AVG,
    ChartSeed {
        chart_type: ChartType::Bar,
        title: "Category Comparison",
        query: "SELECT category, COUNT(*) AS count FROM ${table} \
                GROUP BY category ORDER BY count DESC LIMIT 10",
        x_field: "category",
        y_field: "count",
    },
    ChartSeed {
        chart_type: ChartType::Pie,
        title: "Category Share",
        query: "SELECT category, COUNT(*) AS count FROM ${table} \
                GROUP BY category ORDER BY count DESC LIMIT 10",
        x_field: "category",
        y_field: "count",
    },
    ChartSeed {
        chart_type: ChartType::Bar,
        title: "Status Comparison",
        query: "SELECT status, COUNT(*) AS count FROM ${table} \
                GROUP BY status ORDER BY count DESC LIMIT 10",
        x_field: "status",
        y_field: "count",
    },
    ChartSeed {
        chart_type: ChartType::Pie,
        title: "Status Share",
        query: "SELECT status, COUNT(*) AS count FROM ${table} \
                GROUP BY status ORDER BY count DESC LIMIT 10",
        x_field: "status",
        y_field: "count",
    },
];

const TREND_SET: &[ChartSeed] = &[
    KPI_COUNT,
    KPI_AVG,
    ChartSeed {
        chart_type: ChartType::Area,
        title: "Main Trend",
        query: "SELECT created_at AS bucket, COUNT(*) AS count FROM ${table} \
                GROUP BY bucket ORDER BY bucket DESC LIMIT 30",
        x_field: "bucket",
        y_field: "count",
    },
    ChartSeed {
        chart_type: ChartType::Line,
        title: "Supporting Trend",
        query: "SELECT created_at AS bucket, AVG(value) AS value FROM ${table} \
                GROUP BY bucket ORDER BY bucket DESC LIMIT 30",
        x_field: "bucket",
        y_field: "value",
    },
    ChartSeed {
        chart_type: ChartType::Bar,
        title: "Supporting Breakdown",
        query: "SELECT category, COUNT(*) AS count FROM ${table} \
                GROUP BY category ORDER BY count DESC LIMIT 10",
        x_field: "category",
        y_field: "count",
    },
];

/// Produce the ordered chart placeholders for a data selection and an
/// optional layout template. Same inputs always yield the same output.
pub fn synthesize(
    selection: &DataSelection,
    layout: Option<&LayoutTemplate>,
) -> Vec<ChartPlaceholder> {
    let seeds = match layout.map(|l| l.layout_type) {
        Some(LayoutKind::KpiFocused) => KPI_FOCUSED_SET,
        Some(LayoutKind::Comparison) => COMPARISON_SET,
        Some(LayoutKind::Trend) => TREND_SET,
        Some(LayoutKind::Other) | None => DEFAULT_SET,
    };

    let mut vars = HashMap::new();
    vars.insert("table".to_string(), selection.relation().to_string());

    seeds
        .iter()
        .enumerate()
        .map(|(index, seed)| {
            ChartPlaceholder::new(
                format!("chart-{}", index + 1),
                seed.chart_type,
                seed.title.to_string(),
                render_query(seed.query, &vars),
                seed.x_field.to_string(),
                seed.y_field.to_string(),
            )
        })
        .collect()
}

/// Replace template variables in a query string.
pub fn render_query(query: &str, vars: &HashMap<String, String>) -> String {
    let mut result = query.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}
