// Grid layout packing - assigns non-overlapping 12-column grid cells
use crate::domain::chart::{ChartPlaceholder, ChartType};
use crate::domain::grid::GridCell;

const KPIS_PER_ROW: u32 = 4;
const OTHERS_PER_ROW: u32 = 2;
// Full-width tables sit in a band below the non-table content of every
// synthesized chart set.
const TABLE_BAND_Y: u32 = 10;
const OTHER_BAND_Y: u32 = 4;

/// Assign one grid cell per chart, preserving input order. Placement runs on
/// three explicit per-class counters, incremented as each chart is
/// classified; KPI cards pack four to a row, tables take a full-width row
/// each, everything else packs two to a row.
pub fn pack(charts: &[ChartPlaceholder]) -> Vec<GridCell> {
    let mut kpi_index: u32 = 0;
    let mut table_index: u32 = 0;
    let mut other_index: u32 = 0;

    charts
        .iter()
        .map(|chart| match chart.chart_type {
            ChartType::Kpi => {
                let index = kpi_index;
                kpi_index += 1;
                GridCell {
                    chart_id: chart.id.clone(),
                    x: (index % KPIS_PER_ROW) * 3,
                    y: (index / KPIS_PER_ROW) * 2,
                    w: 3,
                    h: 2,
                    min_w: 2,
                    min_h: 2,
                }
            }
            ChartType::Table => {
                let index = table_index;
                table_index += 1;
                GridCell {
                    chart_id: chart.id.clone(),
                    x: 0,
                    y: TABLE_BAND_Y + index * 6,
                    w: 12,
                    h: 6,
                    min_w: 6,
                    min_h: 4,
                }
            }
            _ => {
                let index = other_index;
                other_index += 1;
                GridCell {
                    chart_id: chart.id.clone(),
                    x: (index % OTHERS_PER_ROW) * 6,
                    y: OTHER_BAND_Y + (index / OTHERS_PER_ROW) * 4,
                    w: 6,
                    h: 4,
                    min_w: 4,
                    min_h: 3,
                }
            }
        })
        .collect()
}
