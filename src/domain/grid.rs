// Grid cell domain model - 12-column layout units
use serde::{Deserialize, Serialize};

pub const GRID_COLUMNS: u32 = 12;

/// A rectangular region of the layout grid assigned to one chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub chart_id: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub min_w: u32,
    pub min_h: u32,
}

impl GridCell {
    /// True when the two rectangles share any area.
    pub fn overlaps(&self, other: &GridCell) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    /// Cell fits inside the 12-column grid.
    pub fn fits_grid(&self) -> bool {
        self.x + self.w <= GRID_COLUMNS
    }
}
