use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (canvas units). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Inclusive right edge coordinate (`x + w - 1`).
    pub fn right(&self) -> u32 {
        self.x + self.w.saturating_sub(1)
    }
    /// Inclusive bottom edge coordinate (`y + h - 1`).
    pub fn bottom(&self) -> u32 {
        self.y + self.h.saturating_sub(1)
    }
    /// Returns true if `r` is fully inside `self` (inclusive edges).
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.right() <= self.right() && r.bottom() <= self.bottom()
    }
    /// Returns true if the two rectangles share any area. Touching edges do not count.
    pub fn intersects(&self, r: &Rect) -> bool {
        !(self.x >= r.x + r.w || r.x >= self.x + self.w || self.y >= r.y + r.h || r.y >= self.y + self.h)
    }
    pub fn area(&self) -> u64 {
        (self.w as u64) * (self.h as u64)
    }
}

/// Result of a `pack` call in offset form.
///
/// A failed request is reported as [`Transform::NONE`], i.e. `(-1, -1, false)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transform {
    pub x_offset: i32,
    pub y_offset: i32,
    /// True if the request was placed rotated by 90°.
    pub rotated: bool,
}

impl Transform {
    /// Sentinel returned when no placement exists in either orientation.
    pub const NONE: Transform = Transform {
        x_offset: -1,
        y_offset: -1,
        rotated: false,
    };

    pub fn is_none(&self) -> bool {
        self.x_offset < 0 || self.y_offset < 0
    }

    pub fn is_placed(&self) -> bool {
        !self.is_none()
    }
}

impl From<Placement> for Transform {
    fn from(p: Placement) -> Self {
        Self {
            x_offset: p.frame.x as i32,
            y_offset: p.frame.y as i32,
            rotated: p.rotated,
        }
    }
}

impl From<Option<Placement>> for Transform {
    fn from(p: Option<Placement>) -> Self {
        p.map(Transform::from).unwrap_or(Transform::NONE)
    }
}

/// A committed placement on the canvas.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement {
    /// Occupied region (post-rotation width/height).
    pub frame: Rect,
    /// True if the request was rotated 90° to fit.
    pub rotated: bool,
}

/// Read-only view of one grid cell with its derived canvas position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CellView {
    pub row: usize,
    pub column: usize,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub filled: bool,
}

impl CellView {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Serializable dump of the grid decomposition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridSnapshot {
    pub width: u32,
    pub height: u32,
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<CellView>,
}

impl GridSnapshot {
    /// Pretty-printed JSON document of the snapshot.
    pub fn to_json_string(&self) -> crate::error::Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| crate::error::GridPackError::Encode(e.to_string()))
    }
}

/// Statistics about a packer's current state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PackStats {
    /// Canvas area (`max_width * max_height`).
    pub canvas_area: u64,
    /// Sum of filled cell areas.
    pub used_area: u64,
    /// used_area / canvas_area (0.0 to 1.0).
    pub occupancy: f64,
    pub rows: usize,
    pub columns: usize,
    /// Total number of grid cells (`rows * columns`).
    pub cells: usize,
    pub filled_cells: usize,
    /// Number of successful placements.
    pub placements: usize,
    /// Number of placements that were rotated.
    pub rotated: usize,
}

impl PackStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Placements: {}, Occupancy: {:.2}%, Used Area: {} / {}, Grid: {}x{} ({} cells, {} filled), Rotated: {}",
            self.placements,
            self.occupancy * 100.0,
            self.used_area,
            self.canvas_area,
            self.columns,
            self.rows,
            self.cells,
            self.filled_cells,
            self.rotated,
        )
    }

    /// Returns free canvas area.
    pub fn wasted_area(&self) -> u64 {
        self.canvas_area.saturating_sub(self.used_area)
    }
}
