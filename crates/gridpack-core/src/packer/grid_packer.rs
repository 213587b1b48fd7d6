use tracing::{debug, instrument, trace, warn};

use super::Packer;
use super::candidate::{self, Candidate, Fit};
use crate::config::PackerConfig;
use crate::error::Result;
use crate::grid::Grid;
use crate::model::{CellView, GridSnapshot, PackStats, Placement, Rect, Transform};

/// Online allocator over a fixed canvas.
///
/// Each request is placed immediately at the candidate with the smallest
/// exposed surface, or rejected. Placed rectangles are never moved or freed.
/// Not internally synchronized: `pack` takes `&mut self`.
#[derive(Debug, Clone)]
pub struct GridPacker {
    config: PackerConfig,
    grid: Grid,
    placements: Vec<Placement>,
}

impl GridPacker {
    pub fn new(config: PackerConfig) -> Result<Self> {
        config.validate()?;
        let grid = Grid::new(config.max_width, config.max_height);
        Ok(Self {
            config,
            grid,
            placements: Vec::new(),
        })
    }

    /// Packer with default settings over a `max_width x max_height` canvas.
    pub fn with_size(max_width: u32, max_height: u32) -> Result<Self> {
        Self::new(
            PackerConfig::builder()
                .with_max_dimensions(max_width, max_height)
                .build(),
        )
    }

    pub fn config(&self) -> &PackerConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Placements in the order they were committed.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn cells(&self) -> impl Iterator<Item = CellView> + '_ {
        self.grid.cells()
    }

    pub fn occupancy(&self) -> f64 {
        self.grid.occupancy()
    }

    pub fn snapshot(&self) -> GridSnapshot {
        self.grid.snapshot()
    }

    pub fn stats(&self) -> PackStats {
        let used_area = self.grid.filled_area();
        let canvas_area = (self.config.max_width as u64) * (self.config.max_height as u64);
        PackStats {
            canvas_area,
            used_area,
            occupancy: self.grid.occupancy(),
            rows: self.grid.rows(),
            columns: self.grid.columns(),
            cells: self.grid.len(),
            filled_cells: self.grid.cells().filter(|c| c.filled).count(),
            placements: self.placements.len(),
            rotated: self.placements.iter().filter(|p| p.rotated).count(),
        }
    }

    /// True if `width x height` (or its rotation, when allowed) would be placed.
    pub fn can_pack(&self, width: u32, height: u32) -> bool {
        width > 0 && height > 0 && self.choose(width, height).is_some()
    }

    /// Places `width x height` and returns its offset, or [`Transform::NONE`].
    pub fn pack(&mut self, width: u32, height: u32) -> Transform {
        self.try_pack(width, height).into()
    }

    /// Places `width x height`, returning the occupied region, or `None` when
    /// no free region holds it in any allowed orientation. A failed request
    /// leaves the packer unchanged.
    #[instrument(skip(self))]
    pub fn try_pack(&mut self, width: u32, height: u32) -> Option<Placement> {
        if width == 0 || height == 0 {
            warn!("zero-sized request rejected");
            return None;
        }
        let Some(best) = self.choose(width, height) else {
            debug!(occupancy = self.grid.occupancy(), "no placement");
            return None;
        };
        trace!(?best, "selected candidate");

        let (x, y) = match best.fit {
            Fit::Direct => self.commit_single(&best),
            Fit::Combined { last } => self.commit_combined(&best, last),
        };
        let placement = Placement {
            frame: Rect::new(x, y, best.width, best.height),
            rotated: best.rotated,
        };
        self.placements.push(placement);
        debug!(
            x,
            y,
            rotated = best.rotated,
            rows = self.grid.rows(),
            columns = self.grid.columns(),
            "placed"
        );
        Some(placement)
    }

    fn choose(&self, width: u32, height: u32) -> Option<Candidate> {
        candidate::best(
            &self.grid,
            width,
            height,
            self.config.allow_rotation,
            self.config.parallel,
        )
    }

    fn commit_single(&mut self, best: &Candidate) -> (u32, u32) {
        let (row, column) = self.grid.position(best.index);
        let cell = *self.grid.cell(row, column);
        self.grid
            .segment(row, column, cell.width - best.width, cell.height - best.height);
        self.grid.fill_block(row..=row, column..=column);
        self.grid.origin(row, column)
    }

    /// Trims the block's bottom-right cell so the block matches the piece
    /// exactly, then fills the whole block.
    fn commit_combined(&mut self, best: &Candidate, last: usize) -> (u32, u32) {
        let (row0, column0) = self.grid.position(best.index);
        let (row1, column1) = self.grid.position(last);
        let block_width: u32 = (column0..=column1).map(|c| self.grid.column_width(c)).sum();
        let block_height: u32 = (row0..=row1).map(|r| self.grid.row_height(r)).sum();
        self.grid.segment(
            row1,
            column1,
            block_width - best.width,
            block_height - best.height,
        );
        self.grid.fill_block(row0..=row1, column0..=column1);
        self.grid.origin(row0, column0)
    }
}

impl Packer for GridPacker {
    fn can_pack(&self, width: u32, height: u32) -> bool {
        GridPacker::can_pack(self, width, height)
    }

    fn try_pack(&mut self, width: u32, height: u32) -> Option<Placement> {
        GridPacker::try_pack(self, width, height)
    }

    fn occupancy(&self) -> f64 {
        GridPacker::occupancy(self)
    }
}
