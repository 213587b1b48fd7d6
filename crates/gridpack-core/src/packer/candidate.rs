//! Candidate placements and their exposed-surface scores.
//!
//! A candidate anchors a `w x h` piece at the origin of a free cell, either
//! inside that cell alone or across a block of adjacent free cells found by
//! [`combine_scan`]. Lower scores leave less newly exposed free border.

use crate::grid::Grid;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How a candidate occupies the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Fits inside the anchor cell.
    Direct,
    /// Spans a block of cells from the anchor to the bottom-right cell `last`.
    Combined { last: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Row-major index of the anchor (top-left) cell.
    pub index: usize,
    /// Exposed surface area; lower is better.
    pub score: u64,
    pub rotated: bool,
    /// Occupied width (post-rotation).
    pub width: u32,
    /// Occupied height (post-rotation).
    pub height: u32,
    pub fit: Fit,
}

impl Candidate {
    /// Total order used for selection: score, then scan order, then unrotated first.
    pub fn rank(&self) -> (u64, usize, bool) {
        (self.score, self.index, self.rotated)
    }
}

/// Which edges of a piece are counted by [`exposed_surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sides {
    pub left: bool,
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
}

impl Sides {
    pub const ALL: Sides = Sides {
        left: true,
        top: true,
        right: true,
        bottom: true,
    };
}

/// Exposed surface of a `w x h` piece anchored at the origin of cell `index`.
///
/// Left/top edges count when the neighbour on that side exists and is free.
/// Right/bottom edges always count when the piece leaves part of the cell
/// uncovered on that axis; when it uses the full extent they count only if the
/// neighbour on that side exists and is free. Canvas borders never count.
pub fn exposed_surface(grid: &Grid, index: usize, w: u32, h: u32, sides: Sides) -> u64 {
    let (row, column) = grid.position(index);
    let cell = grid.cell_at(index);
    let free = |r: usize, c: usize| !grid.cell(r, c).filled;
    let (w64, h64) = (w as u64, h as u64);

    let mut exposed = 0;
    if sides.left && column > 0 && free(row, column - 1) {
        exposed += h64;
    }
    if sides.top && row > 0 && free(row - 1, column) {
        exposed += w64;
    }
    if sides.right && (w < cell.width || (column + 1 < grid.columns() && free(row, column + 1))) {
        exposed += h64;
    }
    if sides.bottom && (h < cell.height || (row + 1 < grid.rows() && free(row + 1, column))) {
        exposed += w64;
    }
    exposed
}

/// Looks for a block of free cells, anchored at `start`, large enough to hold
/// `width x height`.
///
/// Walks right from the anchor until the row span reaches `width`, then
/// repeats on following rows from the same column until the accumulated row
/// heights reach `height`. Fails on any filled cell, at the right edge of the
/// grid, or below the last row. On success returns the index of the block's
/// bottom-right cell and the summed exposed surface of the covered parts,
/// counting only the edges on the block's outline.
pub fn combine_scan(grid: &Grid, start: usize, width: u32, height: u32) -> Option<(usize, u64)> {
    let (row0, column0) = grid.position(start);
    let mut exposed = 0;
    let mut block_height = 0u32;
    let mut row = row0;

    loop {
        if row >= grid.rows() {
            return None;
        }
        let mut block_width = 0u32;
        let mut column = column0;
        loop {
            if column >= grid.columns() {
                return None;
            }
            let cell = grid.cell(row, column);
            if cell.filled {
                return None;
            }
            let used_w = cell.width.min(width - block_width);
            let used_h = cell.height.min(height - block_height);
            let sides = Sides {
                left: column == column0,
                top: row == row0,
                right: block_width + cell.width >= width,
                bottom: block_height + cell.height >= height,
            };
            exposed += exposed_surface(grid, grid.index(row, column), used_w, used_h, sides);

            block_width += cell.width;
            if block_width >= width {
                break;
            }
            column += 1;
        }

        block_height += grid.row_height(row);
        if block_height >= height {
            return Some((grid.index(row, column), exposed));
        }
        row += 1;
    }
}

/// The orientations to try for a request: as given, then rotated unless
/// rotation is disabled or the request is square.
pub fn orientations(width: u32, height: u32, allow_rotation: bool) -> Vec<(u32, u32, bool)> {
    let mut out = vec![(width, height, false)];
    if allow_rotation && width != height {
        out.push((height, width, true));
    }
    out
}

/// Candidates anchored at the free cell `index`, at most one per orientation.
pub fn evaluate_cell(grid: &Grid, index: usize, orientations: &[(u32, u32, bool)]) -> Vec<Candidate> {
    let cell = grid.cell_at(index);
    if cell.filled {
        return Vec::new();
    }
    orientations
        .iter()
        .filter_map(|&(w, h, rotated)| {
            if cell.fits(w, h).fits {
                Some(Candidate {
                    index,
                    score: exposed_surface(grid, index, w, h, Sides::ALL),
                    rotated,
                    width: w,
                    height: h,
                    fit: Fit::Direct,
                })
            } else {
                combine_scan(grid, index, w, h).map(|(last, score)| Candidate {
                    index,
                    score,
                    rotated,
                    width: w,
                    height: h,
                    fit: Fit::Combined { last },
                })
            }
        })
        .collect()
}

/// Every feasible candidate on the grid, in scan order.
pub fn evaluate(grid: &Grid, width: u32, height: u32, allow_rotation: bool) -> Vec<Candidate> {
    let orients = orientations(width, height, allow_rotation);
    (0..grid.len())
        .flat_map(|i| evaluate_cell(grid, i, &orients))
        .collect()
}

/// The lowest-ranked candidate, if any.
pub fn best(grid: &Grid, width: u32, height: u32, allow_rotation: bool, parallel: bool) -> Option<Candidate> {
    let orients = orientations(width, height, allow_rotation);

    #[cfg(feature = "parallel")]
    {
        if parallel {
            return (0..grid.len())
                .into_par_iter()
                .flat_map_iter(|i| evaluate_cell(grid, i, &orients))
                .min_by_key(Candidate::rank);
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    (0..grid.len())
        .flat_map(|i| evaluate_cell(grid, i, &orients))
        .min_by_key(Candidate::rank)
}
