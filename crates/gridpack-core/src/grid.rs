//! Row-major table of free/filled cells covering the canvas.
//!
//! Cells carry only their size and fill state; positions are derived from the
//! widths of preceding columns and heights of preceding rows. Every column
//! shares one width and every row shares one height, so the grid is always a
//! true (non-uniform) table. The only way to add rows or columns is
//! [`Grid::segment`], which cuts through the whole table.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::model::{CellView, GridSnapshot};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cell {
    pub width: u32,
    pub height: u32,
    pub filled: bool,
}

/// Outcome of testing a `w x h` piece against a cell.
///
/// `dead_width`/`dead_height` are the leftover margins; negative when the
/// piece overhangs the cell on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitTest {
    pub dead_width: i64,
    pub dead_height: i64,
    pub fits: bool,
}

impl Cell {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            filled: false,
        }
    }

    pub fn area(&self) -> u64 {
        (self.width as u64) * (self.height as u64)
    }

    pub fn fits(&self, width: u32, height: u32) -> FitTest {
        let dead_width = self.width as i64 - width as i64;
        let dead_height = self.height as i64 - height as i64;
        FitTest {
            dead_width,
            dead_height,
            fits: dead_width >= 0 && dead_height >= 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Grid {
    width: u32,
    height: u32,
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// A grid holding one free cell spanning `width x height`.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rows: 1,
            columns: 1,
            cells: vec![Cell::new(width, height)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn columns(&self) -> usize {
        self.columns
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn index(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }

    /// `(row, column)` of a row-major index.
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.columns, index % self.columns)
    }

    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        &self.cells[self.index(row, column)]
    }

    pub fn cell_at(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    pub fn column_width(&self, column: usize) -> u32 {
        self.cells[column].width
    }

    pub fn row_height(&self, row: usize) -> u32 {
        self.cells[row * self.columns].height
    }

    /// Canvas origin of the cell at `(row, column)`.
    pub fn origin(&self, row: usize, column: usize) -> (u32, u32) {
        let x = (0..column).map(|c| self.column_width(c)).sum();
        let y = (0..row).map(|r| self.row_height(r)).sum();
        (x, y)
    }

    pub fn filled_area(&self) -> u64 {
        self.cells
            .iter()
            .filter(|c| c.filled)
            .map(Cell::area)
            .sum()
    }

    /// Fraction of the canvas covered by filled cells, in `[0, 1]`.
    pub fn occupancy(&self) -> f64 {
        let canvas = (self.width as u64) * (self.height as u64);
        if canvas == 0 {
            return 0.0;
        }
        self.filled_area() as f64 / canvas as f64
    }

    /// Cells in row-major order with their canvas positions.
    pub fn cells(&self) -> impl Iterator<Item = CellView> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .scan((0u32, 0u32), move |cursor, (i, cell)| {
                let view = CellView {
                    row: i / columns,
                    column: i % columns,
                    x: cursor.0,
                    y: cursor.1,
                    width: cell.width,
                    height: cell.height,
                    filled: cell.filled,
                };
                cursor.0 += cell.width;
                if view.column + 1 == columns {
                    cursor.0 = 0;
                    cursor.1 += cell.height;
                }
                Some(view)
            })
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            width: self.width,
            height: self.height,
            rows: self.rows,
            columns: self.columns,
            cells: self.cells().collect(),
        }
    }

    /// Checks the table invariant: `rows * columns` cells, uniform column
    /// widths and row heights, and rows/columns summing to the canvas size.
    pub fn is_consistent(&self) -> bool {
        if self.rows == 0 || self.columns == 0 || self.cells.len() != self.rows * self.columns {
            return false;
        }
        for row in 0..self.rows {
            let h = self.row_height(row);
            let mut sum = 0u64;
            for column in 0..self.columns {
                let cell = self.cell(row, column);
                if cell.height != h || cell.width != self.column_width(column) {
                    return false;
                }
                sum += cell.width as u64;
            }
            if sum != self.width as u64 {
                return false;
            }
        }
        let heights: u64 = (0..self.rows).map(|r| self.row_height(r) as u64).sum();
        heights == self.height as u64
    }

    /// Splits the cell at `(row, column)` so that its top-left part shrinks by
    /// `after_width` x `after_height`.
    ///
    /// A non-zero `after_width` inserts a column right of `column` through
    /// every row; a non-zero `after_height` then inserts a row below `row`
    /// through every column. New cells inherit the fill state of the cell they
    /// were cut from. The target keeps its `(row, column)` coordinates.
    ///
    /// # Panics
    /// If the target cell is empty, or a leftover is not strictly smaller than
    /// the target on its axis. Either means a placement was committed that
    /// never passed the fit test.
    pub fn segment(&mut self, row: usize, column: usize, after_width: u32, after_height: u32) {
        let cell = *self.cell(row, column);
        assert!(
            cell.width >= 1 && cell.height >= 1,
            "segment on empty cell {}x{} at ({row}, {column})",
            cell.width,
            cell.height
        );
        assert!(
            after_width < cell.width && after_height < cell.height,
            "leftover {after_width}x{after_height} does not fit inside cell {}x{} at ({row}, {column})",
            cell.width,
            cell.height
        );

        if after_width > 0 {
            self.split_column(column, after_width);
        }
        if after_height > 0 {
            self.split_row(row, after_height);
        }
        debug_assert!(self.is_consistent(), "grid invariant broken by segment");
    }

    fn split_column(&mut self, column: usize, right_width: u32) {
        let columns = self.columns;
        let mut cells = Vec::with_capacity(self.cells.len() + self.rows);
        for (i, mut cell) in self.cells.drain(..).enumerate() {
            if i % columns == column {
                cell.width -= right_width;
                cells.push(cell);
                cells.push(Cell {
                    width: right_width,
                    ..cell
                });
            } else {
                cells.push(cell);
            }
        }
        self.cells = cells;
        self.columns += 1;
        trace!(column, right_width, columns = self.columns, "inserted column");
    }

    fn split_row(&mut self, row: usize, bottom_height: u32) {
        let start = row * self.columns;
        let end = start + self.columns;
        let below: Vec<Cell> = self.cells[start..end]
            .iter_mut()
            .map(|above| {
                above.height -= bottom_height;
                Cell {
                    height: bottom_height,
                    ..*above
                }
            })
            .collect();
        self.cells.splice(end..end, below);
        self.rows += 1;
        trace!(row, bottom_height, rows = self.rows, "inserted row");
    }

    /// Marks every cell of the inclusive block as filled.
    pub fn fill_block(&mut self, rows: RangeInclusive<usize>, columns: RangeInclusive<usize>) {
        for row in rows {
            for column in columns.clone() {
                let i = self.index(row, column);
                self.cells[i].filled = true;
            }
        }
    }
}
