//! Online rectangle allocator over a fixed canvas.
//!
//! - Requests arrive one at a time and are placed immediately (optionally rotated 90°) or rejected
//! - Free/occupied space is a growing row-major grid of non-uniform cells
//! - Placements are chosen by smallest exposed free border; multi-cell fits merge adjacent free cells
//! - Placed rectangles are never moved or freed
//!
//! Quick example:
//! ```
//! use gridpack_core::prelude::*;
//! # fn main() -> gridpack_core::Result<()> {
//! let mut packer = GridPacker::with_size(10, 10)?;
//! let t = packer.pack(4, 4);
//! assert_eq!((t.x_offset, t.y_offset, t.rotated), (0, 0, false));
//! assert!(packer.pack(11, 1).is_none());
//! println!("occupancy: {:.2}", packer.occupancy());
//! # Ok(()) }
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod model;
pub mod packer;
pub mod render;

pub use config::*;
pub use error::*;
pub use grid::{Cell, FitTest, Grid};
pub use model::*;
pub use packer::*;

/// Convenience prelude for common types and functions.
/// Importing `gridpack_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{PackerConfig, PackerConfigBuilder};
    pub use crate::error::GridPackError;
    pub use crate::grid::Grid;
    pub use crate::model::{CellView, GridSnapshot, PackStats, Placement, Rect, Transform};
    pub use crate::packer::{GridPacker, Packer};
    pub use crate::render::{AsciiStyle, to_ascii};
}
