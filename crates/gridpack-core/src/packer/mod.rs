use crate::model::Placement;

pub mod candidate;
pub mod grid_packer;

pub use grid_packer::GridPacker;

/// An online packer places rectangles into a fixed canvas one at a time.
///
/// Implementations must ensure no overlaps and never move a committed placement.
/// `try_pack` returns `None` if the rectangle cannot be placed; the packer is
/// left unchanged in that case.
pub trait Packer {
    fn can_pack(&self, width: u32, height: u32) -> bool;
    fn try_pack(&mut self, width: u32, height: u32) -> Option<Placement>;
    fn occupancy(&self) -> f64;
}
