//! Visual dumps of a grid: text for terminals, RGBA for images.

use crate::grid::Grid;

/// Glyphs used by [`to_ascii`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsciiStyle {
    pub filled: char,
    /// Free cells alternate between these in a checkerboard so neighbouring
    /// cells stay distinguishable.
    pub free: [char; 2],
}

impl Default for AsciiStyle {
    fn default() -> Self {
        Self {
            filled: '#',
            free: ['.', ':'],
        }
    }
}

/// Renders the canvas one character per unit, one line per row of units.
pub fn to_ascii(grid: &Grid, style: &AsciiStyle) -> String {
    let (w, h) = (grid.width() as usize, grid.height() as usize);
    let mut canvas = vec![vec![' '; w]; h];
    for cell in grid.cells() {
        let glyph = if cell.filled {
            style.filled
        } else {
            style.free[(cell.row + cell.column) % 2]
        };
        for line in &mut canvas[cell.y as usize..(cell.y + cell.height) as usize] {
            line[cell.x as usize..(cell.x + cell.width) as usize].fill(glyph);
        }
    }

    let mut out = String::with_capacity((w + 1) * h);
    for line in canvas {
        out.extend(line);
        out.push('\n');
    }
    out
}

#[cfg(feature = "image")]
pub use rgba::to_rgba;

#[cfg(feature = "image")]
mod rgba {
    use image::{Rgba, RgbaImage};

    use crate::grid::Grid;

    const FILLED: Rgba<u8> = Rgba([46, 92, 184, 255]);
    const FREE: [Rgba<u8>; 2] = [Rgba([224, 224, 224, 255]), Rgba([200, 200, 200, 255])];
    const EDGE: Rgba<u8> = Rgba([20, 20, 20, 255]);

    /// Renders the grid at `scale` pixels per canvas unit, outlining filled cells.
    ///
    /// Returns `None` when the scaled canvas does not fit in `u32` pixels.
    pub fn to_rgba(grid: &Grid, scale: u32) -> Option<RgbaImage> {
        let scale = scale.max(1);
        let width = grid.width().checked_mul(scale)?;
        let height = grid.height().checked_mul(scale)?;
        let mut img = RgbaImage::new(width, height);
        for cell in grid.cells() {
            let color = if cell.filled {
                FILLED
            } else {
                FREE[(cell.row + cell.column) % 2]
            };
            let (x0, y0) = (cell.x * scale, cell.y * scale);
            let (x1, y1) = (x0 + cell.width * scale, y0 + cell.height * scale);
            for y in y0..y1 {
                for x in x0..x1 {
                    let edge = x == x0 || y == y0 || x + 1 == x1 || y + 1 == y1;
                    let px = if cell.filled && edge && scale > 1 {
                        EDGE
                    } else {
                        color
                    };
                    img.put_pixel(x, y, px);
                }
            }
        }
        Some(img)
    }
}
