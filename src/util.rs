//! Common utility functions.

use crate::geometry::Coord;
use std::ops::Range;

/// Sub-pixel columns per cell.
pub const CELL_WIDTH: Coord = 2;
/// Sub-pixel rows per cell.
pub const CELL_HEIGHT: Coord = 4;

/// Returns the range of cells of size `cell` that overlap the half-open sub-pixel
/// interval `[start, end)`, clamped to `0..cells`.
pub fn cell_span(start: Coord, end: Coord, cell: Coord, cells: usize) -> Range<usize> {
    let cells = cells as Coord;
    let first = start.div_euclid(cell).clamp(0, cells);
    let last = (end + cell - 1).div_euclid(cell).clamp(first, cells);
    first as usize..last as usize
}
