//! 2D cell buffer for braille rendering.
//!
//! This module defines the [`PixelGrid`] struct, a dense row-major grid of [`PixelBlock`]s
//! that holds one layer of a canvas.
//!
//! It provides methods for:
//!
//! *   Creating, clearing and resizing the grid while keeping existing content in place.
//! *   Accessing and modifying individual cells.
//! *   Compositing a whole grid onto another one with a [`TerminalOp`].

use crate::geometry::Size;
use crate::rendering::block::{PixelBlock, TerminalOp};
use std::ops::{Index, IndexMut};

/// A grid of `width x height` cells, i.e. `2*width x 4*height` sub-pixels.
///
/// # Example
///
/// ```rust
/// use tplot::geometry::Size;
/// use tplot::rendering::block::PixelBlock;
/// use tplot::rendering::color::palette;
/// use tplot::rendering::grid::PixelGrid;
///
/// let mut grid = PixelGrid::new(Size::new(10, 5));
/// grid[(2, 3)] = PixelBlock::with_mask(palette::RED, 0x01);
///
/// assert_eq!(grid.width(), 10);
/// assert_eq!(grid.height(), 5);
/// assert_eq!(grid[(2, 3)].mask, 0x01);
/// assert!(grid[(0, 0)].is_empty());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    blocks: Vec<PixelBlock>,
}

impl PixelGrid {
    /// Creates an empty grid of `size.x` columns and `size.y` rows.
    /// Negative dimensions are treated as zero.
    pub fn new(size: Size) -> Self {
        let width = size.x.max(0) as usize;
        let height = size.y.max(0) as usize;
        Self {
            width,
            height,
            blocks: vec![PixelBlock::EMPTY; width * height],
        }
    }

    /// Gets the width of the grid (number of columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Gets the height of the grid (number of rows).
    pub fn height(&self) -> usize {
        self.height
    }

    /// The grid dimensions in cells.
    pub fn size(&self) -> Size {
        Size::new(self.width as i64, self.height as i64)
    }

    /// Resets every cell to [`PixelBlock::EMPTY`].
    pub fn clear(&mut self) {
        self.blocks.fill(PixelBlock::EMPTY);
    }

    /// Resizes the grid, keeping every cell in the region common to the old and new size
    /// at the same `(column, row)`. Newly exposed cells are empty.
    ///
    /// Rows are reflowed in place: storage grows before the reflow and shrinks after it.
    pub fn resize(&mut self, size: Size) {
        let (from_w, from_h) = (self.width, self.height);
        let to_w = size.x.max(0) as usize;
        let to_h = size.y.max(0) as usize;
        if (from_w, from_h) == (to_w, to_h) {
            return;
        }

        let total = to_w * to_h;
        if total > self.blocks.len() {
            self.blocks.resize(total, PixelBlock::EMPTY);
        }

        let rows = from_h.min(to_h);
        if to_w < from_w {
            // row 0 stays at offset 0; every later row moves towards the front
            for row in 1..rows {
                let src = row * from_w;
                self.blocks.copy_within(src..src + to_w, row * to_w);
            }
        } else if to_w > from_w {
            // back to front, so no row is overwritten before it has been moved
            for row in (1..rows).rev() {
                let src = row * from_w;
                self.blocks.copy_within(src..src + from_w, row * to_w);
                self.blocks[src..row * to_w].fill(PixelBlock::EMPTY);
            }
        }

        // whatever the reflow left behind the last kept row is stale
        let kept = if rows == 0 {
            0
        } else {
            (rows - 1) * to_w + from_w.min(to_w)
        };
        if kept < self.blocks.len() {
            self.blocks[kept..].fill(PixelBlock::EMPTY);
        }
        self.blocks.truncate(total);

        self.width = to_w;
        self.height = to_h;
    }

    /// Paints every cell of `other` onto the corresponding cell of `self`.
    ///
    /// Both grids must have the same dimensions.
    pub fn paint(&mut self, other: &PixelGrid, op: TerminalOp) {
        debug_assert_eq!(self.size(), other.size(), "painting grids of different sizes");
        for (dst, src) in self.blocks.iter_mut().zip(other.blocks.iter()) {
            *dst = src.paint(*dst, op);
        }
    }

    /// Paints a single block onto the cell at `(x, y)`, if it is in bounds.
    pub fn paint_block(&mut self, x: usize, y: usize, src: PixelBlock, op: TerminalOp) {
        if let Some(dst) = self.get_mut(x, y) {
            *dst = src.paint(*dst, op);
        }
    }

    #[inline]
    fn get_index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Gets a reference to the cell at column `x`, row `y`.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&PixelBlock> {
        self.get_index(x, y).map(|idx| &self.blocks[idx])
    }

    /// Gets a mutable reference to the cell at column `x`, row `y`.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut PixelBlock> {
        self.get_index(x, y).map(|idx| &mut self.blocks[idx])
    }

    /// The cells of row `y`, left to right.
    pub fn row(&self, y: usize) -> &[PixelBlock] {
        let start = y * self.width;
        &self.blocks[start..start + self.width]
    }

    /// Returns an iterator over the cells as `(x, y, block)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &PixelBlock)> {
        let width = self.width;
        self.blocks
            .iter()
            .enumerate()
            .map(move |(idx, block)| (idx % width, idx / width, block))
    }
}

impl Index<(usize, usize)> for PixelGrid {
    type Output = PixelBlock;

    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        self.get(x, y).expect("cell index out of bounds")
    }
}

impl IndexMut<(usize, usize)> for PixelGrid {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        self.get_mut(x, y).expect("cell index out of bounds")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::color::Color;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Every cell gets a distinct mask and a color encoding its position.
    fn numbered(width: usize, height: usize) -> PixelGrid {
        let mut grid = PixelGrid::new(Size::new(width as i64, height as i64));
        for y in 0..height {
            for x in 0..width {
                grid[(x, y)] = marker(x, y);
            }
        }
        grid
    }

    fn marker(x: usize, y: usize) -> PixelBlock {
        PixelBlock::with_mask(
            Color::rgb(x as f32, y as f32, 0.5),
            ((x * 7 + y * 13) % 255 + 1) as u8,
        )
    }

    fn assert_common_region(grid: &PixelGrid, width: usize, height: usize) {
        for y in 0..height.min(grid.height()) {
            for x in 0..width.min(grid.width()) {
                assert_eq!(grid[(x, y)], marker(x, y), "cell ({x}, {y})");
            }
        }
    }

    fn assert_outside_empty(grid: &PixelGrid, width: usize, height: usize) {
        for (x, y, block) in grid.iter() {
            if x >= width || y >= height {
                assert_eq!(*block, PixelBlock::EMPTY, "cell ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_new_is_empty() {
        let grid = PixelGrid::new(Size::new(4, 3));
        assert_eq!(grid.iter().count(), 12);
        assert!(grid.iter().all(|(_, _, b)| *b == PixelBlock::EMPTY));
        assert_eq!(grid.get(4, 0), None);
        assert_eq!(grid.get(0, 3), None);
    }

    #[test]
    fn test_clear() {
        let mut grid = numbered(3, 3);
        grid.clear();
        assert!(grid.iter().all(|(_, _, b)| *b == PixelBlock::EMPTY));
    }

    #[test]
    fn test_resize_grow_columns() {
        let mut grid = numbered(3, 4);
        grid.resize(Size::new(5, 4));
        assert_eq!(grid.size(), Size::new(5, 4));
        assert_common_region(&grid, 3, 4);
        assert_outside_empty(&grid, 3, 4);
    }

    #[test]
    fn test_resize_shrink_columns() {
        let mut grid = numbered(5, 3);
        grid.resize(Size::new(2, 3));
        assert_eq!(grid.row(2), &[marker(0, 2), marker(1, 2)]);
        assert_common_region(&grid, 5, 3);
    }

    #[test]
    fn test_resize_shrink_columns_grow_rows() {
        let mut grid = numbered(4, 2);
        grid.resize(Size::new(2, 4));
        assert_common_region(&grid, 4, 2);
        assert_outside_empty(&grid, 2, 2);
    }

    #[test]
    fn test_resize_grow_columns_shrink_rows() {
        let mut grid = numbered(2, 4);
        grid.resize(Size::new(3, 2));
        assert_common_region(&grid, 2, 4);
        assert_outside_empty(&grid, 2, 2);
    }

    #[test]
    fn test_resize_to_zero_and_back() {
        let mut grid = numbered(3, 3);
        grid.resize(Size::new(0, 3));
        assert_eq!(grid.iter().count(), 0);
        grid.resize(Size::new(3, 3));
        assert_outside_empty(&grid, 0, 0);
    }

    #[test]
    fn test_resize_round_trip_keeps_common_region() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..300 {
            let (aw, ah) = (rng.gen_range(0..9), rng.gen_range(0..9));
            let (bw, bh) = (rng.gen_range(0..9), rng.gen_range(0..9));

            let mut grid = numbered(aw, ah);
            grid.resize(Size::new(bw as i64, bh as i64));
            assert_common_region(&grid, aw, ah);
            assert_outside_empty(&grid, aw, ah);

            grid.resize(Size::new(aw as i64, ah as i64));
            assert_eq!(grid.size(), Size::new(aw as i64, ah as i64));
            assert_common_region(&grid, bw.min(aw), bh.min(ah));
            assert_outside_empty(&grid, bw.min(aw), bh.min(ah));
        }
    }

    #[test]
    fn test_paint_composites_cellwise() {
        let mut dst = PixelGrid::new(Size::new(2, 1));
        dst[(0, 0)] = PixelBlock::with_mask(Color::rgb(0.0, 0.0, 1.0), 0xf0);
        let mut src = PixelGrid::new(Size::new(2, 1));
        src[(0, 0)] = PixelBlock::with_mask(Color::rgb(1.0, 0.0, 0.0), 0x0f);
        src[(1, 0)] = PixelBlock::with_mask(Color::rgb(1.0, 0.0, 0.0), 0x01);

        let mut clip = dst.clone();
        clip.paint(&src, TerminalOp::ClipSrc);
        assert_eq!(clip[(0, 0)], dst[(0, 0)]);
        assert_eq!(clip[(1, 0)], src[(1, 0)]);

        dst.paint(&src, TerminalOp::Over);
        assert_eq!(dst[(0, 0)].mask, 0xff);
        assert_eq!(dst[(0, 0)].color, Color::new(0.5, 0.0, 0.5, 1.0));
        assert_eq!(dst[(1, 0)], src[(1, 0)]);
    }
}
