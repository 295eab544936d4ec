//! Terminal cells made of 2x4 sub-pixels.
//!
//! A [`PixelBlock`] is the unit of rendering: one braille glyph on screen. It stores which of
//! its eight sub-pixels are set in a bit mask, and a *single* color for the whole cell.
//! Compositing two blocks therefore has to approximate per-sub-pixel blending, see
//! [`PixelBlock::over`].

use crate::rendering::color::Color;
use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Mask bit for the sub-pixel at `[column][row]` within a cell.
///
/// These are the dot positions of the Unicode braille patterns (U+2800 - U+28FF):
///
/// ```text
/// 0x01 0x08
/// 0x02 0x10
/// 0x04 0x20
/// 0x40 0x80
/// ```
pub const PIXEL_CODES: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

/// How a newly drawn cell is merged with the existing content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminalOp {
    /// Paint source over destination, mixing the cell colors.
    #[default]
    Over,
    /// Erase the destination wherever the source is not empty.
    ClipDst,
    /// Ignore the source wherever the destination is not empty.
    ClipSrc,
}

/// One terminal cell: eight sub-pixel bits and one blended color.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelBlock {
    pub color: Color,
    pub mask: u8,
}

impl PixelBlock {
    /// An empty, transparent cell.
    pub const EMPTY: PixelBlock = PixelBlock::with_mask(Color::TRANSPARENT, 0);

    /// An empty cell that will draw with `color` once sub-pixels are set.
    pub const fn new(color: Color) -> Self {
        Self::with_mask(color, 0)
    }

    pub const fn with_mask(color: Color, mask: u8) -> Self {
        Self { color, mask }
    }

    /// Builds a cell by asking `f(column, row)` for each of the eight sub-pixels.
    pub fn from_fn(color: Color, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut mask = 0;
        for (x, column) in PIXEL_CODES.iter().enumerate() {
            for (y, code) in column.iter().enumerate() {
                if f(x, y) {
                    mask |= code;
                }
            }
        }
        Self::with_mask(color, mask)
    }

    /// Sets the sub-pixel at `(x mod 2, y mod 4)`. The color is untouched.
    pub fn set(&mut self, x: usize, y: usize) -> &mut Self {
        self.mask |= PIXEL_CODES[x % 2][y % 4];
        self
    }

    /// Clears the sub-pixel at `(x mod 2, y mod 4)`. The color is untouched.
    pub fn clear(&mut self, x: usize, y: usize) -> &mut Self {
        self.mask &= !PIXEL_CODES[x % 2][y % 4];
        self
    }

    /// Clears every sub-pixel.
    pub fn clear_all(&mut self) -> &mut Self {
        self.mask = 0;
        self
    }

    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.mask & PIXEL_CODES[x % 2][y % 4] != 0
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Composites `self` over `other`.
    ///
    /// The sub-pixels are split in three bands: those only set in `other` keep `other`'s
    /// color, those only set in `self` take `self`'s color, and those set in both get
    /// `self.color.over(other.color)`. The resulting cell color is the average of the band
    /// colors weighted by their sub-pixel counts. A fully transparent side borrows the
    /// color of the other side.
    ///
    /// At least one of the two masks must be non-empty.
    pub fn over(self, other: PixelBlock) -> PixelBlock {
        let old = (other.mask & !self.mask).count_ones() as f32;
        let new = (self.mask & !other.mask).count_ones() as f32;
        let overlap = (self.mask & other.mask).count_ones() as f32;
        let total = old + new + overlap;

        let old_color = if other.color.a != 0.0 {
            other.color
        } else {
            self.color
        };
        let new_color = if self.color.a != 0.0 {
            self.color
        } else {
            other.color
        };
        let overlap_color = new_color.over(old_color);

        let color = (old / total) * old_color
            + (new / total) * new_color
            + (overlap / total) * overlap_color;

        PixelBlock::with_mask(color, self.mask | other.mask)
    }

    /// Paints `self` onto `dst` with the given operator and returns the result.
    ///
    /// An empty source always leaves `dst` unchanged.
    pub fn paint(self, dst: PixelBlock, op: TerminalOp) -> PixelBlock {
        if self.is_empty() {
            return dst;
        }
        match op {
            TerminalOp::Over => self.over(dst),
            TerminalOp::ClipDst => self,
            TerminalOp::ClipSrc if dst.is_empty() => self,
            TerminalOp::ClipSrc => dst,
        }
    }
}

// The mask operators keep the left operand's color and drop the right one's.
// They are meant for region masking (see `clear_rect`), not for blending.

impl Not for PixelBlock {
    type Output = PixelBlock;

    fn not(self) -> PixelBlock {
        PixelBlock::with_mask(self.color, !self.mask)
    }
}

impl BitOr for PixelBlock {
    type Output = PixelBlock;

    fn bitor(self, rhs: PixelBlock) -> PixelBlock {
        PixelBlock::with_mask(self.color, self.mask | rhs.mask)
    }
}

impl BitAnd for PixelBlock {
    type Output = PixelBlock;

    fn bitand(self, rhs: PixelBlock) -> PixelBlock {
        PixelBlock::with_mask(self.color, self.mask & rhs.mask)
    }
}

impl BitOrAssign for PixelBlock {
    fn bitor_assign(&mut self, rhs: PixelBlock) {
        *self = *self | rhs;
    }
}

impl BitAndAssign for PixelBlock {
    fn bitand_assign(&mut self, rhs: PixelBlock) {
        *self = *self & rhs;
    }
}
