//! Encoding cells as colored braille glyphs.
//!
//! Each cell's mask maps directly to a code point in the Unicode braille block,
//! `U+2800 + mask`. Empty cells are written as a plain space instead of the blank braille
//! pattern, so the terminal background shows through.

use crate::rendering::block::PixelBlock;
use crate::rendering::color::Color;
use crate::rendering::terminal::TermInfo;
use crossterm::Command;
use crossterm::style::{Attribute, SetAttribute};
use std::fmt;

const BRAILLE_BASE: u32 = 0x2800;

/// Turns rows of cells into text with color escape sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BrailleEncoder {
    pub term: TermInfo,
    /// Color that translucent cells are blended onto before output.
    pub background: Color,
}

impl BrailleEncoder {
    pub fn new(term: TermInfo, background: Color) -> Self {
        Self { term, background }
    }

    /// The glyph for a cell mask.
    pub fn glyph(mask: u8) -> char {
        if mask == 0 {
            return ' ';
        }
        char::from_u32(BRAILLE_BASE + mask as u32).unwrap_or(' ')
    }

    /// The color a cell is drawn with.
    pub fn output_color(&self, block: &PixelBlock) -> Color {
        block.color.over(self.background).premultiplied()
    }

    /// Writes one row of cells.
    ///
    /// Unless the color mode is `None`, the row starts with a reset and bold and ends with a
    /// reset. A foreground color is only emitted when it differs from the previous glyph's.
    pub fn write_row(&self, row: &[PixelBlock], out: &mut impl fmt::Write) -> fmt::Result {
        let styled = self.term.mode.is_styled();
        if styled {
            SetAttribute(Attribute::Reset).write_ansi(out)?;
            SetAttribute(Attribute::Bold).write_ansi(out)?;
        }

        let mut last_color = None;
        for block in row {
            if block.is_empty() {
                out.write_char(' ')?;
                continue;
            }
            if let Some(color) = self.term.term_color(self.output_color(block)) {
                if last_color != Some(color) {
                    color.write_ansi(out)?;
                    last_color = Some(color);
                }
            }
            out.write_char(Self::glyph(block.mask))?;
        }

        if styled {
            SetAttribute(Attribute::Reset).write_ansi(out)?;
        }
        Ok(())
    }

    /// [`BrailleEncoder::write_row`] into a new string.
    pub fn encode_row(&self, row: &[PixelBlock]) -> String {
        let mut line = String::with_capacity(row.len() * 4);
        // writing to a String cannot fail
        let _ = self.write_row(row, &mut line);
        line
    }
}
