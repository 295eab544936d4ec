//! Rendering building blocks behind [`BrailleCanvas`](crate::canvas::BrailleCanvas).
//!
//! **Sub-modules:**
//!
//! *   [`color`](crate::rendering::color): RGBA colors, compositing and the named [`palette`](crate::rendering::color::palette).
//! *   [`block`](crate::rendering::block): [`PixelBlock`](crate::rendering::block::PixelBlock), one terminal cell of 2x4 sub-pixels, and the [`TerminalOp`](crate::rendering::block::TerminalOp) compositing operators.
//! *   [`grid`](crate::rendering::grid): [`PixelGrid`](crate::rendering::grid::PixelGrid), a resizable 2D buffer of cells.
//! *   [`layers`](crate::rendering::layers): [`LayerStack`](crate::rendering::layers::LayerStack), the push/pop stack of grids with its free list.
//! *   [`raster`](crate::rendering::raster): scanline stroking and filling with profile functions and predicates.
//! *   [`braille`](crate::rendering::braille): turns rows of cells into braille text and color escapes.
//! *   [`terminal`](crate::rendering::terminal): terminal color modes and palette quantization.
//!
//! **Key Concepts:**
//!
//! *   **Sub-pixels:** Each terminal cell shows one braille glyph whose eight dots are addressed individually.
//!     A canvas of `w x h` cells therefore has `2w x 4h` sub-pixels.
//! *   **One color per cell:** All set sub-pixels of a cell share a color. Compositing a cell onto another
//!     blends their colors weighted by how many sub-pixels each contributes.
//! *   **Layers:** Drawing can be redirected to a fresh layer with `push` and merged back with `pop`, using any
//!     compositing operator. This lets a group of shapes clip against the rest of the picture as a unit.
//!
//! **Rendering Process (Simplified):**
//!
//! 1.  Shapes are rasterized into cell masks by [`raster`](crate::rendering::raster), one composite per touched cell.
//! 2.  The masks are painted onto the live [`PixelGrid`](crate::rendering::grid::PixelGrid) with a [`TerminalOp`](crate::rendering::block::TerminalOp).
//! 3.  On output, each cell color is blended onto the background and quantized for the terminal's color mode.
//! 4.  The cell mask selects the braille code point; empty cells become spaces.

pub mod block;
pub mod braille;
pub mod color;
pub mod grid;
pub mod layers;
pub mod raster;
pub mod terminal;
