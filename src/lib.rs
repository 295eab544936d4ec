//! # tplot
//!
//! A sub-pixel canvas for drawing in the terminal.
//!
//! Every terminal cell is drawn as a Unicode braille glyph, whose 2x4 dots are the canvas'
//! sub-pixels. Shapes are rasterized into these dots, composited cell by cell, and written
//! out as text with color escape sequences.
//!
//! ```rust
//! use tplot::prelude::*;
//!
//! let mut canvas = BrailleCanvas::new(Size::new(30, 8))
//!     .with_term(TermInfo::new(ColorMode::Xterm256));
//!
//! canvas
//!     .rect(palette::ORANGERED, Some(palette::NAVY), Rect::new(Point::new(1, 1), Point::new(20, 20)), TerminalOp::Over)
//!     .push()
//!     .ellipse(palette::LIME, None, Rect::new(Point::new(10, 5), Point::new(50, 28)), TerminalOp::Over)
//!     .pop(TerminalOp::ClipSrc);
//!
//! for line in canvas.lines() {
//!     println!("{line}");
//! }
//! ```
//!
//! The main entry points are [`BrailleCanvas`](canvas::BrailleCanvas) for drawing in
//! sub-pixel coordinates and [`RealCanvas`](real::RealCanvas) for drawing in real-valued
//! data coordinates. Both implement [`Block`](layout::Block) for use in text layouts.
//!
//! Logging goes through the [`log`] facade; nothing is logged above `debug` level.

pub mod canvas;
pub mod geometry;
pub mod layout;
pub mod real;
pub mod rendering;
pub mod util;

/// Everything needed for drawing, in one import.
pub mod prelude {
    pub use crate::canvas::BrailleCanvas;
    pub use crate::geometry::{Point, Pointf, Rect, Rectf, Size, Sizef};
    pub use crate::layout::Block;
    pub use crate::real::RealCanvas;
    pub use crate::rendering::block::TerminalOp;
    pub use crate::rendering::color::{Color, palette};
    pub use crate::rendering::terminal::{ColorMode, TermInfo};
}
