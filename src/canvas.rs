//! The drawing surface.
//!
//! [`BrailleCanvas`] owns the live [`PixelGrid`], the [`LayerStack`] and the output settings.
//! Every drawing method returns `&mut Self`, so calls chain:
//!
//! ```rust
//! use tplot::canvas::BrailleCanvas;
//! use tplot::geometry::{Point, Rect, Size};
//! use tplot::rendering::block::TerminalOp;
//! use tplot::rendering::color::palette;
//!
//! let mut canvas = BrailleCanvas::new(Size::new(10, 5));
//! canvas
//!     .rect(palette::RED, Some(palette::BLUE), Rect::new(Point::new(2, 2), Point::new(8, 8)), TerminalOp::Over)
//!     .line(palette::WHITE, Point::new(0, 0), Point::new(19, 19), TerminalOp::ClipSrc);
//!
//! assert_eq!(canvas.to_string().lines().count(), 5);
//! ```
//!
//! Coordinates are in sub-pixels, `(0, 0)` is the top left corner and `y` grows downwards.
//! Shape rectangles include both corners. Anything outside the canvas is silently cut off.

use crate::geometry::{Coord, Point, Rect, Size};
use crate::rendering::block::{PixelBlock, TerminalOp};
use crate::rendering::braille::BrailleEncoder;
use crate::rendering::color::{Color, palette};
use crate::rendering::grid::PixelGrid;
use crate::rendering::layers::LayerStack;
use crate::rendering::raster::{self, Ellipse, Quadrant};
use crate::rendering::terminal::TermInfo;
use crate::util::{CELL_HEIGHT, CELL_WIDTH};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use log::debug;
use smallvec::SmallVec;
use std::fmt;
use std::io;

/// A braille canvas of `term_size` terminal cells.
#[derive(Debug)]
pub struct BrailleCanvas {
    grid: PixelGrid,
    layers: LayerStack,
    encoder: BrailleEncoder,
}

impl BrailleCanvas {
    /// Creates an empty canvas with a black background and no color output.
    pub fn new(term_size: Size) -> Self {
        Self {
            grid: PixelGrid::new(term_size),
            layers: LayerStack::new(term_size),
            encoder: BrailleEncoder::new(TermInfo::default(), palette::BLACK),
        }
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.encoder.background = color;
        self
    }

    pub fn with_term(mut self, term: TermInfo) -> Self {
        self.encoder.term = term;
        self
    }

    /// Size in terminal cells.
    pub fn term_size(&self) -> Size {
        self.grid.size()
    }

    /// Size in sub-pixels.
    pub fn size(&self) -> Size {
        raster::pixel_size(&self.grid)
    }

    pub fn background(&self) -> Color {
        self.encoder.background
    }

    pub fn term(&self) -> &TermInfo {
        &self.encoder.term
    }

    /// Number of layers pushed and not yet popped.
    pub fn layer_depth(&self) -> usize {
        self.layers.depth()
    }

    /// The cell at column `col`, row `row` of the current layer.
    pub fn block(&self, col: usize, row: usize) -> Option<&PixelBlock> {
        self.grid.get(col, row)
    }

    /// Whether the sub-pixel at `p` is set on the current layer.
    pub fn pixel(&self, p: Point) -> bool {
        if !Rect::from_size(self.size()).contains(p) {
            return false;
        }
        self.grid
            .get((p.x / CELL_WIDTH) as usize, (p.y / CELL_HEIGHT) as usize)
            .is_some_and(|block| block.is_set(p.x as usize, p.y as usize))
    }

    pub fn dot(&mut self, color: Color, p: Point, op: TerminalOp) -> &mut Self {
        if Rect::from_size(self.size()).contains(p) {
            let mut src = PixelBlock::new(color);
            src.set(p.x as usize, p.y as usize);
            self.grid.paint_block(
                (p.x / CELL_WIDTH) as usize,
                (p.y / CELL_HEIGHT) as usize,
                src,
                op,
            );
        }
        self
    }

    pub fn line(&mut self, color: Color, from: Point, to: Point, op: TerminalOp) -> &mut Self {
        raster::stroke(
            &mut self.grid,
            color,
            Rect::new(from, to),
            raster::line_profile(from, to),
            op,
        );
        self
    }

    /// Draws a polyline. The whole path is composited as one layer, so its own segments
    /// never clip each other.
    pub fn path(
        &mut self,
        color: Color,
        points: impl IntoIterator<Item = Point>,
        op: TerminalOp,
    ) -> &mut Self {
        let points: SmallVec<[Point; 16]> = points.into_iter().collect();
        self.push();
        for segment in points.windows(2) {
            self.line(color, segment[0], segment[1], TerminalOp::Over);
        }
        self.pop(op)
    }

    /// Draws the outline of `rect`, optionally filling its interior.
    pub fn rect(
        &mut self,
        stroke: Color,
        fill: Option<Color>,
        rect: Rect,
        op: TerminalOp,
    ) -> &mut Self {
        let Rect { p1, p2 } = rect;
        self.push();
        self.line(stroke, p1, Point::new(p2.x, p1.y), TerminalOp::Over)
            .line(stroke, p1, Point::new(p1.x, p2.y), TerminalOp::Over)
            .line(stroke, p2, Point::new(p2.x, p1.y), TerminalOp::Over)
            .line(stroke, p2, Point::new(p1.x, p2.y), TerminalOp::Over);

        if let Some(fill) = fill {
            let rect = rect.sorted();
            let interior = Rect::new(rect.p1 + Point::new(1, 1), rect.p2);
            if interior.is_sorted() {
                self.fill(fill, rect, |p| interior.contains(p), TerminalOp::Over);
            }
        }
        self.pop(op)
    }

    /// Draws the ellipse inscribed in `rect`, optionally filled.
    pub fn ellipse(
        &mut self,
        stroke: Color,
        fill: Option<Color>,
        rect: Rect,
        op: TerminalOp,
    ) -> &mut Self {
        let ellipse = Ellipse::new(rect);
        self.push();
        for q in Quadrant::ALL {
            let Some(bounds) = ellipse.quadrant_rect(q) else {
                continue;
            };
            raster::stroke(&mut self.grid, stroke, bounds, ellipse.profile(q), TerminalOp::Over);
            if let Some(fill) = fill {
                raster::fill(
                    &mut self.grid,
                    fill,
                    bounds,
                    |p| ellipse.inside(q, p),
                    TerminalOp::Over,
                );
            }
        }
        self.pop(op)
    }

    /// Draws the ellipse with the given center and semi-axes.
    pub fn ellipse_centered(
        &mut self,
        stroke: Color,
        fill: Option<Color>,
        center: Point,
        semiaxes: Size,
        op: TerminalOp,
    ) -> &mut Self {
        self.ellipse(
            stroke,
            fill,
            Rect::new(center - semiaxes, center + semiaxes),
            op,
        )
    }

    /// Strokes `rect` column by column with the row interval `profile(x)`.
    ///
    /// See [`raster::stroke`].
    pub fn stroke(
        &mut self,
        color: Color,
        rect: Rect,
        profile: impl FnMut(Coord) -> (Coord, Coord),
        op: TerminalOp,
    ) -> &mut Self {
        raster::stroke(&mut self.grid, color, rect, profile, op);
        self
    }

    /// Sets the sub-pixels of `rect` that satisfy `predicate`.
    ///
    /// See [`raster::fill`].
    pub fn fill(
        &mut self,
        color: Color,
        rect: Rect,
        predicate: impl FnMut(Point) -> bool,
        op: TerminalOp,
    ) -> &mut Self {
        raster::fill(&mut self.grid, color, rect, predicate, op);
        self
    }

    /// Starts a new, empty layer on top of the current one.
    pub fn push(&mut self) -> &mut Self {
        self.layers.push(&mut self.grid);
        self
    }

    /// Composites the current layer onto the one below it with `op`.
    /// Does nothing if no layer was pushed.
    pub fn pop(&mut self, op: TerminalOp) -> &mut Self {
        self.layers.pop(&mut self.grid, op);
        self
    }

    /// Clears the current layer.
    pub fn clear(&mut self) -> &mut Self {
        self.grid.clear();
        self
    }

    /// Clears the current layer and changes the background color.
    pub fn clear_with(&mut self, background: Color) -> &mut Self {
        self.encoder.background = background;
        self.clear()
    }

    /// Unsets every sub-pixel of `rect` on the current layer.
    pub fn clear_rect(&mut self, rect: Rect) -> &mut Self {
        raster::clear_rect(&mut self.grid, rect);
        self
    }

    /// Resizes the canvas and every pushed layer to `term_size` cells, keeping the content
    /// that still fits.
    pub fn resize(&mut self, term_size: Size) -> &mut Self {
        if term_size != self.term_size() {
            debug!("resizing canvas from {:?} to {:?}", self.term_size(), term_size);
            self.grid.resize(term_size);
            self.layers.resize(term_size);
        }
        self
    }

    /// Writes row `row` of the current layer as braille text.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not less than the canvas height in cells.
    pub fn write_line(&self, row: usize, out: &mut impl fmt::Write) -> fmt::Result {
        self.encoder.write_row(self.grid.row(row), out)
    }

    /// Row `row` as a string, see [`BrailleCanvas::write_line`].
    pub fn render_line(&self, row: usize) -> String {
        self.encoder.encode_row(self.grid.row(row))
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.grid.height()).map(|row| self.render_line(row))
    }

    /// Writes every row to a terminal, clearing the rest of each line.
    pub fn render_to(&self, out: &mut impl io::Write) -> io::Result<()> {
        let mut line = String::new();
        for row in 0..self.grid.height() {
            line.clear();
            self.write_line(row, &mut line).map_err(io::Error::other)?;
            queue!(out, Clear(ClearType::UntilNewLine), Print(&line), Print("\r\n"))?;
        }
        out.flush()
    }
}

impl fmt::Display for BrailleCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.grid.height() {
            if row > 0 {
                f.write_str("\n")?;
            }
            self.write_line(row, f)?;
        }
        Ok(())
    }
}
