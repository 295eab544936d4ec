//! Drawing in real-valued coordinates.
//!
//! [`RealCanvas`] maps a rectangle of the real plane onto a [`BrailleCanvas`], so plots can
//! be drawn in data coordinates. The default bounds `(0, 1)-(1, 0)` put the origin in the
//! bottom left corner with `y` growing upwards.

use crate::canvas::BrailleCanvas;
use crate::geometry::{Coord, Point, Pointf, Rect, Rectf, Size, Sizef};
use crate::rendering::block::TerminalOp;
use crate::rendering::color::Color;
use smallvec::SmallVec;
use std::fmt;

const MAP_LIMIT: f32 = (1 << 24) as f32;

fn to_coord(v: f32) -> Coord {
    v.round().clamp(-MAP_LIMIT, MAP_LIMIT) as Coord
}

/// A [`BrailleCanvas`] addressed in real coordinates.
///
/// `bounds.p1` maps to the top left sub-pixel and `bounds.p2` to the bottom right one.
///
/// # Example
///
/// ```rust
/// use tplot::canvas::BrailleCanvas;
/// use tplot::geometry::{Point, Pointf, Size};
/// use tplot::real::RealCanvas;
///
/// let canvas = RealCanvas::new(BrailleCanvas::new(Size::new(10, 5)));
/// assert_eq!(canvas.map(Pointf::new(0.0, 0.0)), Point::new(0, 19));
/// assert_eq!(canvas.map(Pointf::new(1.0, 1.0)), Point::new(19, 0));
/// ```
#[derive(Debug)]
pub struct RealCanvas {
    bounds: Rectf,
    canvas: BrailleCanvas,
}

impl RealCanvas {
    pub const DEFAULT_BOUNDS: Rectf = Rectf::new(Pointf::new(0.0, 1.0), Pointf::new(1.0, 0.0));

    pub fn new(canvas: BrailleCanvas) -> Self {
        Self::with_bounds(Self::DEFAULT_BOUNDS, canvas)
    }

    pub fn with_bounds(bounds: Rectf, canvas: BrailleCanvas) -> Self {
        Self { bounds, canvas }
    }

    pub fn canvas(&self) -> &BrailleCanvas {
        &self.canvas
    }

    /// Direct access to the underlying canvas, e.g. for [`BrailleCanvas::stroke`] in
    /// sub-pixel coordinates.
    pub fn canvas_mut(&mut self) -> &mut BrailleCanvas {
        &mut self.canvas
    }

    pub fn into_inner(self) -> BrailleCanvas {
        self.canvas
    }

    pub fn bounds(&self) -> Rectf {
        self.bounds
    }

    /// Extents of the bounds.
    pub fn size(&self) -> Sizef {
        self.bounds.size()
    }

    /// The sub-pixel coordinates of the last row and column.
    fn last_pixel(&self) -> Pointf {
        Pointf::from(self.canvas.size() - Point::new(1, 1))
    }

    /// Maps a point to its sub-pixel, which may lie outside the canvas.
    ///
    /// Coordinates are clamped to `±2^24` sub-pixels, so data far off the plot (`1/x` near
    /// zero, say) still produces shapes the canvas can rasterize.
    pub fn map(&self, p: Pointf) -> Point {
        let Rectf { p1, p2 } = self.bounds;
        let last = self.last_pixel();
        Point::new(
            to_coord((p.x - p1.x) / (p2.x - p1.x) * last.x),
            to_coord((p.y - p1.y) / (p2.y - p1.y) * last.y),
        )
    }

    pub fn map_rect(&self, r: Rectf) -> Rect {
        Rect::new(self.map(r.p1), self.map(r.p2))
    }

    /// Maps a distance, ignoring the orientation of the bounds.
    pub fn map_size(&self, s: Sizef) -> Size {
        let size = self.size();
        let last = self.last_pixel();
        Size::new(
            to_coord(s.x / size.x * last.x),
            to_coord(s.y / size.y * last.y),
        )
    }

    pub fn unmap(&self, p: Point) -> Pointf {
        let Rectf { p1, p2 } = self.bounds;
        let last = self.last_pixel();
        Pointf::new(
            p.x as f32 / last.x * (p2.x - p1.x) + p1.x,
            p.y as f32 / last.y * (p2.y - p1.y) + p1.y,
        )
    }

    pub fn unmap_rect(&self, r: Rect) -> Rectf {
        Rectf::new(self.unmap(r.p1), self.unmap(r.p2))
    }

    pub fn unmap_size(&self, s: Size) -> Sizef {
        let size = self.size();
        let last = self.last_pixel();
        Sizef::new(
            s.x as f32 / last.x * size.x,
            s.y as f32 / last.y * size.y,
        )
    }

    pub fn push(&mut self) -> &mut Self {
        self.canvas.push();
        self
    }

    pub fn pop(&mut self, op: TerminalOp) -> &mut Self {
        self.canvas.pop(op);
        self
    }

    /// Resizes the canvas, keeping the bounds.
    pub fn resize(&mut self, term_size: Size) -> &mut Self {
        self.canvas.resize(term_size);
        self
    }

    pub fn resize_with_bounds(&mut self, bounds: Rectf, term_size: Size) -> &mut Self {
        self.bounds = bounds;
        self.resize(term_size)
    }

    pub fn clear(&mut self) -> &mut Self {
        self.canvas.clear();
        self
    }

    pub fn clear_with(&mut self, background: Color) -> &mut Self {
        self.canvas.clear_with(background);
        self
    }

    pub fn clear_rect(&mut self, rect: Rectf) -> &mut Self {
        let rect = self.map_rect(rect);
        self.canvas.clear_rect(rect);
        self
    }

    pub fn dot(&mut self, color: Color, p: Pointf, op: TerminalOp) -> &mut Self {
        let p = self.map(p);
        self.canvas.dot(color, p, op);
        self
    }

    pub fn line(&mut self, color: Color, from: Pointf, to: Pointf, op: TerminalOp) -> &mut Self {
        let (from, to) = (self.map(from), self.map(to));
        self.canvas.line(color, from, to, op);
        self
    }

    pub fn path(
        &mut self,
        color: Color,
        points: impl IntoIterator<Item = Pointf>,
        op: TerminalOp,
    ) -> &mut Self {
        let points: SmallVec<[Point; 16]> = points.into_iter().map(|p| self.map(p)).collect();
        self.canvas.path(color, points, op);
        self
    }

    pub fn rect(
        &mut self,
        stroke: Color,
        fill: Option<Color>,
        rect: Rectf,
        op: TerminalOp,
    ) -> &mut Self {
        let rect = self.map_rect(rect);
        self.canvas.rect(stroke, fill, rect, op);
        self
    }

    pub fn ellipse(
        &mut self,
        stroke: Color,
        fill: Option<Color>,
        rect: Rectf,
        op: TerminalOp,
    ) -> &mut Self {
        let rect = self.map_rect(rect);
        self.canvas.ellipse(stroke, fill, rect, op);
        self
    }

    pub fn ellipse_centered(
        &mut self,
        stroke: Color,
        fill: Option<Color>,
        center: Pointf,
        semiaxes: Sizef,
        op: TerminalOp,
    ) -> &mut Self {
        let (center, semiaxes) = (self.map(center), self.map_size(semiaxes));
        self.canvas
            .ellipse_centered(stroke, fill, center, semiaxes, op);
        self
    }
}

impl fmt::Display for RealCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.canvas, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::color::palette;

    fn canvas() -> RealCanvas {
        RealCanvas::new(BrailleCanvas::new(Size::new(10, 5)))
    }

    #[test]
    fn test_map_default_bounds() {
        let c = canvas();
        assert_eq!(c.size(), Sizef::new(1.0, 1.0));
        assert_eq!(c.map(Pointf::new(0.0, 1.0)), Point::new(0, 0));
        assert_eq!(c.map(Pointf::new(0.5, 0.5)), Point::new(10, 10));
        assert_eq!(c.map(Pointf::new(1.0, 0.0)), Point::new(19, 19));
        assert_eq!(
            c.map_rect(Rectf::new(Pointf::new(0.0, 0.0), Pointf::new(1.0, 1.0))),
            Rect::new(Point::new(0, 19), Point::new(19, 0))
        );
    }

    #[test]
    fn test_far_off_points_are_clamped() {
        let mut c = canvas();
        assert_eq!(c.map(Pointf::new(0.5, 1e20)), Point::new(10, -(1 << 24)));
        assert_eq!(c.map(Pointf::new(-1e30, -1e30)), Point::new(-(1 << 24), 1 << 24));
        assert_eq!(
            c.map_size(Sizef::new(f32::INFINITY, 1.0)),
            Size::new(1 << 24, 19)
        );

        // a nearly vertical segment leaving the top of the plot
        c.line(
            palette::WHITE,
            Pointf::new(0.0, 0.5),
            Pointf::new(0.5, 1e20),
            TerminalOp::Over,
        );
        for y in 0..=10 {
            assert!(c.canvas().pixel(Point::new(0, y)), "{y}");
        }
        assert!(!c.canvas().pixel(Point::new(1, 5)));
        assert!(!c.canvas().pixel(Point::new(0, 11)));
    }

    #[test]
    fn test_unmap_inverts_map_on_pixels() {
        let c = RealCanvas::with_bounds(
            Rectf::new(Pointf::new(-2.0, 3.0), Pointf::new(2.0, -3.0)),
            BrailleCanvas::new(Size::new(8, 4)),
        );
        for y in 0..16 {
            for x in 0..16 {
                let p = Point::new(x, y);
                assert_eq!(c.map(c.unmap(p)), p);
            }
        }
        let r = Rect::new(Point::new(1, 2), Point::new(12, 9));
        assert_eq!(c.map_rect(c.unmap_rect(r)), r);
    }

    #[test]
    fn test_map_size() {
        let c = RealCanvas::with_bounds(
            Rectf::new(Pointf::new(0.0, 10.0), Pointf::new(20.0, 0.0)),
            BrailleCanvas::new(Size::new(11, 3)),
        );
        // 22x12 sub-pixels, so 21x11 steps across the bounds
        assert_eq!(c.map_size(Sizef::new(20.0, 10.0)), Size::new(21, 11));
        assert_eq!(c.map_size(Sizef::new(10.0, 5.0)), Size::new(11, 6));
        assert_eq!(c.unmap_size(Size::new(21, 11)), Sizef::new(20.0, 10.0));
    }

    #[test]
    fn test_drawing_forwards_mapped_coordinates() {
        let mut real = canvas();
        real.line(
            palette::WHITE,
            Pointf::new(0.0, 0.0),
            Pointf::new(1.0, 1.0),
            TerminalOp::Over,
        )
        .dot(palette::RED, Pointf::new(0.25, 0.75), TerminalOp::Over);

        let mut direct = BrailleCanvas::new(Size::new(10, 5));
        direct
            .line(palette::WHITE, Point::new(0, 19), Point::new(19, 0), TerminalOp::Over)
            .dot(palette::RED, Point::new(5, 5), TerminalOp::Over);

        assert_eq!(real.to_string(), direct.to_string());
    }

    #[test]
    fn test_shapes_forward() {
        let mut real = canvas();
        let bounds = Rectf::new(Pointf::new(0.1, 0.9), Pointf::new(0.6, 0.4));
        real.rect(palette::RED, Some(palette::BLUE), bounds, TerminalOp::Over)
            .ellipse_centered(
                palette::WHITE,
                None,
                Pointf::new(0.5, 0.5),
                Sizef::new(0.2, 0.2),
                TerminalOp::ClipSrc,
            )
            .path(
                palette::LIME,
                [Pointf::new(0.0, 0.0), Pointf::new(0.5, 1.0), Pointf::new(1.0, 0.0)],
                TerminalOp::Over,
            );

        let mut direct = BrailleCanvas::new(Size::new(10, 5));
        direct
            .rect(
                palette::RED,
                Some(palette::BLUE),
                Rect::new(Point::new(2, 2), Point::new(11, 11)),
                TerminalOp::Over,
            )
            .ellipse_centered(
                palette::WHITE,
                None,
                Point::new(10, 10),
                Size::new(4, 4),
                TerminalOp::ClipSrc,
            )
            .path(
                palette::LIME,
                [Point::new(0, 19), Point::new(10, 0), Point::new(19, 19)],
                TerminalOp::Over,
            );

        assert_eq!(real.to_string(), direct.to_string());
        assert_eq!(real.canvas().layer_depth(), 0);
    }

    #[test]
    fn test_clear_rect_and_resize() {
        let mut real = canvas();
        real.canvas_mut()
            .fill(palette::RED, Rect::new(Point::new(0, 0), Point::new(19, 19)), |_| true, TerminalOp::Over);
        real.clear_rect(Rectf::new(Pointf::new(0.0, 1.0), Pointf::new(0.5, 0.5)));
        assert!(!real.canvas().pixel(Point::new(0, 0)));
        assert!(!real.canvas().pixel(Point::new(10, 10)));
        assert!(real.canvas().pixel(Point::new(11, 11)));

        real.resize_with_bounds(
            Rectf::new(Pointf::new(0.0, 2.0), Pointf::new(2.0, 0.0)),
            Size::new(5, 5),
        );
        assert_eq!(real.canvas().size(), Size::new(10, 20));
        assert_eq!(real.map(Pointf::new(2.0, 0.0)), Point::new(9, 19));
    }
}
