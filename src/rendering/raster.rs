//! Scanline rasterization onto a [`PixelGrid`].
//!
//! Shapes are described by callbacks instead of being hard-coded:
//!
//! *   [`stroke`] asks a *profile function* for the covered rows `[start, end)` of every
//!     sub-pixel column.
//! *   [`fill`] asks a *predicate* whether a sub-pixel is inside the shape.
//!
//! Both build the complete mask of a cell before compositing it, so every touched cell is
//! painted exactly once per call. [`line_profile`] and [`Ellipse`] provide the profiles and
//! predicates for the built-in shapes.

use crate::geometry::{Coord, Point, Rect, Size};
use crate::rendering::block::{PixelBlock, TerminalOp};
use crate::rendering::color::Color;
use crate::rendering::grid::PixelGrid;
use crate::util::{CELL_HEIGHT, CELL_WIDTH, cell_span};

/// Size of `grid` in sub-pixels.
pub fn pixel_size(grid: &PixelGrid) -> Size {
    Size::new(
        grid.width() as Coord * CELL_WIDTH,
        grid.height() as Coord * CELL_HEIGHT,
    )
}

/// Orders a profile interval and widens an empty one to a single row, so that a flat
/// segment still covers one sub-pixel.
pub fn normalize_span((start, end): (Coord, Coord)) -> (Coord, Coord) {
    if end < start {
        (end + 1, start + 1)
    } else if start == end {
        (start, start + 1)
    } else {
        (start, end)
    }
}

/// Strokes the columns of `rect` (corners inclusive) with the rows returned by `profile`.
///
/// `rect` is clamped to the grid and sorted first. `profile(x)` returns a half-open row
/// interval for sub-pixel column `x`; inverted and empty intervals are normalized with
/// [`normalize_span`]. Rows outside `rect` are ignored.
pub fn stroke(
    grid: &mut PixelGrid,
    color: Color,
    rect: Rect,
    mut profile: impl FnMut(Coord) -> (Coord, Coord),
    op: TerminalOp,
) {
    let size = pixel_size(grid);
    if size.x == 0 || size.y == 0 {
        return;
    }
    let mut rect = rect
        .clamp(Rect::from_size(size - Point::new(1, 1)))
        .sorted();
    rect.p2 += Point::new(1, 1);

    for row in cell_span(rect.p1.y, rect.p2.y, CELL_HEIGHT, grid.height()) {
        let top = row as Coord * CELL_HEIGHT;
        let line_start = top.clamp(rect.p1.y, rect.p2.y);
        let line_end = (top + CELL_HEIGHT).clamp(rect.p1.y, rect.p2.y);

        for col in cell_span(rect.p1.x, rect.p2.x, CELL_WIDTH, grid.width()) {
            let left = col as Coord * CELL_WIDTH;
            let col_start = left.clamp(rect.p1.x, rect.p2.x);
            let col_end = (left + CELL_WIDTH).clamp(rect.p1.x, rect.p2.x);

            let mut src = PixelBlock::new(color);
            for x in col_start..col_end {
                let (start, end) = normalize_span(profile(x));
                for y in start.max(line_start)..end.min(line_end) {
                    src.set(x as usize, y as usize);
                }
            }

            grid.paint_block(col, row, src, op);
        }
    }
}

/// Fills the sub-pixels of `rect` (corners inclusive) for which `predicate` holds.
pub fn fill(
    grid: &mut PixelGrid,
    color: Color,
    rect: Rect,
    mut predicate: impl FnMut(Point) -> bool,
    op: TerminalOp,
) {
    let mut rect = rect.sorted();
    rect.p2 += Point::new(1, 1);

    for row in cell_span(rect.p1.y, rect.p2.y, CELL_HEIGHT, grid.height()) {
        for col in cell_span(rect.p1.x, rect.p2.x, CELL_WIDTH, grid.width()) {
            let origin = Point::new(col as Coord * CELL_WIDTH, row as Coord * CELL_HEIGHT);
            let src = PixelBlock::from_fn(color, |dx, dy| {
                let p = origin + Point::new(dx as Coord, dy as Coord);
                rect.contains(p) && predicate(p)
            });
            grid.paint_block(col, row, src, op);
        }
    }
}

/// Unsets every sub-pixel of `rect` (corners inclusive).
///
/// Cells that end up empty keep whatever color they had; it is meaningless.
pub fn clear_rect(grid: &mut PixelGrid, rect: Rect) {
    let mut rect = rect.sorted();
    rect.p2 += Point::new(1, 1);

    for row in cell_span(rect.p1.y, rect.p2.y, CELL_HEIGHT, grid.height()) {
        for col in cell_span(rect.p1.x, rect.p2.x, CELL_WIDTH, grid.width()) {
            let origin = Point::new(col as Coord * CELL_WIDTH, row as Coord * CELL_HEIGHT);
            let covered = PixelBlock::from_fn(Color::TRANSPARENT, |dx, dy| {
                rect.contains(origin + Point::new(dx as Coord, dy as Coord))
            });
            if let Some(block) = grid.get_mut(col, row) {
                *block &= !covered;
            }
        }
    }
}

/// Profile of the segment `from`-`to`, for use with [`stroke`] over the segment's bounding box.
///
/// Both deltas are extended by one away from zero so that the half-open row intervals of
/// consecutive columns close exactly at the end points.
///
/// The arithmetic is done in `i128` and the rows are clamped to half the `Coord` range, so
/// end points far outside the grid never overflow.
pub fn line_profile(from: Point, to: Point) -> impl Fn(Coord) -> (Coord, Coord) {
    const ROW_MIN: i128 = (Coord::MIN / 2) as i128;
    const ROW_MAX: i128 = (Coord::MAX / 2) as i128;

    let (x0, y0) = (from.x as i128, from.y as i128);
    let dx = to.x as i128 - x0;
    let dy = to.y as i128 - y0;
    let dx = dx + if dx >= 0 { 1 } else { -1 };
    let dy = dy + if dy >= 0 { 1 } else { -1 };

    let row = move |offset: i128| {
        (offset.saturating_mul(dy) / dx + y0).clamp(ROW_MIN, ROW_MAX) as Coord
    };
    move |x| {
        let offset = x as i128 - x0;
        (row(offset), row(offset + 1))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    fn is_left(self) -> bool {
        matches!(self, Quadrant::TopLeft | Quadrant::BottomLeft)
    }

    fn is_top(self) -> bool {
        matches!(self, Quadrant::TopLeft | Quadrant::TopRight)
    }
}

/// An axis-aligned ellipse inscribed in a bounding rectangle, split into quadrants.
///
/// Each quadrant is rasterized on its own: its boundary is a function of `x`, so it can be
/// stroked with [`stroke`] and filled with a one-sided test against that boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    bounds: Rect,
    /// `1 / a` for the horizontal semi-axis `a`, in sub-pixels.
    x_fac: f32,
    /// Vertical semi-axis in sub-pixels.
    y_fac: Coord,
    center: Point,
}

impl Ellipse {
    /// Fits an ellipse into `rect` (corners inclusive).
    ///
    /// For an even span the center is the last sub-pixel of the first half, which keeps the
    /// shape centered in the box for both even and odd spans.
    pub fn new(rect: Rect) -> Self {
        let bounds = rect.sorted();
        let span = bounds.size() + Point::new(1, 1);
        let y_fac = span.y / 2 - Coord::from(span.y % 2 == 0);
        let center = Point::new(
            bounds.p1.x + span.x / 2 - Coord::from(span.x % 2 == 0),
            bounds.p1.y + y_fac,
        );
        Self {
            bounds,
            x_fac: 2.0 / span.x as f32,
            y_fac,
            center,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// The part of the bounding box covered by quadrant `q`, or `None` for a box too thin
    /// to have that quadrant.
    pub fn quadrant_rect(&self, q: Quadrant) -> Option<Rect> {
        let Rect { p1, p2 } = self.bounds;
        let c = self.center;
        let (x1, x2) = if q.is_left() {
            (p1.x, c.x)
        } else {
            (c.x + 1, p2.x)
        };
        let (y1, y2) = if q.is_top() {
            (p1.y, c.y)
        } else {
            (c.y + 1, p2.y)
        };
        (x1 <= x2 && y1 <= y2).then(|| Rect::new(Point::new(x1, y1), Point::new(x2, y2)))
    }

    /// Normalized horizontal distance `x/a - 1` of column `x`, measured from the box edge of
    /// the quadrant.
    fn x_over_a(&self, q: Quadrant, x: Coord) -> f32 {
        let from_edge = if q.is_left() {
            x - self.bounds.p1.x
        } else {
            self.bounds.p2.x - x
        };
        from_edge as f32 * self.x_fac - 1.0
    }

    /// Row of the ellipse boundary for the normalized column `t`.
    fn boundary(&self, q: Quadrant, t: f32) -> Coord {
        let offset = (self.y_fac as f32 * (1.0 - t * t).max(0.0).sqrt()).round() as Coord;
        if q.is_top() {
            self.center.y - offset
        } else {
            self.center.y + offset
        }
    }

    /// Profile function stroking the boundary of quadrant `q`.
    pub fn profile(&self, q: Quadrant) -> impl Fn(Coord) -> (Coord, Coord) + use<> {
        let ellipse = *self;
        move |x| {
            let next = if q.is_left() { x + 1 } else { x - 1 };
            (
                ellipse.boundary(q, ellipse.x_over_a(q, x)),
                ellipse.boundary(q, ellipse.x_over_a(q, next)),
            )
        }
    }

    /// Whether `p` lies strictly inside the boundary of quadrant `q`.
    ///
    /// This is a one-sided test against the quadrant's boundary and is only meaningful for
    /// points within [`Ellipse::quadrant_rect`] of the same quadrant.
    pub fn inside(&self, q: Quadrant, p: Point) -> bool {
        let boundary = self.boundary(q, self.x_over_a(q, p.x));
        if q.is_top() {
            p.y > boundary
        } else {
            p.y < boundary
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::color::palette;

    fn grid(cols: i64, rows: i64) -> PixelGrid {
        PixelGrid::new(Size::new(cols, rows))
    }

    fn is_set(grid: &PixelGrid, x: Coord, y: Coord) -> bool {
        let block = grid[((x / CELL_WIDTH) as usize, (y / CELL_HEIGHT) as usize)];
        block.is_set(x as usize, y as usize)
    }

    fn set_pixels(grid: &PixelGrid) -> Vec<(Coord, Coord)> {
        let size = pixel_size(grid);
        let mut pixels = vec![];
        for y in 0..size.y {
            for x in 0..size.x {
                if is_set(grid, x, y) {
                    pixels.push((x, y));
                }
            }
        }
        pixels
    }

    #[test]
    fn test_normalize_span() {
        assert_eq!(normalize_span((2, 5)), (2, 5));
        assert_eq!(normalize_span((5, 2)), (3, 6));
        assert_eq!(normalize_span((4, 4)), (4, 5));
    }

    #[test]
    fn test_constant_profile_paints_one_row() {
        let mut g = grid(10, 5);
        let rect = Rect::new(Point::new(3, 0), Point::new(14, 19));
        stroke(&mut g, palette::WHITE, rect, |_| (6, 7), TerminalOp::Over);

        let expected: Vec<_> = (3..=14).map(|x| (x, 6)).collect();
        assert_eq!(set_pixels(&g), expected);
    }

    #[test]
    fn test_degenerate_profile_is_widened() {
        let mut g = grid(4, 2);
        let rect = Rect::new(Point::new(0, 0), Point::new(7, 7));
        stroke(&mut g, palette::WHITE, rect, |_| (5, 5), TerminalOp::Over);
        let expected: Vec<_> = (0..8).map(|x| (x, 5)).collect();
        assert_eq!(set_pixels(&g), expected);
    }

    #[test]
    fn test_stroke_paints_each_cell_once() {
        let mut g = grid(2, 1);
        let rect = Rect::new(Point::new(0, 0), Point::new(3, 3));
        // a full cell painted with a half transparent color: painting it per column instead
        // of per cell would blend the color with itself
        let color = palette::RED.with_alpha(0.5);
        stroke(&mut g, color, rect, |_| (0, 4), TerminalOp::Over);
        assert_eq!(g[(0, 0)].mask, 0xff);
        assert_eq!(g[(0, 0)].color, color);
    }

    #[test]
    fn test_stroke_is_clamped_to_grid() {
        let mut g = grid(2, 1);
        let rect = Rect::new(Point::new(-10, -10), Point::new(50, 50));
        stroke(&mut g, palette::WHITE, rect, |x| (x - 2, x + 2), TerminalOp::Over);
        assert_eq!(g.iter().count(), 2);
        assert!(is_set(&g, 0, 0));
        assert!(is_set(&g, 3, 3));
        assert!(!is_set(&g, 0, 3));
    }

    #[test]
    fn test_line_profile_diagonal() {
        let mut g = grid(10, 5);
        let from = Point::new(0, 0);
        let to = Point::new(19, 19);
        stroke(&mut g, palette::WHITE, Rect::new(from, to), line_profile(from, to), TerminalOp::Over);
        let expected: Vec<_> = (0..20).map(|i| (i, i)).collect();
        assert_eq!(set_pixels(&g), expected);
    }

    #[test]
    fn test_line_profile_is_direction_independent() {
        for (from, to) in [
            (Point::new(1, 2), Point::new(17, 9)),
            (Point::new(0, 15), Point::new(6, 0)),
            (Point::new(4, 4), Point::new(15, 4)),
            (Point::new(9, 1), Point::new(9, 18)),
        ] {
            let mut forward = grid(10, 5);
            stroke(&mut forward, palette::WHITE, Rect::new(from, to), line_profile(from, to), TerminalOp::Over);
            let mut backward = grid(10, 5);
            stroke(&mut backward, palette::WHITE, Rect::new(to, from), line_profile(to, from), TerminalOp::Over);

            let pixels = set_pixels(&forward);
            assert!(pixels.contains(&(from.x, from.y)), "{from:?}-{to:?}");
            assert!(pixels.contains(&(to.x, to.y)), "{from:?}-{to:?}");
            // every column of the bounding box is covered
            for x in from.x.min(to.x)..=from.x.max(to.x) {
                assert!(pixels.iter().any(|&(px, _)| px == x), "column {x} of {from:?}-{to:?}");
            }
            let pixels = set_pixels(&backward);
            assert!(pixels.contains(&(from.x, from.y)), "{to:?}-{from:?}");
            assert!(pixels.contains(&(to.x, to.y)), "{to:?}-{from:?}");
        }
    }

    #[test]
    fn test_line_profile_with_far_end_point() {
        let profile = line_profile(Point::new(0, 10), Point::new(10, Coord::MIN));
        let (start, end) = profile(0);
        assert_eq!(start, 10);
        assert!(end < 0);
        assert!(profile(10).1 >= Coord::MIN / 2);

        let profile = line_profile(
            Point::new(Coord::MIN, Coord::MIN),
            Point::new(Coord::MAX, Coord::MAX),
        );
        let (start, end) = profile(0);
        assert!(start <= end, "{start} {end}");

        let mut g = grid(4, 4);
        stroke(
            &mut g,
            palette::WHITE,
            Rect::new(Point::new(0, 10), Point::new(5, Coord::MIN)),
            line_profile(Point::new(0, 10), Point::new(5, Coord::MIN)),
            TerminalOp::Over,
        );
        for y in 0..=10 {
            assert!(is_set(&g, 0, y), "{y}");
        }
        assert!(!is_set(&g, 1, 5));
    }

    #[test]
    fn test_horizontal_and_vertical_lines() {
        let mut g = grid(10, 5);
        let (from, to) = (Point::new(2, 7), Point::new(12, 7));
        stroke(&mut g, palette::WHITE, Rect::new(from, to), line_profile(from, to), TerminalOp::Over);
        let expected: Vec<_> = (2..=12).map(|x| (x, 7)).collect();
        assert_eq!(set_pixels(&g), expected);

        let mut g = grid(10, 5);
        let (from, to) = (Point::new(5, 3), Point::new(5, 16));
        stroke(&mut g, palette::WHITE, Rect::new(from, to), line_profile(from, to), TerminalOp::Over);
        let expected: Vec<_> = (3..=16).map(|y| (5, y)).collect();
        assert_eq!(set_pixels(&g), expected);
    }

    #[test]
    fn test_fill_predicate_and_bounds() {
        let mut g = grid(4, 2);
        let rect = Rect::new(Point::new(6, 6), Point::new(1, 1));
        fill(&mut g, palette::BLUE, rect, |p| (p.x + p.y) % 2 == 0, TerminalOp::Over);

        let pixels = set_pixels(&g);
        assert!(!pixels.is_empty());
        for (x, y) in pixels.iter().copied() {
            assert!((1..=6).contains(&x) && (1..=6).contains(&y));
            assert_eq!((x + y) % 2, 0);
        }
        assert_eq!(pixels.len(), 18);
    }

    #[test]
    fn test_fill_outside_grid_is_ignored() {
        let mut g = grid(2, 1);
        fill(&mut g, palette::BLUE, Rect::new(Point::new(-4, -4), Point::new(1, 1)), |_| true, TerminalOp::Over);
        assert_eq!(set_pixels(&g), vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
        fill(&mut g, palette::BLUE, Rect::new(Point::new(10, 10), Point::new(20, 20)), |_| true, TerminalOp::Over);
        assert_eq!(set_pixels(&g).len(), 4);
    }

    #[test]
    fn test_clear_rect() {
        let mut g = grid(4, 2);
        fill(&mut g, palette::BLUE, Rect::new(Point::new(0, 0), Point::new(7, 7)), |_| true, TerminalOp::Over);
        clear_rect(&mut g, Rect::new(Point::new(5, 6), Point::new(2, 1)));

        for y in 0..8 {
            for x in 0..8 {
                let cleared = (2..=5).contains(&x) && (1..=6).contains(&y);
                assert_eq!(is_set(&g, x, y), !cleared, "({x}, {y})");
            }
        }
        // colors of untouched sub-pixels survive
        assert_eq!(g[(0, 0)].color, palette::BLUE);
    }

    #[test]
    fn test_ellipse_center() {
        // odd span: exact middle
        let e = Ellipse::new(Rect::new(Point::new(0, 0), Point::new(10, 6)));
        assert_eq!(e.center(), Point::new(5, 3));
        // even span: last sub-pixel of the first half
        let e = Ellipse::new(Rect::new(Point::new(2, 4), Point::new(9, 11)));
        assert_eq!(e.center(), Point::new(5, 7));
    }

    #[test]
    fn test_ellipse_quadrants_partition_the_box() {
        let bounds = Rect::new(Point::new(1, 2), Point::new(12, 9));
        let e = Ellipse::new(bounds);
        let rects: Vec<_> = Quadrant::ALL.iter().filter_map(|q| e.quadrant_rect(*q)).collect();
        assert_eq!(rects.len(), 4);

        for y in 2..=9 {
            for x in 1..=12 {
                let owners = rects
                    .iter()
                    .filter(|r| x >= r.p1.x && x <= r.p2.x && y >= r.p1.y && y <= r.p2.y)
                    .count();
                assert_eq!(owners, 1, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_thin_ellipse_has_no_right_quadrants() {
        let e = Ellipse::new(Rect::new(Point::new(3, 0), Point::new(3, 8)));
        assert!(e.quadrant_rect(Quadrant::TopRight).is_none());
        assert!(e.quadrant_rect(Quadrant::BottomRight).is_none());
        assert!(e.quadrant_rect(Quadrant::TopLeft).is_some());
    }

    #[test]
    fn test_ellipse_inside_test() {
        let e = Ellipse::new(Rect::new(Point::new(0, 0), Point::new(14, 14)));
        let c = e.center();
        assert_eq!(c, Point::new(7, 7));
        assert!(e.inside(Quadrant::TopLeft, Point::new(6, 6)));
        assert!(e.inside(Quadrant::BottomRight, Point::new(8, 8)));
        assert!(!e.inside(Quadrant::TopLeft, Point::new(0, 0)));
        assert!(!e.inside(Quadrant::BottomRight, Point::new(14, 14)));
        assert!(!e.inside(Quadrant::TopRight, Point::new(14, 0)));
    }
}
