//! Points, sizes and rectangles in sub-pixel and real coordinates.
//!
//! The integer variants ([`Point`], [`Size`], [`Rect`]) address sub-pixels of a canvas,
//! the float variants ([`Pointf`], [`Sizef`], [`Rectf`]) are used by the real-coordinate
//! mapper.
//!
//! Rectangles are given by two corner points `p1` and `p2`. Drawing operations treat both
//! corners as inclusive, while [`GenericRect::contains`] is half-open. Several operations are
//! only meaningful on *sorted* rectangles (`p1 <= p2` componentwise), see [`GenericRect::sorted`].

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

/// Integer coordinate type for sub-pixel positions.
pub type Coord = i64;

/// A 2D point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenericPoint<T> {
    pub x: T,
    pub y: T,
}

pub type Point = GenericPoint<Coord>;
pub type Pointf = GenericPoint<f32>;

/// Sizes share the representation of points.
pub type GenericSize<T> = GenericPoint<T>;
pub type Size = GenericSize<Coord>;
pub type Sizef = GenericSize<f32>;

impl<T> GenericPoint<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: PartialOrd + Copy> GenericPoint<T> {
    /// Clamps both components into `[min, max]`.
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self {
            x: clamp_partial(self.x, min.x, max.x),
            y: clamp_partial(self.y, min.y, max.y),
        }
    }
}

fn clamp_partial<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

fn minmax<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

impl Pointf {
    /// Euclidean length of the vector.
    pub fn abs(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Pointf) -> f32 {
        (other - self).abs()
    }
}

impl From<Point> for Pointf {
    fn from(p: Point) -> Self {
        Pointf::new(p.x as f32, p.y as f32)
    }
}

impl<T: Add<Output = T>> Add for GenericPoint<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Sub<Output = T>> Sub for GenericPoint<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Mul<Output = T> + Copy> Mul<T> for GenericPoint<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl<T: Div<Output = T> + Copy> Div<T> for GenericPoint<T> {
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl<T: Add<Output = T> + Copy> AddAssign for GenericPoint<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Sub<Output = T> + Copy> SubAssign for GenericPoint<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

/// An axis-aligned rectangle given by two corners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenericRect<T> {
    pub p1: GenericPoint<T>,
    pub p2: GenericPoint<T>,
}

pub type Rect = GenericRect<Coord>;
pub type Rectf = GenericRect<f32>;

impl<T> GenericRect<T> {
    pub const fn new(p1: GenericPoint<T>, p2: GenericPoint<T>) -> Self {
        Self { p1, p2 }
    }
}

impl<T: PartialOrd + Copy + Default + Sub<Output = T>> GenericRect<T> {
    /// A rectangle spanning from the origin to `size`.
    pub fn from_size(size: GenericSize<T>) -> Self {
        Self::new(GenericPoint::default(), size)
    }

    /// Returns the rectangle with `p1 <= p2` in both components.
    pub fn sorted(self) -> Self {
        let (x1, x2) = minmax(self.p1.x, self.p2.x);
        let (y1, y2) = minmax(self.p1.y, self.p2.y);
        Self::new(GenericPoint::new(x1, y1), GenericPoint::new(x2, y2))
    }

    /// Swaps the corners if they are out of order horizontally.
    pub fn sorted_x(self) -> Self {
        if self.p1.x > self.p2.x {
            Self::new(self.p2, self.p1)
        } else {
            self
        }
    }

    /// Swaps the corners if they are out of order vertically.
    pub fn sorted_y(self) -> Self {
        if self.p1.y > self.p2.y {
            Self::new(self.p2, self.p1)
        } else {
            self
        }
    }

    pub fn is_sorted(&self) -> bool {
        self.p1.x <= self.p2.x && self.p1.y <= self.p2.y
    }

    /// Absolute extents of the rectangle.
    pub fn size(&self) -> GenericSize<T> {
        let (x1, x2) = minmax(self.p1.x, self.p2.x);
        let (y1, y2) = minmax(self.p1.y, self.p2.y);
        GenericPoint::new(x2 - x1, y2 - y1)
    }

    /// Half-open containment test: `p1 <= p < p2`.
    ///
    /// Only defined for sorted rectangles.
    pub fn contains(&self, p: GenericPoint<T>) -> bool {
        debug_assert!(self.is_sorted(), "contains() called on an unsorted rect");
        p.x >= self.p1.x && p.x < self.p2.x && p.y >= self.p1.y && p.y < self.p2.y
    }

    /// Whether `r` lies entirely within `self`. Only defined for sorted rectangles.
    pub fn contains_rect(&self, r: &Self) -> bool {
        debug_assert!(self.is_sorted(), "contains_rect() called on an unsorted rect");
        r.p1.x >= self.p1.x && r.p2.x <= self.p2.x && r.p1.y >= self.p1.y && r.p2.y <= self.p2.y
    }

    /// Clamps both corners into `bounds`.
    pub fn clamp(self, bounds: Self) -> Self {
        Self::new(
            self.p1.clamp(bounds.p1, bounds.p2),
            self.p2.clamp(bounds.p1, bounds.p2),
        )
    }
}

impl<T: Add<Output = T> + Copy> Add<GenericPoint<T>> for GenericRect<T> {
    type Output = Self;

    fn add(self, rhs: GenericPoint<T>) -> Self {
        Self::new(self.p1 + rhs, self.p2 + rhs)
    }
}

impl<T: Sub<Output = T> + Copy> Sub<GenericPoint<T>> for GenericRect<T> {
    type Output = Self;

    fn sub(self, rhs: GenericPoint<T>) -> Self {
        Self::new(self.p1 - rhs, self.p2 - rhs)
    }
}
