#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All values are logical points (`f32`). Row frames live in content
//! coordinates; pointer positions live in viewport coordinates. The
//! conversion between the two is a translation by the content offset.

use serde::{Deserialize, Serialize};

/// A 2D position in logical points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Translate by a vector.
    #[inline]
    #[must_use]
    pub fn offset(self, by: Vector) -> Self {
        Self::new(self.x + by.dx, self.y + by.dy)
    }

    /// Vector pointing from `other` to `self`.
    #[inline]
    #[must_use]
    pub fn vector_from(self, other: Self) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        self.vector_from(other).length()
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// A 2D displacement in logical points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub dx: f32,
    pub dy: f32,
}

impl Vector {
    /// Zero displacement.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new vector.
    #[inline]
    #[must_use]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Euclidean length.
    #[inline]
    #[must_use]
    pub fn length(self) -> f32 {
        self.dx.hypot(self.dy)
    }

    /// The vector pointing the opposite way.
    #[inline]
    #[must_use]
    pub fn negated(self) -> Self {
        Self::new(-self.dx, -self.dy)
    }
}

/// An axis-aligned rectangle.
///
/// Edges follow the half-open convention: `top` is inclusive, `bottom` is
/// exclusive, so adjacent rows never both contain the same y.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f32,
    /// Top edge (inclusive).
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    #[must_use]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Top edge (alias for y).
    #[inline]
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Vertical midpoint. This is the swap boundary for reordering.
    #[inline]
    #[must_use]
    pub fn mid_y(&self) -> f32 {
        self.y + self.height * 0.5
    }

    /// Center point.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.mid_y())
    }

    /// Check if the rectangle has no area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && self.contains_y(point.y)
    }

    /// Check if a y coordinate falls inside the vertical span.
    #[inline]
    #[must_use]
    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.y && y < self.bottom()
    }

    /// The same rectangle shifted by a vector.
    #[inline]
    #[must_use]
    pub fn translated(&self, by: Vector) -> Self {
        Self::new(self.x + by.dx, self.y + by.dy, self.width, self.height)
    }

    /// The same size, re-centered on `center`.
    #[must_use]
    pub fn centered_at(&self, center: Point) -> Self {
        Self::new(
            center.x - self.width * 0.5,
            center.y - self.height * 0.5,
            self.width,
            self.height,
        )
    }
}
