//! Grid points and inclusive rectangles
//!
//! A [`Rect`] covers every cell from `left..=right` and `top..=bottom`.
//! Two rooms that share a wall overlap on that wall, so their intersection
//! is a degenerate rectangle whose zero span tells which side touched.

use serde::{Deserialize, Serialize};

/// A cell on the level grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Point shifted by `(dx, dy)`
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Squared Euclidean distance
    pub const fn dist_sq(self, other: Point) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with inclusive bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left x coordinate
    pub left: i32,
    /// Top y coordinate
    pub top: i32,
    /// Right x coordinate
    pub right: i32,
    /// Bottom y coordinate
    pub bottom: i32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Zero-size rectangle at a single point
    pub const fn at(p: Point) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    /// Number of columns covered (`right - left + 1`)
    pub const fn width(&self) -> i32 {
        self.right - self.left + 1
    }

    /// Number of rows covered (`bottom - top + 1`)
    pub const fn height(&self) -> i32 {
        self.bottom - self.top + 1
    }

    /// Horizontal coordinate span (`right - left`); zero for a vertical line
    pub const fn span_x(&self) -> i32 {
        self.right - self.left
    }

    /// Vertical coordinate span (`bottom - top`); zero for a horizontal line
    pub const fn span_y(&self) -> i32 {
        self.bottom - self.top
    }

    /// True when the rectangle covers no cell
    pub const fn is_empty(&self) -> bool {
        self.right < self.left || self.bottom < self.top
    }

    /// Overlap of two rectangles.
    ///
    /// Rectangles touching along an edge give a zero-span result that
    /// still carries the edge position. Disjoint rectangles give an
    /// empty rectangle (see [`Rect::is_empty`]).
    pub fn intersect(&self, other: &Rect) -> Rect {
        Rect {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        }
    }

    /// Check if point lies inside or on the border
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// Check if point lies strictly inside, off the border
    pub const fn inside(&self, p: Point) -> bool {
        p.x > self.left && p.x < self.right && p.y > self.top && p.y < self.bottom
    }

    /// Every covered point, row by row
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (self.top..=self.bottom).flat_map(move |y| (self.left..=self.right).map(move |x| Point::new(x, y)))
    }

    /// Points on the rectangle's border.
    ///
    /// For a degenerate (line or point) rectangle this is every point.
    pub fn border_points(&self) -> Vec<Point> {
        if self.is_empty() {
            return Vec::new();
        }

        let mut points = Vec::with_capacity((2 * (self.width() + self.height())) as usize);
        for x in self.left..=self.right {
            points.push(Point::new(x, self.top));
            if self.bottom != self.top {
                points.push(Point::new(x, self.bottom));
            }
        }
        for y in self.top + 1..self.bottom {
            points.push(Point::new(self.left, y));
            if self.right != self.left {
                points.push(Point::new(self.right, y));
            }
        }
        points
    }

    /// Rectangle shrunk by `n` cells on every side
    pub const fn shrink(&self, n: i32) -> Rect {
        Rect::new(self.left + n, self.top + n, self.right - n, self.bottom - n)
    }
}
