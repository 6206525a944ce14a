//! Plane geometry shared by the viewer and the editor.
//!
//! Everything here is coordinate-system agnostic: callers decide whether a
//! [`Point`] is in SVG user units, editor display units, or screen pixels.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in SVG, display, or screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Whether both coordinates are within `eps` of `other`.
    #[must_use]
    pub fn approx_eq(self, other: Point, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Smallest box containing every point, or `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self { min_x: first.x, min_y: first.y, max_x: first.x, max_y: first.y };
        for p in &points[1..] {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) * 0.5, (self.min_y + self.max_y) * 0.5)
    }

    /// Grow this box to also cover `other`.
    #[must_use]
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Even-odd ray-casting test of `pt` against the implicitly closed `ring`.
///
/// Boundary convention (half-open crossing rule): for an axis-aligned box,
/// points on the min-x and min-y edges are inside, points on the max-x and
/// max-y edges are outside. Rings with fewer than three vertices contain
/// nothing.
#[must_use]
pub fn point_in_polygon(pt: Point, ring: &[Point]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[j];
        if (a.y > pt.y) != (b.y > pt.y) {
            let x_cross = (b.x - a.x) * (pt.y - a.y) / (b.y - a.y) + a.x;
            if pt.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Shift every point by `(dx, dy)` in place.
pub fn translate(points: &mut [Point], dx: f64, dy: f64) {
    for p in points {
        p.x += dx;
        p.y += dy;
    }
}

/// Snap `candidate` so the segment from `prev` is perfectly horizontal or
/// vertical, keeping whichever axis has the larger delta.
#[must_use]
pub fn axis_lock(prev: Point, candidate: Point) -> Point {
    let dx = (candidate.x - prev.x).abs();
    let dy = (candidate.y - prev.y).abs();
    if dx >= dy {
        Point::new(candidate.x, prev.y)
    } else {
        Point::new(prev.x, candidate.y)
    }
}

/// Mirror points across the horizontal line `y = height / 2`.
///
/// Converts between SVG (y down from the top of the document) and display
/// coordinates. Applying it twice with the same height is the identity.
#[must_use]
pub fn flip_y(points: &[Point], height: f64) -> Vec<Point> {
    points.iter().map(|p| Point::new(p.x, height - p.y)).collect()
}
