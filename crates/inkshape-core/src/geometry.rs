//! Point and vector arithmetic.
//!
//! A [`Point`] is a sampled position that may carry pen metadata; a
//! [`Vector`] is a bare displacement. Metadata never flows into the math.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Displacement between two points.
pub type Vector = Vector2<f64>;

/// A sampled pointer position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Pen pressure in `[0, 1]`, when the input device reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// Capture time in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl Point {
    pub const ORIGIN: Point = Point::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            pressure: None,
            timestamp: None,
        }
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure.clamp(0.0, 1.0));
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Position only, as an `nalgebra` point.
    #[inline]
    pub fn position(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    /// Drop pressure and timestamp.
    #[inline]
    pub fn bare(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<Point2<f64>> for Point {
    fn from(p: Point2<f64>) -> Self {
        Point::new(p.x, p.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Axis-aligned bounding box; `width` and `height` are never negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Zero-sized box anchored at `p`.
    pub fn at(p: &Point) -> Self {
        Self {
            x: p.x,
            y: p.y,
            width: 0.0,
            height: 0.0,
        }
    }

    #[inline]
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    #[inline]
    pub fn max_side(&self) -> f64 {
        self.width.max(self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + 0.5 * self.width, self.y + 0.5 * self.height)
    }
}

#[inline]
pub fn distance(p1: &Point, p2: &Point) -> f64 {
    distance_squared(p1, p2).sqrt()
}

#[inline]
pub fn distance_squared(p1: &Point, p2: &Point) -> f64 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    dx * dx + dy * dy
}

pub fn midpoint(p1: &Point, p2: &Point) -> Point {
    Point::new(0.5 * (p1.x + p2.x), 0.5 * (p1.y + p2.y))
}

/// Affine interpolation; `t` is not clamped.
pub fn lerp(p1: &Point, p2: &Point, t: f64) -> Point {
    Point::new(p1.x + (p2.x - p1.x) * t, p1.y + (p2.y - p1.y) * t)
}

#[inline]
pub fn vector_from_points(from: &Point, to: &Point) -> Vector {
    Vector::new(to.x - from.x, to.y - from.y)
}

#[inline]
pub fn magnitude(v: &Vector) -> f64 {
    v.norm()
}

/// Unit vector along `v`; the zero vector maps to itself.
pub fn normalize(v: &Vector) -> Vector {
    let mag = magnitude(v);
    if mag == 0.0 {
        return Vector::zeros();
    }
    v / mag
}

#[inline]
pub fn dot(v1: &Vector, v2: &Vector) -> f64 {
    v1.dot(v2)
}

/// z-component of the 3D cross product.
#[inline]
pub fn cross(v1: &Vector, v2: &Vector) -> f64 {
    v1.perp(v2)
}

/// Unsigned angle in `[0, π]`. Zero when either vector has no length.
pub fn angle_between(v1: &Vector, v2: &Vector) -> f64 {
    let mag1 = magnitude(v1);
    let mag2 = magnitude(v2);
    if mag1 == 0.0 || mag2 == 0.0 {
        return 0.0;
    }
    // rounding can push the cosine just past ±1
    let cos_angle = (dot(v1, v2) / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos()
}

/// Signed angle from the +x axis, in `(-π, π]`.
#[inline]
pub fn vector_angle(v: &Vector) -> f64 {
    v.y.atan2(v.x)
}

#[inline]
pub fn to_degrees(radians: f64) -> f64 {
    radians * (180.0 / PI)
}

#[inline]
pub fn to_radians(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

/// Wrap an angle to `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}
