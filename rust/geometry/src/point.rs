// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Points and displacement vectors.
//!
//! Coordinates are compared with an absolute tolerance ([`EPSILON`]) because
//! trimming and translating lines accumulates rounding error. A point also
//! carries the index it has in its part's vertex table; the index is ignored
//! by equality.

use std::fmt;
use std::ops::{Add, Sub};

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Absolute tolerance for coordinate comparison.
pub const EPSILON: f64 = 1e-6;

/// Pure displacement `(dx, dy)`.
pub type Vector = Vector2<f64>;

/// Checks the two values are the same within [`EPSILON`].
#[inline]
pub fn is_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Rounds to the given number of decimals.
#[inline]
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (value * f).round() / f
}

/// A 2D point with its vertex index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Index in the owning part's vertex table, `-1` when unassigned.
    pub index: i32,
}

impl Point {
    /// Creates a point without an index.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, index: -1 }
    }

    /// Creates a point with the given vertex index.
    pub const fn indexed(x: f64, y: f64, index: i32) -> Self {
        Self { x, y, index }
    }

    /// The "unset" sentinel: NaN coordinates, no index.
    pub const fn unset() -> Self {
        Self::new(f64::NAN, f64::NAN)
    }

    /// Returns true if both ordinates hold real values.
    pub fn is_set(&self) -> bool {
        !self.x.is_nan() && !self.y.is_nan()
    }

    /// Copy of the point with a different index.
    pub fn with_index(self, index: i32) -> Self {
        Self { index, ..self }
    }

    pub fn coords(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn from_coords(p: Point2<f64>) -> Self {
        Self::new(p.x, p.y)
    }

    /// Returns true if the coordinates match within [`EPSILON`].
    pub fn coincides(&self, other: &Point) -> bool {
        is_equal(self.x, other.x) && is_equal(self.y, other.y)
    }

    /// Angle of the direction towards `p`, in degrees within `[0, 360)`.
    ///
    /// Rounded to two decimals so that axis-aligned directions come out as
    /// exactly 0, 90, 180 or 270.
    pub fn angle_to(&self, p: &Point) -> f64 {
        let angle = round_to((p.y - self.y).atan2(p.x - self.x).to_degrees(), 2);
        let angle = if angle < 0.0 { 360.0 + angle } else { angle };
        if angle >= 360.0 {
            angle - 360.0
        } else {
            angle
        }
    }

    pub fn distance_to(&self, p: &Point) -> f64 {
        (p.coords() - self.coords()).norm()
    }

    /// Perpendicular distance to the infinite line through `a` and `b`.
    pub fn dist_to_line(&self, a: &Point, b: &Point) -> f64 {
        self.distance_to(&self.snapped_to_line(a, b))
    }

    /// Closest point on the infinite line through `a` and `b`.
    ///
    /// If `a` and `b` coincide this returns `a`.
    pub fn snapped_to_line(&self, a: &Point, b: &Point) -> Point {
        let d = b.coords() - a.coords();
        let len_sq = d.norm_squared();
        if len_sq == 0.0 {
            return *a;
        }
        // Parameter of the foot of the perpendicular along a..b
        let t = (self.coords() - a.coords()).dot(&d) / len_sq;
        Point::from_coords(a.coords() + d * t)
    }

    /// Moves the point by `distance` in the direction `theta` (degrees).
    ///
    /// The moved point is a new vertex, so it carries no index.
    pub fn radial_moved(&self, distance: f64, theta: f64) -> Point {
        let (sin, cos) = theta.to_radians().sin_cos();
        Point::new(self.x + distance * cos, self.y + distance * sin)
    }

    /// Translation by `v`, keeping the index.
    pub fn translated(&self, v: Vector) -> Point {
        *self + v
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::unset()
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.coincides(other)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, v: Vector) -> Point {
        Point::indexed(self.x + v.x, self.y + v.y, self.index)
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        self.coords() - rhs.coords()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.9},{:.9}", self.x, self.y)
    }
}
