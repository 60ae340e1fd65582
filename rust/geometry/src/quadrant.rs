// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Quadrant classification and the direction tables built on it.
//!
//! The bend assists pick offset directions from a handful of discrete cases
//! (which side of the part centroid a vertex lies on). Those cases live here
//! as small pure functions so every sign combination can be tested on its own.

use serde::{Deserialize, Serialize};

use crate::point::{Point, Vector};

/// Quadrant of a point around a reference point.
///
/// ```text
///   II  |  I
///  -----+-----
///  III  |  IV
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    I,
    II,
    III,
    IV,
}

impl Quadrant {
    /// Quadrant of `p` around `reference`; `None` if `p` lies on either axis.
    pub fn of(p: &Point, reference: &Point) -> Option<Self> {
        let (cx, cy) = (reference.x, reference.y);
        if cx < p.x && cy < p.y {
            Some(Self::I)
        } else if cx > p.x && cy < p.y {
            Some(Self::II)
        } else if cx > p.x && cy > p.y {
            Some(Self::III)
        } else if cx < p.x && cy > p.y {
            Some(Self::IV)
        } else {
            None
        }
    }
}

/// Unit signs `(sx, sy)` pointing from `p` towards `reference`.
///
/// A coordinate equal to the reference counts as "past" it and yields `-1`.
pub fn toward(p: &Point, reference: &Point) -> (f64, f64) {
    let sx = if p.x < reference.x { 1.0 } else { -1.0 };
    let sy = if p.y < reference.y { 1.0 } else { -1.0 };
    (sx, sy)
}

/// Displacements that turn a sharp inner corner into a relief notch.
///
/// `v1..v3` are added to the corner vertex to get the relief chain
/// `P1 -> P2 -> P3`; `end_trim` moves the end of the incoming line onto `P1`
/// and `start_trim` moves the start of the outgoing line onto `P3`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReliefOffsets {
    pub v1: Vector,
    pub v2: Vector,
    pub v3: Vector,
    pub end_trim: Vector,
    pub start_trim: Vector,
}

impl ReliefOffsets {
    fn negated(self) -> Self {
        Self {
            v1: -self.v1,
            v2: -self.v2,
            v3: -self.v3,
            end_trim: -self.end_trim,
            start_trim: -self.start_trim,
        }
    }
}

/// Corner relief table for a corner in the given quadrant.
///
/// Quadrants I and III share one shape, II and IV the mirrored one; III and
/// IV are the negations of I and II.
pub fn corner_relief_offsets(quadrant: Quadrant, half: f64) -> ReliefOffsets {
    let first = ReliefOffsets {
        v1: Vector::new(half, 0.0),
        v2: Vector::new(-half, -half),
        v3: Vector::new(0.0, half),
        end_trim: Vector::new(half, 0.0),
        start_trim: Vector::new(0.0, half),
    };
    let second = ReliefOffsets {
        v1: Vector::new(0.0, half),
        v2: Vector::new(half, -half),
        v3: Vector::new(-half, 0.0),
        end_trim: Vector::new(0.0, half),
        start_trim: Vector::new(-half, 0.0),
    };
    match quadrant {
        Quadrant::I => first,
        Quadrant::II => second,
        Quadrant::III => first.negated(),
        Quadrant::IV => second.negated(),
    }
}
