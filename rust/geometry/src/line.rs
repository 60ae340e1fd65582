// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line segments of a flat pattern.
//!
//! A [`Line`] is either a segment of the part's closed contour (a profile
//! line) or a fold line carrying [`BendLineInfo`]. Lines are immutable:
//! [`Line::translated`] and [`Line::trimmed`] return new lines of the same
//! kind with the same index.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bound::Bound;
use crate::point::{Point, Vector};

/// Half width of the envelope returned by [`Line::bound`].
pub const BOUND_MARGIN: f64 = 2.0;

/// Orientation of a line, derived from its angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Angle 0 or 180
    Horizontal,
    /// Angle 90 or 270
    Vertical,
    Inclined,
}

/// Fold parameters of a bend line.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BendLineInfo {
    /// Bend angle in degrees
    pub angle: f64,
    /// Inner bend radius
    pub radius: f64,
    /// Material length correction for folding at this angle/radius
    pub deduction: f64,
}

impl BendLineInfo {
    pub const fn new(angle: f64, radius: f64, deduction: f64) -> Self {
        Self {
            angle,
            radius,
            deduction,
        }
    }
}

/// What a line represents in the part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LineKind {
    /// Contour segment; `selected` is set by an interactive collaborator.
    Profile { selected: bool },
    /// Fold line
    Bend(BendLineInfo),
}

/// A straight segment with an index in its owning list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    start: Point,
    end: Point,
    index: i32,
    kind: LineKind,
}

impl Line {
    /// Creates an unselected profile line.
    pub fn profile(start: Point, end: Point, index: i32) -> Self {
        Self {
            start,
            end,
            index,
            kind: LineKind::Profile { selected: false },
        }
    }

    /// Creates a bend line.
    pub fn bend(start: Point, end: Point, index: i32, info: BendLineInfo) -> Self {
        Self {
            start,
            end,
            index,
            kind: LineKind::Bend(info),
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Position of the line within its ordered list.
    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    pub fn is_bend(&self) -> bool {
        matches!(self.kind, LineKind::Bend(_))
    }

    pub fn is_profile(&self) -> bool {
        matches!(self.kind, LineKind::Profile { .. })
    }

    /// Bend parameters, `None` for profile lines.
    pub fn bend_info(&self) -> Option<BendLineInfo> {
        match self.kind {
            LineKind::Bend(info) => Some(info),
            LineKind::Profile { .. } => None,
        }
    }

    /// Selection flag; always false for bend lines.
    pub fn is_selected(&self) -> bool {
        matches!(self.kind, LineKind::Profile { selected: true })
    }

    /// Copy with the selection flag set. Bend lines are returned unchanged.
    pub fn selected(self, selected: bool) -> Self {
        match self.kind {
            LineKind::Profile { .. } => Self {
                kind: LineKind::Profile { selected },
                ..self
            },
            LineKind::Bend(_) => self,
        }
    }

    pub fn with_index(self, index: i32) -> Self {
        Self { index, ..self }
    }

    /// Same kind and index with new end points.
    pub fn with_points(self, start: Point, end: Point) -> Self {
        Self { start, end, ..self }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Angle from start to end in degrees, `[0, 360)`.
    pub fn angle(&self) -> f64 {
        self.start.angle_to(&self.end)
    }

    pub fn orientation(&self) -> Orientation {
        let angle = self.angle();
        if angle == 0.0 || angle == 180.0 {
            Orientation::Horizontal
        } else if angle == 90.0 || angle == 270.0 {
            Orientation::Vertical
        } else {
            Orientation::Inclined
        }
    }

    /// Axis-aligned box around the segment, [`BOUND_MARGIN`] on either side.
    pub fn bound(&self) -> Bound {
        let theta = self.angle();
        let (t1, t2) = (theta + 90.0, theta - 90.0);
        let corners = [
            self.start.radial_moved(BOUND_MARGIN, t1),
            self.start.radial_moved(BOUND_MARGIN, t2),
            self.end.radial_moved(BOUND_MARGIN, t1),
            self.end.radial_moved(BOUND_MARGIN, t2),
        ];
        Bound::from_points(&corners)
    }

    /// Shifts the whole line by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let v = Vector::new(dx, dy);
        self.with_points(self.start + v, self.end + v)
    }

    /// Moves the start point by `start` and the end point by `end`.
    ///
    /// Point indices are kept.
    pub fn trimmed(&self, start: Vector, end: Vector) -> Self {
        self.with_points(self.start + start, self.end + end)
    }

    /// Returns true if `p` coincides with either end point.
    pub fn has_vertex(&self, p: &Point) -> bool {
        self.start.coincides(p) || self.end.coincides(p)
    }

    /// Returns true if the end points coincide.
    pub fn is_degenerate(&self) -> bool {
        self.start.coincides(&self.end)
    }

    /// Returns true if both lines join the same points in the same direction.
    pub fn is_duplicate_of(&self, other: &Line) -> bool {
        self.start.coincides(&other.start) && self.end.coincides(&other.end)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, [{}]", self.start, self.end, self.index)
    }
}

/// Profile lines joining consecutive points, all with the same index.
///
/// The caller renumbers the lines once they are placed in a contour.
pub fn connected_chain(index: i32, points: &[Point]) -> Vec<Line> {
    points
        .windows(2)
        .map(|w| Line::profile(w[0], w[1], index))
        .collect()
}

/// Lines of `lines` that touch `p`.
pub fn connected_lines<'a>(p: &Point, lines: &'a [Line]) -> Vec<&'a Line> {
    lines.iter().filter(|l| l.has_vertex(p)).collect()
}
