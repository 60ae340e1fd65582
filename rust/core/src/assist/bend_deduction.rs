// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bend deduction: shrinks the flat pattern by the material each fold
//! stretches.
//!
//! The bend lines are grouped into levels (collinear bend lines form one
//! level whose deduction is the largest of its lines). Every point of the
//! part then moves by the deductions of the levels it lies beyond. A bend
//! line on a level moves by half that level's deduction, while a profile
//! point on a level stays with the base side, so an edge collinear with a
//! shorter bend line keeps its place. Because the displacement depends only
//! on a point's coordinates, coincident points move together and the contour
//! stays closed.

use bend_assist_geometry::{is_equal, Line, Orientation, Point, Vector};
use serde::{Deserialize, Serialize};

use super::{processed, BendAssist};
use crate::error::{AssistError, Result};
use crate::part::{AssistKind, Part, ProcessedPart};

/// How the total deduction is distributed over the part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeductionAlgorithm {
    /// Outer halves of the bend lines move towards the middle of the part.
    /// Handles horizontal and vertical bend lines.
    #[default]
    EquallyDistributed,
    /// Everything below the centroid moves up by the total deduction.
    /// Horizontal bend lines only.
    PartiallyDistributed,
}

impl DeductionAlgorithm {
    /// Parses `equal` / `partial` and the full variant names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "equal" | "equally-distributed" | "equallydistributed" => Some(Self::EquallyDistributed),
            "partial" | "partially-distributed" | "partiallydistributed" => {
                Some(Self::PartiallyDistributed)
            }
            _ => None,
        }
    }
}

/// Applies the bend deduction of every bend line to the profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BendDeduction {
    pub algorithm: DeductionAlgorithm,
}

impl BendDeduction {
    pub fn new(algorithm: DeductionAlgorithm) -> Self {
        Self { algorithm }
    }
}

impl BendAssist for BendDeduction {
    fn kind(&self) -> AssistKind {
        AssistKind::BendDeduction
    }

    fn execute(&self, part: &Part) -> Result<ProcessedPart> {
        let _span = tracing::debug_span!(
            "bend_deduction",
            algorithm = ?self.algorithm,
            plines = part.plines().len(),
            bend_lines = part.bend_lines().len()
        )
        .entered();

        let (plines, bend_lines) = match self.algorithm {
            DeductionAlgorithm::EquallyDistributed => equally_distributed(part),
            DeductionAlgorithm::PartiallyDistributed => partially_distributed(part),
        }
        .ok_or_else(|| AssistError::inapplicable(AssistKind::BendDeduction))?;

        processed(plines, bend_lines, 0.0, AssistKind::BendDeduction)
    }
}

/// A set of collinear bend lines.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Level {
    /// Y of a horizontal level, X of a vertical one
    at: f64,
    deduction: f64,
}

/// Sorted levels of the bend lines with the given orientation.
fn levels(bend_lines: &[Line], orientation: Orientation) -> Vec<Level> {
    let mut levels: Vec<Level> = bend_lines
        .iter()
        .filter(|l| l.orientation() == orientation)
        .filter_map(|l| {
            let info = l.bend_info()?;
            let at = match orientation {
                Orientation::Vertical => l.start().x,
                _ => l.start().y,
            };
            Some(Level {
                at,
                deduction: info.deduction,
            })
        })
        .collect();
    levels.sort_by(|a, b| a.at.total_cmp(&b.at));

    let mut merged: Vec<Level> = Vec::with_capacity(levels.len());
    for level in levels {
        match merged.last_mut() {
            Some(last) if is_equal(last.at, level.at) => {
                last.deduction = last.deduction.max(level.deduction);
            }
            _ => merged.push(level),
        }
    }
    merged
}

/// Displacement along one axis.
///
/// Levels in `rising` pull everything below them up; levels in `falling`
/// pull everything above them down.
#[derive(Debug, Clone, Default)]
struct AxisField {
    rising: Vec<Level>,
    falling: Vec<Level>,
}

impl AxisField {
    /// Splits sorted levels at their midpoint; the lower half rises and the
    /// upper half falls, leaving the band between them fixed.
    fn split(levels: Vec<Level>) -> Self {
        let mut rising = levels;
        let falling = rising.split_off(rising.len() / 2);
        Self { rising, falling }
    }

    /// Displacement of a bend line lying at `c`. A bend line on a level
    /// moves by half of that level's deduction.
    fn displacement(&self, c: f64) -> f64 {
        self.sum(c, 0.5)
    }

    /// Displacement of a profile point at `c`. A profile point on a level
    /// stays with the base side of that level.
    fn profile_displacement(&self, c: f64) -> f64 {
        self.sum(c, 0.0)
    }

    fn sum(&self, c: f64, on_level: f64) -> f64 {
        let up: f64 = self
            .rising
            .iter()
            .map(|l| share(c, l, on_level, |c, at| c < at))
            .sum();
        let down: f64 = self
            .falling
            .iter()
            .map(|l| share(c, l, on_level, |c, at| c > at))
            .sum();
        up - down
    }

    fn total(&self) -> f64 {
        self.rising
            .iter()
            .chain(&self.falling)
            .map(|l| l.deduction)
            .sum()
    }
}

/// Part of a level's deduction that applies at coordinate `c`.
///
/// `on_level` is the fraction applied when `c` lies on the level itself.
fn share(c: f64, level: &Level, on_level: f64, beyond: impl Fn(f64, f64) -> bool) -> f64 {
    if is_equal(c, level.at) {
        level.deduction * on_level
    } else if beyond(c, level.at) {
        level.deduction
    } else {
        0.0
    }
}

/// Moves the end points of profile lines by `profile` and of bend lines by
/// `bend`, dropping collapsed profile lines.
fn displaced<P, B>(part: &Part, profile: P, bend: B) -> (Vec<Line>, Vec<Line>)
where
    P: Fn(&Point) -> Vector,
    B: Fn(&Point) -> Vector,
{
    let plines = part
        .plines()
        .iter()
        .map(|l| l.trimmed(profile(&l.start()), profile(&l.end())))
        .filter(|l| !l.is_degenerate())
        .collect();
    let bend_lines = part
        .bend_lines()
        .iter()
        .map(|l| l.trimmed(bend(&l.start()), bend(&l.end())))
        .collect();
    (plines, bend_lines)
}

fn equally_distributed(part: &Part) -> Option<(Vec<Line>, Vec<Line>)> {
    let bend_lines = part.bend_lines();
    for l in bend_lines.iter().filter(|l| l.orientation() == Orientation::Inclined) {
        tracing::warn!(bend_line = l.index(), "Inclined bend line has no deduction applied");
    }

    let horizontal = levels(bend_lines, Orientation::Horizontal);
    let vertical = levels(bend_lines, Orientation::Vertical);
    if horizontal.is_empty() && vertical.is_empty() {
        return None;
    }

    let fy = AxisField::split(horizontal);
    let fx = AxisField::split(vertical);
    tracing::debug!(
        horizontal_total = fy.total(),
        vertical_total = fx.total(),
        "Distributing deduction"
    );

    let profile = |p: &Point| {
        Vector::new(fx.profile_displacement(p.x), fy.profile_displacement(p.y))
    };
    let bend = |p: &Point| Vector::new(fx.displacement(p.x), fy.displacement(p.y));
    Some(displaced(part, profile, bend))
}

fn partially_distributed(part: &Part) -> Option<(Vec<Line>, Vec<Line>)> {
    let bend_lines = part.bend_lines();
    if bend_lines.is_empty() {
        return None;
    }
    if let Some(l) = bend_lines
        .iter()
        .find(|l| l.orientation() != Orientation::Horizontal)
    {
        tracing::warn!(bend_line = l.index(), "Partial distribution needs horizontal bend lines");
        return None;
    }

    // Walked top-down, every level rises by the deductions above it
    let rising = AxisField {
        rising: levels(bend_lines, Orientation::Horizontal),
        falling: Vec::new(),
    };
    let total = rising.total();
    let cy = part.centroid().y;
    tracing::debug!(total, centroid_y = cy, "Shifting lower half");

    let shift = |p: &Point| -> Vector {
        if p.y < cy && !is_equal(p.y, cy) {
            Vector::new(0.0, total)
        } else {
            Vector::zeros()
        }
    };
    let profile = part
        .plines()
        .iter()
        .map(|l| l.trimmed(shift(&l.start()), shift(&l.end())))
        .filter(|l| !l.is_degenerate())
        .collect();
    let bends = bend_lines
        .iter()
        .map(|l| l.translated(0.0, rising.displacement(l.start().y)))
        .collect();
    Some((profile, bends))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bend_assist_geometry::BendLineInfo;

    fn level(at: f64, deduction: f64) -> Level {
        Level { at, deduction }
    }

    #[test]
    fn collinear_bend_lines_merge() {
        let info = |d| BendLineInfo::new(90.0, 2.0, d);
        let lines = [
            Line::bend(Point::new(0.0, 30.0), Point::new(40.0, 30.0), 1, info(3.0)),
            Line::bend(Point::new(60.0, 30.0), Point::new(100.0, 30.0), 2, info(4.0)),
            Line::bend(Point::new(0.0, 70.0), Point::new(100.0, 70.0), 3, info(2.0)),
            Line::bend(Point::new(50.0, 0.0), Point::new(50.0, 30.0), 4, info(5.0)),
        ];
        assert_eq!(
            levels(&lines, Orientation::Horizontal),
            vec![level(30.0, 4.0), level(70.0, 2.0)]
        );
        assert_eq!(levels(&lines, Orientation::Vertical), vec![level(50.0, 5.0)]);
    }

    #[test]
    fn field_moves_outer_halves_inwards() {
        let field = AxisField::split(vec![level(10.0, 2.0), level(30.0, 4.0), level(70.0, 6.0), level(90.0, 8.0)]);
        // Below everything: both rising levels
        assert_relative_eq!(field.displacement(0.0), 6.0);
        // On the outer rising level: inner level plus half its own
        assert_relative_eq!(field.displacement(10.0), 4.0 + 1.0);
        assert_relative_eq!(field.displacement(30.0), 2.0);
        // Base between the innermost levels stays put
        assert_relative_eq!(field.displacement(50.0), 0.0);
        assert_relative_eq!(field.displacement(70.0), -3.0);
        assert_relative_eq!(field.displacement(100.0), -14.0);
        assert_relative_eq!(field.total(), 20.0);
    }

    #[test]
    fn single_level_falls() {
        let field = AxisField::split(vec![level(40.0, 3.0)]);
        assert_relative_eq!(field.displacement(0.0), 0.0);
        assert_relative_eq!(field.displacement(40.0), -1.5);
        assert_relative_eq!(field.displacement(80.0), -3.0);
    }

    #[test]
    fn profile_points_on_a_level_stay_with_the_base() {
        let field = AxisField::split(vec![level(10.0, 2.0), level(30.0, 4.0), level(70.0, 6.0), level(90.0, 8.0)]);
        assert_relative_eq!(field.profile_displacement(10.0), 4.0);
        assert_relative_eq!(field.profile_displacement(30.0), 0.0);
        assert_relative_eq!(field.profile_displacement(70.0), 0.0);
        assert_relative_eq!(field.profile_displacement(90.0), -6.0);
        assert_relative_eq!(field.profile_displacement(0.0), field.displacement(0.0));
    }

    #[test]
    fn algorithm_names() {
        assert_eq!(DeductionAlgorithm::from_name("equal"), Some(DeductionAlgorithm::EquallyDistributed));
        assert_eq!(DeductionAlgorithm::from_name(" Partial "), Some(DeductionAlgorithm::PartiallyDistributed));
        assert_eq!(DeductionAlgorithm::from_name("sideways"), None);
    }
}
