// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Corner close: closes the step cut between two flanges meeting at a
//! corner.
//!
//! At a corner with two bend lines, the two profile lines leaving the
//! corner vertex are the step lines. The first one (incoming, in contour
//! order) is shifted by the difference between half the bend allowance and
//! the radius. The second one is split into a shortened segment, a
//! connector and an extruded segment that absorbs half the bend deduction.
//! Edge lines that touch a step line are trimmed so the contour stays
//! closed.

use bend_assist_geometry::{toward, Line, Orientation, Point, Vector};
use bend_assist_topology::ContourEdit;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::{processed, standard, standard_allowance, standard_deduction, BendAssist};
use crate::error::{AssistError, Result};
use crate::part::{AssistKind, Part, ProcessedPart};

/// Closes every corner step between two non-inclined bend lines, sized for
/// the standard corner bend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CornerClose;

/// Offsets derived from the standard corner bend.
#[derive(Debug, Clone, Copy)]
struct Offsets {
    half_ba: f64,
    shift: f64,
    half_bd: f64,
}

impl Offsets {
    fn standard() -> Self {
        let half_ba = standard_allowance() / 2.0;
        Self {
            half_ba,
            shift: half_ba - standard::RADIUS,
            half_bd: standard_deduction() / 2.0,
        }
    }
}

impl BendAssist for CornerClose {
    fn kind(&self) -> AssistKind {
        AssistKind::CornerClose
    }

    fn prompts(&self) -> &'static [&'static str] {
        &["Select the extruding line", "Select the intruding line"]
    }

    fn execute(&self, part: &Part) -> Result<ProcessedPart> {
        let _span = tracing::debug_span!(
            "corner_close",
            plines = part.plines().len(),
            bend_lines = part.bend_lines().len()
        )
        .entered();

        let contour = part.contour();
        let centroid = part.centroid();
        let offsets = Offsets::standard();

        // Step line positions in contour order, two per corner
        let mut steps: Vec<usize> = Vec::new();
        for info in part.candidates(AssistKind::CornerClose) {
            let (Some(incoming), Some(outgoing)) = (
                contour.incoming_position(&info.vertex),
                contour.outgoing_position(&info.vertex),
            ) else {
                continue;
            };
            let inclined = [incoming, outgoing]
                .iter()
                .any(|&pos| contour.line(pos).orientation() == Orientation::Inclined);
            if inclined {
                tracing::warn!(vertex = %info.vertex, "Inclined step line, skipping corner");
                continue;
            }
            if steps.contains(&incoming) || steps.contains(&outgoing) {
                tracing::warn!(vertex = %info.vertex, "Step line shared with another corner, skipping");
                continue;
            }
            steps.extend([incoming, outgoing]);
        }

        if steps.is_empty() {
            return Err(AssistError::inapplicable(AssistKind::CornerClose));
        }

        let mut edit = ContourEdit::new(contour);
        for (k, &pos) in steps.iter().enumerate() {
            let line = *contour.line(pos);
            let (sx, sy) = toward(&line.start(), &centroid);
            if k % 2 == 0 {
                let (dx, dy) = match line.orientation() {
                    Orientation::Horizontal => (0.0, sy * offsets.shift),
                    _ => (sx * offsets.shift, 0.0),
                };
                edit.translate(pos, dx, dy)?;
            } else {
                edit.replace(pos, close_step(&line, sx, sy, offsets))?;
            }
        }

        let step_set: FxHashSet<usize> = steps.iter().copied().collect();
        let step_starts: Vec<Point> = steps.iter().map(|&pos| contour.line(pos).start()).collect();
        let step_ends: Vec<Point> = steps.iter().map(|&pos| contour.line(pos).end()).collect();

        for (pos, line) in contour.lines().iter().enumerate() {
            if step_set.contains(&pos) {
                continue;
            }
            let trims_end = step_starts.iter().any(|p| p.coincides(&line.end()));
            let trims_start = step_ends.iter().any(|p| p.coincides(&line.start()));
            if !trims_end && !trims_start {
                continue;
            }
            let (sx, sy) = toward(&line.start(), &centroid);
            let (start, end) = match line.orientation() {
                Orientation::Horizontal => (
                    Vector::new(-sy * offsets.half_bd, 0.0),
                    Vector::new(-sy * offsets.shift, 0.0),
                ),
                Orientation::Vertical => (
                    Vector::new(0.0, sx * offsets.half_bd),
                    Vector::new(0.0, sx * offsets.shift),
                ),
                Orientation::Inclined => {
                    tracing::warn!(line = line.index(), "Inclined edge line left untrimmed");
                    continue;
                }
            };
            if trims_start {
                edit.trim_start(pos, start)?;
            }
            if trims_end {
                edit.trim_end(pos, end)?;
            }
            tracing::debug!(line = line.index(), trims_start, trims_end, "Edge line trimmed");
        }

        processed(
            edit.finish(),
            part.bend_lines().to_vec(),
            standard::THICKNESS,
            AssistKind::CornerClose,
        )
    }
}

/// Splits the second step line of a corner into
/// `[shortened, connector, extruded]`.
///
/// The step line runs away from the centroid; `(sx, sy)` point from its
/// start back towards the centroid.
fn close_step(line: &Line, sx: f64, sy: f64, offsets: Offsets) -> SmallVec<[Line; 3]> {
    let Offsets {
        half_ba,
        shift,
        half_bd,
    } = offsets;
    let len = line.length();
    let (shortened, extruded) = match line.orientation() {
        Orientation::Horizontal => {
            let s = sx;
            let extruded = line
                .trimmed(Vector::new(-s * half_ba, 0.0), Vector::zeros())
                .translated(0.0, s * half_bd);
            let shortened = line.trimmed(
                Vector::new(s * shift, 0.0),
                Vector::new(s * (len - half_ba), 0.0),
            );
            (shortened, extruded)
        }
        _ => {
            let s = sy;
            let extruded = line
                .trimmed(Vector::new(0.0, -s * half_ba), Vector::zeros())
                .translated(-s * half_bd, 0.0);
            let shortened = line.trimmed(
                Vector::new(0.0, s * shift),
                Vector::new(0.0, s * (len - half_ba)),
            );
            (shortened, extruded)
        }
    };
    let connector = Line::profile(shortened.end(), extruded.start(), line.index());
    smallvec![shortened, connector, extruded]
}
