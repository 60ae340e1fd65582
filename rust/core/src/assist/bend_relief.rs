// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bend relief: a rectangular notch at the inner end of a bend line.
//!
//! Where a bend line ends inside the part, folding would tear the material
//! at the bend's end point. The relief replaces one of the two profile lines
//! at that vertex (the base edge) with a chain that cuts a notch of half the
//! bend allowance deep and half the thickness wide.

use bend_assist_geometry::{bend_allowance, connected_chain, Point, K_FACTOR};
use bend_assist_topology::ContourEdit;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::{processed, BendAssist};
use crate::error::{AssistError, Result};
use crate::part::{AssistKind, Part, ProcessedPart};

/// Cuts a relief notch at every interior end point of a single bend line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BendRelief;

impl BendAssist for BendRelief {
    fn kind(&self) -> AssistKind {
        AssistKind::BendRelief
    }

    fn execute(&self, part: &Part) -> Result<ProcessedPart> {
        let _span = tracing::debug_span!(
            "bend_relief",
            plines = part.plines().len(),
            bend_lines = part.bend_lines().len()
        )
        .entered();

        let contour = part.contour();
        let centroid = part.centroid();
        let mut edit = ContourEdit::new(contour);
        let mut replaced = FxHashSet::default();

        for info in part.candidates(AssistKind::BendRelief) {
            let vertex = info.vertex;
            let Some(bend) = info.bend_lines.first().and_then(|&i| part.bend_line(i)) else {
                continue;
            };
            let Some(bend_info) = bend.bend_info() else {
                continue;
            };
            let (Some(incoming), Some(outgoing)) = (
                contour.incoming_position(&vertex),
                contour.outgoing_position(&vertex),
            ) else {
                continue;
            };

            let horizontal = in_horizontal_range(bend.angle());
            let base_pos = if picks_outgoing(&vertex, &centroid, horizontal) {
                outgoing
            } else {
                incoming
            };
            if !replaced.insert(base_pos) {
                tracing::warn!(vertex = %vertex, "Base edge already relieved, skipping vertex");
                continue;
            }
            let base = *contour.line(base_pos);

            let height = bend_allowance(bend_info.angle, K_FACTOR, part.thickness(), bend_info.radius) / 2.0;
            let width = part.thickness() / 2.0;
            let (across, along) =
                translate_angles(normalized(bend.angle()), &vertex, &centroid, horizontal);

            let p2 = vertex.radial_moved(height, across);
            let p3 = p2.radial_moved(width, along);
            let p4 = p3.radial_moved(p3.dist_to_line(&base.start(), &base.end()), across - 180.0);

            let chain = if vertex.coincides(&base.end()) {
                [base.start(), p4, p3, p2, vertex]
            } else {
                [vertex, p2, p3, p4, base.end()]
            };
            tracing::debug!(vertex = %vertex, base = base.index(), "Relief notch");
            edit.replace(base_pos, connected_chain(base.index(), &chain))?;
        }

        if replaced.is_empty() {
            return Err(AssistError::inapplicable(AssistKind::BendRelief));
        }

        processed(
            edit.finish(),
            part.bend_lines().to_vec(),
            part.thickness(),
            AssistKind::BendRelief,
        )
    }
}

/// Returns true for angles within 45 degrees of the X axis.
fn in_horizontal_range(angle: f64) -> bool {
    (135.0 < angle && angle < 225.0) || (0.0..45.0).contains(&angle) || (315.0 < angle && angle <= 360.0)
}

/// Which of the two profile lines at `v` is the base edge.
fn picks_outgoing(v: &Point, c: &Point, horizontal: bool) -> bool {
    if horizontal {
        (v.x < c.x && v.y > c.y) || (v.x > c.x && v.y < c.y)
    } else {
        (v.y < c.y && v.x < c.x) || (v.x > c.x && v.y > c.y)
    }
}

/// Folds the reversed axis directions onto 0 and 90.
fn normalized(angle: f64) -> f64 {
    if angle == 180.0 {
        0.0
    } else if angle == 270.0 {
        90.0
    } else {
        angle
    }
}

/// Directions of the notch: across the fold towards the centroid side, then
/// along the fold.
fn translate_angles(angle: f64, v: &Point, c: &Point, horizontal: bool) -> (f64, f64) {
    if horizontal {
        (
            if v.y > c.y { angle + 270.0 } else { angle + 90.0 },
            if v.x < c.x { angle + 180.0 } else { angle },
        )
    } else {
        (
            if v.x > c.x { angle + 90.0 } else { angle - 90.0 },
            if v.y < c.y { angle + 180.0 } else { angle },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_range() {
        for angle in [0.0, 30.0, 170.0, 200.0, 320.0, 360.0] {
            assert!(in_horizontal_range(angle), "{angle}");
        }
        for angle in [45.0, 90.0, 135.0, 225.0, 270.0, 315.0] {
            assert!(!in_horizontal_range(angle), "{angle}");
        }
    }

    #[test]
    fn base_edge_table() {
        let c = Point::new(50.0, 50.0);
        assert!(picks_outgoing(&Point::new(20.0, 80.0), &c, true));
        assert!(picks_outgoing(&Point::new(80.0, 20.0), &c, true));
        assert!(!picks_outgoing(&Point::new(80.0, 80.0), &c, true));
        assert!(picks_outgoing(&Point::new(20.0, 20.0), &c, false));
        assert!(picks_outgoing(&Point::new(80.0, 80.0), &c, false));
        assert!(!picks_outgoing(&Point::new(80.0, 20.0), &c, false));
    }

    #[test]
    fn notch_points_towards_the_centroid() {
        let c = Point::new(50.0, 35.0);
        // Above the centroid on a horizontal fold: cut downwards, then left
        assert_eq!(translate_angles(0.0, &Point::new(20.0, 50.0), &c, true), (270.0, 180.0));
        // Right of the centroid on a vertical fold: cut left, then down
        assert_eq!(translate_angles(90.0, &Point::new(80.0, 20.0), &c, false), (180.0, 270.0));
        assert_eq!(normalized(180.0), 0.0);
        assert_eq!(normalized(270.0), 90.0);
    }
}
