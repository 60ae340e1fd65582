// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flange creation: extrudes a wall from a profile edge and records a bend
//! line where the edge was.

use bend_assist_geometry::{bend_deduction, connected_chain, BendLineInfo, Line, K_FACTOR};
use bend_assist_topology::ContourEdit;
use serde::{Deserialize, Serialize};

use super::{processed, BendAssist};
use crate::error::{AssistError, Result};
use crate::part::{AssistKind, Part, ProcessedPart};

pub const DEFAULT_ANGLE: f64 = 90.0;
pub const DEFAULT_HEIGHT: f64 = 10.0;
pub const DEFAULT_RADIUS: f64 = 2.0;

/// Adds a flange to one edge, the selected edges, or every free edge.
///
/// The target is, in order of precedence: the profile line with index
/// `edge`, the profile lines flagged as selected, all profile lines. Edges
/// that already carry a bend line end point are never flanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MakeFlange {
    pub edge: Option<i32>,
    /// Bend angle in degrees
    pub angle: f64,
    /// Flange height measured from the original edge
    pub height: f64,
    /// Inner bend radius
    pub radius: f64,
}

impl Default for MakeFlange {
    fn default() -> Self {
        Self {
            edge: None,
            angle: DEFAULT_ANGLE,
            height: DEFAULT_HEIGHT,
            radius: DEFAULT_RADIUS,
        }
    }
}

impl MakeFlange {
    /// Flange on the profile line with the given index.
    pub fn on_edge(edge: i32) -> Self {
        Self {
            edge: Some(edge),
            ..Self::default()
        }
    }

    pub fn with_angle(self, angle: f64) -> Self {
        Self { angle, ..self }
    }

    pub fn with_height(self, height: f64) -> Self {
        Self { height, ..self }
    }

    pub fn with_radius(self, radius: f64) -> Self {
        Self { radius, ..self }
    }

    /// Profile lines that receive a flange.
    fn targets<'a>(&self, part: &'a Part) -> Vec<&'a Line> {
        let free = |l: &&Line| {
            let bound = l.bound();
            !part
                .bend_lines()
                .iter()
                .any(|b| bound.contains(&b.start()) || bound.contains(&b.end()))
        };
        let plines = part.plines();
        match self.edge {
            Some(index) => plines.iter().filter(|l| l.index() == index).filter(free).collect(),
            None if plines.iter().any(Line::is_selected) => {
                plines.iter().filter(|l| l.is_selected()).filter(free).collect()
            }
            None => plines.iter().filter(free).collect(),
        }
    }
}

impl BendAssist for MakeFlange {
    fn kind(&self) -> AssistKind {
        AssistKind::AddFlange
    }

    fn prompts(&self) -> &'static [&'static str] {
        &["Select an edge to make flange [Ctrl= All edges]"]
    }

    fn execute(&self, part: &Part) -> Result<ProcessedPart> {
        let _span = tracing::debug_span!(
            "make_flange",
            plines = part.plines().len(),
            bend_lines = part.bend_lines().len(),
            angle = self.angle,
            height = self.height,
            radius = self.radius
        )
        .entered();

        let targets = self.targets(part);
        if targets.is_empty() {
            return Err(AssistError::inapplicable(AssistKind::AddFlange));
        }

        let deduction = bend_deduction(self.angle, K_FACTOR, part.thickness(), self.radius);
        let length = self.height - deduction / 2.0;
        let info = BendLineInfo::new(self.angle, self.radius, deduction);

        let contour = part.contour();
        let mut edit = ContourEdit::new(contour);
        let mut bend_lines = part.bend_lines().to_vec();
        let mut next_index = bend_lines.len() as i32 + 1;

        for edge in targets {
            let Some(pos) = contour.position_of(edge.index()) else {
                continue;
            };
            let (sin, cos) = (edge.angle() - 90.0).to_radians().sin_cos();
            let outer = edge.translated(length * cos, length * sin);
            let chain = [edge.start(), outer.start(), outer.end(), edge.end()];
            edit.replace(pos, connected_chain(edge.index(), &chain))?;

            bend_lines.push(Line::bend(edge.start(), edge.end(), next_index, info));
            tracing::debug!(edge = edge.index(), bend_line = next_index, "Flange added");
            next_index += 1;
        }

        processed(edit.finish(), bend_lines, self.radius, AssistKind::AddFlange)
    }
}
