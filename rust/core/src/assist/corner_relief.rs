// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Corner relief: a diagonal cut where two bend lines meet.

use bend_assist_geometry::{connected_chain, corner_relief_offsets, Quadrant};
use bend_assist_topology::ContourEdit;
use serde::{Deserialize, Serialize};

use super::{processed, standard, BendAssist};
use crate::error::{AssistError, Result};
use crate::part::{AssistKind, Part, ProcessedPart};

/// Bend allowance of the standard corner bend, rounded as the relief
/// tables expect.
const RELIEF_ALLOWANCE: f64 = 4.335;

/// Replaces every inner corner between two bend lines with a 45 degree
/// relief cut sized for the standard corner bend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CornerRelief;

impl BendAssist for CornerRelief {
    fn kind(&self) -> AssistKind {
        AssistKind::CornerRelief
    }

    fn execute(&self, part: &Part) -> Result<ProcessedPart> {
        let _span = tracing::debug_span!(
            "corner_relief",
            plines = part.plines().len(),
            bend_lines = part.bend_lines().len()
        )
        .entered();

        let contour = part.contour();
        let half = RELIEF_ALLOWANCE / 2.0;
        let mut edit = ContourEdit::new(contour);
        let mut relieved = 0usize;

        for info in part.candidates(AssistKind::CornerRelief) {
            let vertex = info.vertex;
            let Some(quadrant) = Quadrant::of(&vertex, &part.centroid()) else {
                tracing::warn!(vertex = %vertex, "Corner lies on a centroid axis, skipping");
                continue;
            };
            let (Some(incoming), Some(outgoing)) = (
                contour.incoming_position(&vertex),
                contour.outgoing_position(&vertex),
            ) else {
                continue;
            };

            let offsets = corner_relief_offsets(quadrant, half);
            let chain = [vertex + offsets.v1, vertex + offsets.v2, vertex + offsets.v3];

            edit.trim_end(incoming, offsets.end_trim)?;
            edit.trim_start(outgoing, offsets.start_trim)?;
            edit.insert_after(incoming, connected_chain(0, &chain))?;
            tracing::debug!(vertex = %vertex, ?quadrant, "Corner relieved");
            relieved += 1;
        }

        if relieved == 0 {
            return Err(AssistError::inapplicable(AssistKind::CornerRelief));
        }

        processed(
            edit.finish(),
            part.bend_lines().to_vec(),
            standard::THICKNESS,
            AssistKind::CornerRelief,
        )
    }
}
