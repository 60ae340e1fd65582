// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bend assist algorithms.
//!
//! Each assist is a pure transform from a [`Part`] to a [`ProcessedPart`].
//! Assists never mutate their input; they copy or transform its lines and
//! build a fresh part, which revalidates the closed contour.

mod bend_deduction;
mod bend_relief;
mod corner_close;
mod corner_relief;
pub mod make_flange;

pub use bend_deduction::{BendDeduction, DeductionAlgorithm};
pub use bend_relief::BendRelief;
pub use corner_close::CornerClose;
pub use corner_relief::CornerRelief;
pub use make_flange::MakeFlange;

use bend_assist_geometry::{bend_allowance, bend_deduction, Line, K_FACTOR};

use crate::error::Result;
use crate::part::{AssistKind, Part, ProcessedPart};

/// Fixed process parameters of corner close and corner relief.
///
/// Both assists size their cuts for a 90 degree bend of 2 mm material with
/// a 2 mm radius, whatever the part's own thickness and bend lines say.
pub(crate) mod standard {
    pub const ANGLE: f64 = 90.0;
    pub const THICKNESS: f64 = 2.0;
    pub const RADIUS: f64 = 2.0;
}

/// Bend allowance of the standard corner bend.
pub(crate) fn standard_allowance() -> f64 {
    bend_allowance(standard::ANGLE, K_FACTOR, standard::THICKNESS, standard::RADIUS)
}

/// Bend deduction of the standard corner bend.
pub(crate) fn standard_deduction() -> f64 {
    bend_deduction(standard::ANGLE, K_FACTOR, standard::THICKNESS, standard::RADIUS)
}

/// A transform applied to a flat pattern.
pub trait BendAssist {
    /// The kind of change this assist applies.
    fn kind(&self) -> AssistKind;

    /// Instructions for collecting interactive input, if any.
    fn prompts(&self) -> &'static [&'static str] {
        &[]
    }

    /// Applies the assist to `part`.
    ///
    /// Returns [`AssistError::Inapplicable`](crate::AssistError::Inapplicable)
    /// when the part has nothing this assist can work on.
    fn execute(&self, part: &Part) -> Result<ProcessedPart>;
}

/// Builds the processed part from the transformed lines.
pub(crate) fn processed(
    plines: Vec<Line>,
    bend_lines: Vec<Line>,
    thickness: f64,
    applied: AssistKind,
) -> Result<ProcessedPart> {
    let part = Part::new(plines, bend_lines, thickness)?;
    tracing::debug!(
        assist = %applied,
        plines = part.plines().len(),
        bend_lines = part.bend_lines().len(),
        "Assist applied"
    );
    Ok(ProcessedPart::new(part, applied))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn standard_corner_bend() {
        assert_relative_eq!(standard_allowance(), 4.335, epsilon = 1e-3);
        assert_relative_eq!(standard_deduction(), 3.665);
    }

    #[test]
    fn prompts() {
        assert!(BendRelief.prompts().is_empty());
        assert_eq!(CornerClose.prompts().len(), 2);
        assert_eq!(MakeFlange::default().prompts().len(), 1);
    }
}
