// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bend allowance and bend deduction.

use crate::point::round_to;

/// Position of the neutral fibre as a fraction of the thickness.
pub const K_FACTOR: f64 = 0.38;

/// Arc length of the neutral fibre through a bend.
///
/// `angle` is in degrees.
#[inline]
pub fn bend_allowance(angle: f64, k_factor: f64, thickness: f64, radius: f64) -> f64 {
    angle.to_radians() * (k_factor * thickness + radius)
}

/// Length to remove from the flat pattern for a bend, rounded to three
/// decimals.
pub fn bend_deduction(angle: f64, k_factor: f64, thickness: f64, radius: f64) -> f64 {
    let outside_setback = (angle.to_radians() / 2.0).tan() * (radius + thickness);
    let allowance = bend_allowance(angle, k_factor, thickness, radius);
    round_to((2.0 * outside_setback - allowance).abs(), 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn right_angle_values() {
        assert_relative_eq!(bend_allowance(90.0, K_FACTOR, 2.0, 2.0), 4.335, epsilon = 1e-3);
        assert_relative_eq!(bend_deduction(90.0, K_FACTOR, 2.0, 2.0), 3.665);
    }

    #[test]
    fn flat_bend_has_no_deduction() {
        assert_eq!(bend_allowance(0.0, K_FACTOR, 2.0, 2.0), 0.0);
        assert_eq!(bend_deduction(0.0, K_FACTOR, 2.0, 2.0), 0.0);
    }

    #[test]
    fn deduction_grows_with_radius() {
        let small = bend_deduction(90.0, K_FACTOR, 2.0, 1.0);
        let large = bend_deduction(90.0, K_FACTOR, 2.0, 5.0);
        assert!(large > small);
    }
}
