// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Bend-Assist Geometry
//!
//! 2D primitives for sheet metal flat patterns: tolerant points, profile and
//! bend lines, bounds, quadrant classification around a reference point,
//! convex hulls and the bend allowance / deduction formulas.
//!
//! All values are plain `Copy` data. Operations return new values instead of
//! mutating their inputs.
//!
//! ```
//! use bend_assist_geometry::{bend_deduction, Line, Point, K_FACTOR};
//!
//! let edge = Line::profile(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 1);
//! assert_eq!(edge.length(), 100.0);
//! assert_eq!(bend_deduction(90.0, K_FACTOR, 2.0, 2.0), 3.665);
//! ```

pub mod bend;
pub mod bound;
pub mod hull;
pub mod line;
pub mod point;
pub mod quadrant;

// Re-export nalgebra types for convenience
pub use nalgebra::Vector2;

pub use bend::{bend_allowance, bend_deduction, K_FACTOR};
pub use bound::Bound;
pub use hull::{centroid, convex_hull, polygon_area, strictly_inside};
pub use line::{connected_chain, connected_lines, BendLineInfo, Line, LineKind, Orientation};
pub use point::{is_equal, Point, Vector, EPSILON};
pub use quadrant::{corner_relief_offsets, toward, Quadrant, ReliefOffsets};
