// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Bend-Assist Core
//!
//! The geometric engine that turns a flat sheet metal profile into a
//! pattern ready for cutting and folding.
//!
//! ## Overview
//!
//! - [`Part`]: closed profile contour, bend lines and thickness, with the
//!   derived hull, bound, centroid and the list of vertices where an assist
//!   applies ([`AssistInfo`])
//! - [`BendAssist`]: the common contract of the five assists
//!   ([`BendDeduction`], [`BendRelief`], [`CornerClose`], [`CornerRelief`],
//!   [`MakeFlange`])
//! - [`ProcessedPart`]: the result, a valid part tagged with the applied
//!   assist
//!
//! ## Quick Start
//!
//! ```
//! use bend_assist_core::{BendAssist, MakeFlange, Part};
//! use bend_assist_geometry::{connected_chain, Point};
//!
//! let corners = [(0.0, 0.0), (100.0, 0.0), (100.0, 50.0), (0.0, 50.0), (0.0, 0.0)];
//! let points: Vec<Point> = corners.iter().map(|&(x, y)| Point::new(x, y)).collect();
//! let part = Part::new(connected_chain(0, &points), Vec::new(), 2.0)?;
//!
//! let flanged = MakeFlange::on_edge(1).execute(&part)?;
//! assert_eq!(flanged.part().bend_lines().len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Assists never modify their input and can be run any number of times.
//! Failing to apply is reported as [`AssistError::Inapplicable`], the
//! ordinary outcome for parts without eligible corners or edges.

pub mod assist;
pub mod error;
pub mod part;

pub use assist::{
    BendAssist, BendDeduction, BendRelief, CornerClose, CornerRelief, DeductionAlgorithm,
    MakeFlange,
};
pub use error::{AssistError, Result};
pub use part::{AssistInfo, AssistKind, Part, ProcessedPart};
