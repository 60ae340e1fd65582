// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Bend-Assist Topology
//!
//! Closed contour graph for sheet metal flat patterns.
//!
//! A part's profile is a ring of lines where each line ends where the next
//! one starts. This crate validates that invariant ([`Contour`]), answers
//! "which lines touch this vertex" through a spatial hash ([`VertexIndex`]),
//! lets assist algorithms express their result as positional edits
//! ([`ContourEdit`]) and renumbers the output so indices stay sequential
//! ([`renumber`]).

pub mod contour;
pub mod edit;
pub mod error;
pub mod renumber;
pub mod spatial;

pub use contour::{check_closed, Contour};
pub use edit::ContourEdit;
pub use error::{Error, Result};
pub use renumber::{renumber, VertexNumbering};
pub use spatial::VertexIndex;
