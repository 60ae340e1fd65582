// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Bend-Assist GEO
//!
//! Reads and writes flat patterns in the GEO exchange format used by sheet
//! metal punching and laser machines.
//!
//! ```
//! use bend_assist_geo::{read, write_part, WriteOptions};
//!
//! # fn roundtrip(text: &str) -> bend_assist_geo::Result<String> {
//! let file = read(text)?;
//! let out = write_part(&file.part, text, &WriteOptions::with_date("17.10.2026"));
//! # Ok(out)
//! # }
//! ```
//!
//! The writer regenerates geometry sections from the part and keeps the
//! rest of the template document, so the material block and machine
//! settings survive a round trip.

pub mod error;
pub mod parser;
pub mod reader;
pub mod writer;

pub use error::{Error, Result};
pub use reader::{read, read_part, GeoFile};
pub use writer::{write_part, WriteOptions};
