// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Bend-Assist Processing
//!
//! The pipeline shared by the command line tool and batch jobs:
//!
//! - [`Config`]: assist defaults and worker count, from the environment or
//!   JSON
//! - [`AssistRequest`]: which assist to run, serializable as a tagged JSON
//!   object
//! - [`run`], [`process_geo`] and [`process_batch`]: one part, one GEO
//!   document, or many documents in parallel
//! - [`summarize`]: measures of a part for reporting

pub mod config;
pub mod error;
pub mod pipeline;
pub mod request;
pub mod summary;

pub use config::Config;
pub use error::{Error, Result};
pub use pipeline::{process_batch, process_geo, run, BatchJob, BatchOutcome};
pub use request::AssistRequest;
pub use summary::{summarize, PartSummary};
