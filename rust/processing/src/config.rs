// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Processing configuration loaded from environment variables or JSON.

use bend_assist_core::assist::make_flange::{DEFAULT_ANGLE, DEFAULT_HEIGHT, DEFAULT_RADIUS};
use bend_assist_core::DeductionAlgorithm;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Defaults for assist requests and batch processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Algorithm used when a bend deduction request names none.
    pub deduction_algorithm: DeductionAlgorithm,
    /// Flange bend angle in degrees.
    pub flange_angle: f64,
    /// Flange height.
    pub flange_height: f64,
    /// Flange inner bend radius.
    pub flange_radius: f64,
    /// Number of worker threads for batch processing.
    pub batch_threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            deduction_algorithm: DeductionAlgorithm::default(),
            flange_angle: DEFAULT_ANGLE,
            flange_height: DEFAULT_HEIGHT,
            flange_radius: DEFAULT_RADIUS,
            batch_threads: num_cpus::get(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Absent or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from a JSON document. Missing fields take their
    /// default values.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let number = |key: &str, default: f64| {
            var(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };
        Self {
            deduction_algorithm: var("BEND_ASSIST_ALGORITHM")
                .and_then(|v| DeductionAlgorithm::from_name(&v))
                .unwrap_or(defaults.deduction_algorithm),
            flange_angle: number("BEND_ASSIST_FLANGE_ANGLE", defaults.flange_angle),
            flange_height: number("BEND_ASSIST_FLANGE_HEIGHT", defaults.flange_height),
            flange_radius: number("BEND_ASSIST_FLANGE_RADIUS", defaults.flange_radius),
            batch_threads: var("BEND_ASSIST_THREADS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(defaults.batch_threads),
        }
    }
}
