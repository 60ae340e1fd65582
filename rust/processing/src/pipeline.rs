// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read, assist and write, for one part or many.

use bend_assist_core::{AssistError, Part, ProcessedPart};
use bend_assist_geo::{read, write_part, WriteOptions};
use rayon::prelude::*;

use crate::config::Config;
use crate::error::Result;
use crate::request::AssistRequest;

/// Runs the requested assist on `part`.
pub fn run(
    part: &Part,
    request: &AssistRequest,
    config: &Config,
) -> std::result::Result<ProcessedPart, AssistError> {
    let assist = request.build(config);
    let _span = tracing::info_span!(
        "assist",
        kind = %assist.kind(),
        plines = part.plines().len(),
        bend_lines = part.bend_lines().len()
    )
    .entered();

    match assist.execute(part) {
        Ok(processed) => {
            tracing::info!(
                plines = processed.part().plines().len(),
                bend_lines = processed.part().bend_lines().len(),
                "Assist applied"
            );
            Ok(processed)
        }
        Err(e) if e.is_inapplicable() => {
            tracing::info!(reason = %e, "Assist not applicable");
            Err(e)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Assist failed");
            Err(e)
        }
    }
}

/// Reads a GEO document, runs the assist and writes the result using the
/// input as template.
pub fn process_geo(
    text: &str,
    request: &AssistRequest,
    config: &Config,
    options: &WriteOptions,
) -> Result<String> {
    let file = read(text)?;
    tracing::debug!(material = %file.material, "Processing part");
    let processed = run(&file.part, request, config)?;
    Ok(write_part(processed.part(), text, options))
}

/// One GEO document to process.
#[derive(Debug, Clone)]
pub struct BatchJob {
    /// Label carried into the outcome, usually the file name
    pub name: String,
    pub text: String,
    pub request: AssistRequest,
}

/// Outcome of one [`BatchJob`].
#[derive(Debug)]
pub struct BatchOutcome {
    pub name: String,
    pub result: Result<String>,
}

/// Processes independent documents in parallel.
///
/// Each part is processed on a single worker; outcomes are returned in job
/// order. A failing job does not stop the others.
pub fn process_batch(
    jobs: &[BatchJob],
    config: &Config,
    options: &WriteOptions,
) -> Result<Vec<BatchOutcome>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.batch_threads.max(1))
        .build()?;

    tracing::info!(jobs = jobs.len(), threads = pool.current_num_threads(), "Starting batch");

    let outcomes: Vec<BatchOutcome> = pool.install(|| {
        jobs.par_iter()
            .map(|job| BatchOutcome {
                name: job.name.clone(),
                result: process_geo(&job.text, &job.request, config, options),
            })
            .collect()
    });

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    tracing::info!(jobs = jobs.len(), failed, "Batch finished");
    Ok(outcomes)
}
