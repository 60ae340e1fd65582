// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bend-Assist CLI - apply one sheet metal assist to a GEO flat pattern.
//!
//! Usage:
//!   bend-assist <input.geo> --assist <name> [options]

use std::fs;

use anyhow::{Context, Result};
use bend_assist_geo::{read, write_part, WriteOptions};
use bend_assist_processing::{run, summarize, Config};

mod args;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,bend_assist=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = try_main() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let Some(args) = args::parse(&argv)? else {
        println!("{}", args::USAGE);
        return Ok(());
    };

    let config = Config::from_env();
    tracing::info!(
        input = %args.input.display(),
        output = %args.output.display(),
        request = ?args.request,
        "Starting Bend-Assist"
    );

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("Cannot read {}", args.input.display()))?;
    let file = read(&text).with_context(|| format!("Cannot parse {}", args.input.display()))?;

    let processed = run(&file.part, &args.request, &config)?;

    let options = WriteOptions::with_date(chrono::Local::now().format("%d.%m.%Y").to_string());
    let out = write_part(processed.part(), &text, &options);
    fs::write(&args.output, out)
        .with_context(|| format!("Cannot write {}", args.output.display()))?;

    tracing::info!(
        assist = %processed.applied(),
        output = %args.output.display(),
        "Part written"
    );

    if args.summary {
        let summary = summarize(processed.part());
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
