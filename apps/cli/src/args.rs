// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command line arguments.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use bend_assist_core::DeductionAlgorithm;
use bend_assist_processing::AssistRequest;

pub const USAGE: &str = "\
Usage: bend-assist <input.geo> --assist <name> [options]

Assists:
  bend-deduction  bend-relief  corner-close  corner-relief  make-flange

Options:
  --output <file>       Output file (default: <input>_processed.geo)
  --algorithm <name>    Bend deduction algorithm: equal | partial
  --edge <index>        Profile line to flange (default: all free edges)
  --height <h>          Flange height
  --angle <a>           Flange bend angle in degrees
  --radius <r>          Flange inner bend radius
  --summary             Print a JSON summary of the result
  -h, --help            Show this help

Defaults come from the BEND_ASSIST_* environment variables.";

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub input: PathBuf,
    pub output: PathBuf,
    pub request: AssistRequest,
    pub summary: bool,
}

/// `None` when help was requested.
pub fn parse(args: &[String]) -> Result<Option<Args>> {
    if args.is_empty() || args.iter().any(|a| a == "-h" || a == "--help") {
        return Ok(None);
    }

    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut assist: Option<String> = None;
    let mut algorithm: Option<DeductionAlgorithm> = None;
    let mut edge: Option<i32> = None;
    let mut height: Option<f64> = None;
    let mut angle: Option<f64> = None;
    let mut radius: Option<f64> = None;
    let mut summary = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = || {
            iter.next()
                .map(String::as_str)
                .ok_or_else(|| anyhow!("Missing value for {arg}"))
        };
        match arg.as_str() {
            "--assist" => assist = Some(value()?.to_string()),
            "--output" => output = Some(PathBuf::from(value()?)),
            "--algorithm" => {
                let name = value()?;
                algorithm = Some(
                    DeductionAlgorithm::from_name(name)
                        .ok_or_else(|| anyhow!("Unknown algorithm: {name}"))?,
                );
            }
            "--edge" => edge = Some(number(arg, value()?)?),
            "--height" => height = Some(number(arg, value()?)?),
            "--angle" => angle = Some(number(arg, value()?)?),
            "--radius" => radius = Some(number(arg, value()?)?),
            "--summary" => summary = true,
            other if other.starts_with("--") => bail!("Unknown option: {other}"),
            other => {
                if input.replace(PathBuf::from(other)).is_some() {
                    bail!("Only one input file is supported");
                }
            }
        }
    }

    let input = input.context("Missing input file")?;
    let name = assist.context("Missing --assist")?;
    let request = match AssistRequest::from_name(&name) {
        Some(AssistRequest::BendDeduction { .. }) => AssistRequest::BendDeduction { algorithm },
        Some(AssistRequest::MakeFlange { .. }) => AssistRequest::MakeFlange {
            edge,
            angle,
            height,
            radius,
        },
        Some(other) => other,
        None => bail!("Unknown assist: {name}"),
    };
    let output = output.unwrap_or_else(|| default_output(&input));

    Ok(Some(Args {
        input,
        output,
        request,
        summary,
    }))
}

fn number<T: std::str::FromStr>(option: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| anyhow!("Invalid value for {option}: {value}"))
}

fn default_output(input: &std::path::Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "part".to_string());
    input.with_file_name(format!("{stem}_processed.geo"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn flange_options() {
        let parsed = parse(&args("part.geo --assist make-flange --edge 2 --height 15 --summary"))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.input, PathBuf::from("part.geo"));
        assert_eq!(parsed.output, PathBuf::from("part_processed.geo"));
        assert!(parsed.summary);
        assert_eq!(
            parsed.request,
            AssistRequest::MakeFlange {
                edge: Some(2),
                angle: None,
                height: Some(15.0),
                radius: None,
            }
        );
    }

    #[test]
    fn deduction_algorithm() {
        let parsed = parse(&args("--assist bend-deduction --algorithm partial in.geo --output out.geo"))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.output, PathBuf::from("out.geo"));
        assert_eq!(
            parsed.request,
            AssistRequest::BendDeduction {
                algorithm: Some(DeductionAlgorithm::PartiallyDistributed)
            }
        );
    }

    #[test]
    fn help_and_errors() {
        assert!(parse(&[]).unwrap().is_none());
        assert!(parse(&args("part.geo --help")).unwrap().is_none());

        assert!(parse(&args("part.geo")).is_err());
        assert!(parse(&args("part.geo --assist fold")).is_err());
        assert!(parse(&args("part.geo --assist make-flange --edge")).is_err());
        assert!(parse(&args("part.geo --assist make-flange --height tall")).is_err());
        assert!(parse(&args("a.geo b.geo --assist bend-relief")).is_err());
        assert!(parse(&args("part.geo --assist bend-relief --fast")).is_err());
    }
}
