// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GEO document writer.
//!
//! The writer walks the template document the part was read from. Sections
//! that depend on the geometry (`#~1`, `#~3`, `#~31`, `#~33`, `#~331` and
//! the bend blocks `#~37` / `#~371`) are regenerated from the part; the
//! material block, `#~30`, `#~END` and `#~EOF` are copied with the lines
//! that follow them.

use bend_assist_core::Part;
use bend_assist_geometry::{Line, Point};

const EOL: &str = "\r\n";
const ZERO: &str = "0.000000000";
const END: &str = "##~~";

/// Options for [`write_part`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Date written into the header, `dd.mm.yyyy`
    pub date: String,
    /// Format version written into the header
    pub version: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            date: "01.01.1970".to_string(),
            version: "1.03".to_string(),
        }
    }
}

impl WriteOptions {
    pub fn with_date(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Self::default()
        }
    }
}

/// Writes `part` as a GEO document shaped like `template`.
///
/// Lines are separated by `\r\n`.
pub fn write_part(part: &Part, template: &str, options: &WriteOptions) -> String {
    let lines: Vec<&str> = template.lines().collect();
    let summary = Summary::of(part);
    let bend_prototype = bend_prototype(&lines);
    let has_bend_section = lines.iter().any(|l| l.trim() == "#~37");

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut copying = false;
    let mut bends_written = false;

    for (i, line) in lines.iter().enumerate() {
        match line.trim() {
            "#~1" => {
                out.push("#~1".into());
                out.extend([options.version.as_str(), "1", options.date.as_str()].map(String::from));
                out.extend([summary.min.clone(), summary.max.clone(), summary.area.clone()]);
                out.extend(["1", "0.001", "0", "1", END].map(String::from));
                copying = false;
            }
            "#~3" => {
                out.push("#~3".into());
                out.push(format!("{ZERO} {ZERO} {:.9}", 1.0));
                for row in 0..4 {
                    let cells: Vec<String> = (0..4)
                        .map(|col| format!("{:.9}", if row == col { 1.0 } else { 0.0 }))
                        .collect();
                    out.push(cells.join(" "));
                }
                out.extend(summary.lines());
                out.extend(["1", "0", "0", "0", "0", END].map(String::from));
                copying = false;
            }
            "#~31" => {
                out.push("#~31".into());
                for vertex in part.regen() {
                    out.extend([
                        "P".to_string(),
                        vertex.index.to_string(),
                        coordinates(&vertex),
                        "|~".to_string(),
                    ]);
                }
                out.push(END.into());
                copying = false;
            }
            "#~33" => {
                out.push("#~33".into());
                out.extend(lines.iter().skip(i + 1).take(4).map(|l| l.to_string()));
                out.extend(summary.lines());
                out.extend(["0", END].map(String::from));
                copying = false;
            }
            "#~331" => {
                out.push("#~331".into());
                for line in part.plines() {
                    out.extend(lin_record("1 0", line));
                }
                out.extend([END, "#~KONT_END"].map(String::from));
                if !has_bend_section {
                    out.extend(bend_blocks(part, &bend_prototype));
                    bends_written = true;
                }
                copying = false;
            }
            "#~37" => {
                // All bend blocks go where the template's first one was
                if !bends_written {
                    out.extend(bend_blocks(part, &bend_prototype));
                    bends_written = true;
                }
                copying = false;
            }
            "#~KONT_END" | "#~371" | "#~BIEG_END" => copying = false,
            "#~11" | "#~30" | "#~END" | "#~EOF" => {
                out.push(line.to_string());
                copying = true;
            }
            _ => {
                if copying {
                    out.push(line.to_string());
                }
            }
        }
    }

    tracing::debug!(lines = out.len(), bend_lines = part.bend_lines().len(), "Wrote GEO document");

    let mut text = out.join(EOL);
    text.push_str(EOL);
    text
}

/// Bound, centroid and area formatted for the summary records.
struct Summary {
    min: String,
    max: String,
    centroid: String,
    area: String,
}

impl Summary {
    fn of(part: &Part) -> Self {
        let bound = part.bound();
        Self {
            min: coordinates(&Point::new(bound.min_x, bound.min_y)),
            max: coordinates(&Point::new(bound.max_x, bound.max_y)),
            centroid: coordinates(&part.centroid()),
            area: format!("{:.3}", part.area()),
        }
    }

    fn lines(&self) -> [String; 4] {
        [
            self.min.clone(),
            self.max.clone(),
            self.centroid.clone(),
            self.area.clone(),
        ]
    }
}

fn coordinates(p: &Point) -> String {
    format!("{:.9} {:.9} {ZERO}", p.x, p.y)
}

fn lin_record(kind: &str, line: &Line) -> [String; 4] {
    [
        "LIN".to_string(),
        kind.to_string(),
        format!("{} {}", line.start().index, line.end().index),
        "|~".to_string(),
    ]
}

/// Body lines of the template's first `#~37` section, up to the next
/// section marker.
fn bend_prototype<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    lines
        .iter()
        .position(|l| l.trim() == "#~37")
        .map(|start| {
            lines[start + 1..]
                .iter()
                .map(|&l| l.trim())
                .take_while(|l| !l.starts_with("#~"))
                .collect()
        })
        .unwrap_or_default()
}

/// `#~37` / `#~371` blocks for every bend line.
///
/// The first token of the angle and radius lines and the whole deduction
/// line are replaced; the other prototype lines are kept as they are.
fn bend_blocks(part: &Part, prototype: &[&str]) -> Vec<String> {
    let proto = |i: usize, default: &'static str| prototype.get(i).copied().unwrap_or(default);
    let trailer: Vec<String> = if prototype.len() > 4 {
        prototype[4..].iter().map(|l| l.to_string()).collect()
    } else {
        vec![END.to_string()]
    };

    let mut out = Vec::new();
    for line in part.bend_lines() {
        let Some(info) = line.bend_info() else {
            continue;
        };
        out.push("#~37".to_string());
        out.push(proto(0, "1").to_string());
        out.push(with_leading(proto(1, "0"), info.angle));
        out.push(with_leading(proto(2, "0"), info.radius));
        out.push(format!("{:.9}", -info.deduction));
        out.extend(trailer.iter().cloned());
        out.push("#~371".to_string());
        out.extend(lin_record("4 0", line));
        out.extend([END, "#~BIEG_END"].map(String::from));
    }
    out
}

/// Replaces the first token of `line` with `value`.
fn with_leading(line: &str, value: f64) -> String {
    match line.split_once(' ') {
        Some((_, rest)) => format!("{value:.9} {rest}"),
        None => format!("{value:.9}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_token_replacement() {
        assert_eq!(with_leading("90.000000000 0 1", 45.0), "45.000000000 0 1");
        assert_eq!(with_leading("7", 2.5), "2.500000000");
    }

    #[test]
    fn prototype_stops_at_next_section() {
        let lines = ["#~37", "1", "90 0", "2 0", "-3.665", "##~~", "#~371", "LIN"];
        assert_eq!(bend_prototype(&lines), vec!["1", "90 0", "2 0", "-3.665", "##~~"]);
        assert!(bend_prototype(&["#~1", "##~~"]).is_empty());
    }
}
