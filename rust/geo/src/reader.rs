// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GEO document reader.
//!
//! A GEO document is a sequence of sections opened by a `#~<id>` marker
//! line. The reader understands the sections that make up a flat pattern:
//!
//! | Marker  | Content |
//! |---------|---------|
//! | `#~11`  | material block: 5 lines, material name, thickness |
//! | `#~31`  | vertex table: `P` / index / `x y z` / `\|~`, ended by `##~~` |
//! | `#~331` | contour: `LIN` / `1 0` / `i j` / `\|~`, ended by `##~~` |
//! | `#~37`  | bend info: 1 line, angle, radius, negated deduction |
//! | `#~371` | bend line: 2 lines, then `i j` |
//!
//! Everything else is skipped.

use bend_assist_core::Part;
use bend_assist_geometry::{BendLineInfo, Line, Point};

use crate::error::{Error, Result};
use crate::parser::{coordinates, leading_number, vertex_pair};

/// A flat pattern read from a GEO document.
#[derive(Debug, Clone)]
pub struct GeoFile {
    /// Material name from the `#~11` block, empty if absent
    pub material: String,
    pub part: Part,
}

/// Reads the part from a GEO document.
pub fn read_part(text: &str) -> Result<Part> {
    read(text).map(|file| file.part)
}

/// Reads the material and part from a GEO document.
pub fn read(text: &str) -> Result<GeoFile> {
    let mut lines = Lines::new(text);
    let mut material = String::new();
    let mut thickness = 0.0;
    let mut vertices: Vec<Point> = Vec::new();
    let mut plines: Vec<Line> = Vec::new();
    let mut bend_lines: Vec<Line> = Vec::new();
    let mut bend_info = BendLineInfo::default();

    while let Some(marker) = lines.next() {
        match marker {
            "#~11" => {
                lines.skip(5, "#~11")?;
                material = lines.expect("#~11")?.to_string();
                thickness = lines.number("#~11", "thickness")?;
            }
            "#~31" => {
                while lines.expect("#~31")? == "P" {
                    lines.skip(1, "#~31")?;
                    let (x, y) = lines.parse("#~31", "coordinates `x y z`", coordinates)?;
                    vertices.push(Point::indexed(x, y, vertices.len() as i32 + 1));
                    lines.skip(1, "#~31")?;
                }
            }
            "#~331" => {
                while lines.expect("#~331")? == "LIN" {
                    lines.skip(1, "#~331")?;
                    let (start, end) = lines.vertex_pair("#~331", &vertices)?;
                    plines.push(Line::profile(start, end, plines.len() as i32 + 1));
                    lines.skip(1, "#~331")?;
                }
            }
            "#~37" => {
                lines.skip(1, "#~37")?;
                let angle = lines.number("#~37", "bend angle")?;
                let radius = lines.number("#~37", "bend radius")?;
                let deduction = -lines.number("#~37", "bend deduction")?;
                bend_info = BendLineInfo::new(angle, radius, deduction);
            }
            "#~371" => {
                lines.skip(2, "#~371")?;
                let (start, end) = lines.vertex_pair("#~371", &vertices)?;
                bend_lines.push(Line::bend(start, end, bend_lines.len() as i32 + 1, bend_info));
            }
            _ => {}
        }
    }

    tracing::debug!(
        material = %material,
        thickness,
        vertices = vertices.len(),
        plines = plines.len(),
        bend_lines = bend_lines.len(),
        "Read GEO document"
    );

    let part = Part::new(plines, bend_lines, thickness)?;
    Ok(GeoFile { material, part })
}

/// Trimmed line cursor that tracks line numbers for error messages.
struct Lines<'a> {
    inner: std::str::Lines<'a>,
    line: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines(),
            line: 0,
        }
    }

    fn next(&mut self) -> Option<&'a str> {
        let next = self.inner.next()?;
        self.line += 1;
        Some(next.trim())
    }

    fn expect(&mut self, section: &'static str) -> Result<&'a str> {
        self.next().ok_or(Error::UnexpectedEof { section })
    }

    fn skip(&mut self, count: usize, section: &'static str) -> Result<()> {
        for _ in 0..count {
            self.expect(section)?;
        }
        Ok(())
    }

    fn parse<T, P>(&mut self, section: &'static str, expected: &'static str, mut parser: P) -> Result<T>
    where
        P: FnMut(&'a str) -> nom::IResult<&'a str, T>,
    {
        let text = self.expect(section)?;
        parser(text).map(|(_, value)| value).map_err(|_| Error::Syntax {
            line: self.line,
            expected,
            found: text.to_string(),
        })
    }

    /// Leading number of the next line.
    fn number(&mut self, section: &'static str, expected: &'static str) -> Result<f64> {
        self.parse(section, expected, leading_number)
    }

    fn vertex_pair(&mut self, section: &'static str, vertices: &[Point]) -> Result<(Point, Point)> {
        let (i, j) = self.parse(section, "vertex pair `i j`", vertex_pair)?;
        let lookup = |index: usize| {
            index
                .checked_sub(1)
                .and_then(|k| vertices.get(k))
                .copied()
                .ok_or(Error::VertexOutOfRange {
                    line: self.line,
                    index,
                    count: vertices.len(),
                })
        };
        Ok((lookup(i)?, lookup(j)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATERIAL: &str = "#~11\r\n1\r\n2\r\n3\r\n4\r\n5\r\nDC04\r\n2.000000000\r\n##~~\r\n";

    fn vertex_table(points: &[(f64, f64)]) -> String {
        let mut s = String::from("#~31\r\n");
        for (i, (x, y)) in points.iter().enumerate() {
            s.push_str(&format!("P\r\n{}\r\n{:.9} {:.9} 0.000000000\r\n|~\r\n", i + 1, x, y));
        }
        s.push_str("##~~\r\n");
        s
    }

    fn contour(pairs: &[(usize, usize)]) -> String {
        let mut s = String::from("#~331\r\n");
        for (i, j) in pairs {
            s.push_str(&format!("LIN\r\n1 0\r\n{i} {j}\r\n|~\r\n"));
        }
        s.push_str("##~~\r\n#~KONT_END\r\n");
        s
    }

    fn square() -> String {
        let mut s = String::from(MATERIAL);
        s.push_str(&vertex_table(&[(0.0, 0.0), (100.0, 0.0), (100.0, 50.0), (0.0, 50.0), (0.0, 25.0), (100.0, 25.0)]));
        s.push_str(&contour(&[(1, 2), (2, 3), (3, 4), (4, 1)]));
        s.push_str("#~37\r\n1\r\n90.000000000 0\r\n2.000000000 0\r\n-3.665000000\r\n##~~\r\n");
        s.push_str("#~371\r\nLIN\r\n4 0\r\n5 6\r\n|~\r\n##~~\r\n#~BIEG_END\r\n#~END\r\n#~EOF\r\n");
        s
    }

    #[test]
    fn reads_material_contour_and_bends() {
        let file = read(&square()).unwrap();
        assert_eq!(file.material, "DC04");
        let part = &file.part;
        assert_eq!(part.thickness(), 2.0);
        assert_eq!(part.plines().len(), 4);
        assert_eq!(part.bend_lines().len(), 1);

        let info = part.bend_lines()[0].bend_info().unwrap();
        assert_eq!(info, BendLineInfo::new(90.0, 2.0, 3.665));
        assert_eq!(part.bend_lines()[0].start(), Point::new(0.0, 25.0));
    }

    #[test]
    fn keeps_full_precision() {
        let text = square().replace("2.000000000\r\n##~~", "1.500000000\r\n##~~");
        assert_eq!(read_part(&text).unwrap().thickness(), 1.5);
    }

    #[test]
    fn reports_bad_records() {
        let text = square().replace("5 6", "5 9");
        assert!(matches!(
            read_part(&text),
            Err(Error::VertexOutOfRange { index: 9, count: 6, .. })
        ));

        let text = square().replace("100.000000000 50.000000000", "100.000000000 abc");
        assert!(matches!(read_part(&text), Err(Error::Syntax { .. })));

        // Cut right after the first vertex index
        let text = square();
        let cut = text.find("#~31").unwrap() + "#~31\r\nP\r\n1\r\n".len();
        assert!(matches!(
            read_part(&text[..cut]),
            Err(Error::UnexpectedEof { section: "#~31" })
        ));
    }

    #[test]
    fn rejects_open_contour() {
        let text = square().replace("LIN\r\n1 0\r\n4 1\r\n|~\r\n", "");
        assert!(matches!(read_part(&text), Err(Error::Part(_))));
    }
}
