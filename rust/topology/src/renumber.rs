// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line and vertex renumbering.

use bend_assist_geometry::{Line, Point};

use crate::spatial::VertexIndex;

/// Assigns 1-based vertex indices by coordinate.
///
/// Coincident points get the index (and the exact coordinates) of the first
/// point seen at that location.
#[derive(Debug, Default)]
pub struct VertexNumbering {
    index: VertexIndex<i32>,
}

impl VertexNumbering {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical copy of `p`.
    pub fn canonical(&mut self, p: Point) -> Point {
        let next = self.index.len() as i32 + 1;
        let (stored, &index) = self.index.find_or_insert_with(p, || next);
        stored.with_index(index)
    }

    /// Line with both end points replaced by their canonical copies.
    pub fn canonical_line(&mut self, line: &Line) -> Line {
        let start = self.canonical(line.start());
        let end = self.canonical(line.end());
        line.with_points(start, end)
    }

    /// Number of distinct vertices seen so far.
    pub fn count(&self) -> usize {
        self.index.len()
    }
}

/// Renumbers profile lines `1..=n` in order and gives every point a
/// canonical index.
///
/// Profile points are numbered in contour order first, bend line points
/// after them. Bend line indices are kept.
pub fn renumber(plines: &[Line], bend_lines: &[Line]) -> (Vec<Line>, Vec<Line>) {
    let mut numbering = VertexNumbering::new();
    let plines = plines
        .iter()
        .enumerate()
        .map(|(i, l)| numbering.canonical_line(l).with_index(i as i32 + 1))
        .collect();
    let bend_lines = bend_lines
        .iter()
        .map(|l| numbering.canonical_line(l))
        .collect();
    (plines, bend_lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bend_assist_geometry::{connected_chain, BendLineInfo};

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn profile_lines_are_numbered_sequentially() {
        let pts = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0), p(0.0, 0.0)];
        let chain = connected_chain(42, &pts);
        let bend = Line::bend(p(0.0, 5.0), p(10.0, 5.0), 7, BendLineInfo::default());

        let (plines, bends) = renumber(&chain, &[bend]);
        let indices: Vec<i32> = plines.iter().map(Line::index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
        assert_eq!(bends[0].index(), 7);

        let starts: Vec<i32> = plines.iter().map(|l| l.start().index).collect();
        assert_eq!(starts, vec![1, 2, 3, 4]);
        // The closing point shares the first index
        assert_eq!(plines[3].end().index, 1);
        assert_eq!(bends[0].start().index, 5);
        assert_eq!(bends[0].end().index, 6);
    }

    #[test]
    fn coincident_points_are_snapped() {
        let mut numbering = VertexNumbering::new();
        let a = numbering.canonical(p(1.0, 1.0));
        let b = numbering.canonical(p(1.0 + 5e-7, 1.0));
        assert_eq!(a.index, b.index);
        assert_eq!(b.x, 1.0);
        assert_eq!(numbering.count(), 1);
    }
}
