// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Closed profile contours.
//!
//! A [`Contour`] is an ordered ring of profile lines where every line ends
//! where the next one starts (wrap-around included). The ring is validated
//! once on construction; afterwards the lines touching a vertex are found
//! through a [`VertexIndex`] instead of scanning the whole list.

use bend_assist_geometry::{Line, Point};
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::spatial::VertexIndex;

/// A validated closed ring of profile lines.
#[derive(Debug, Clone)]
pub struct Contour {
    lines: Vec<Line>,
    /// Start point of each line mapped to the line's position in the ring
    starts: VertexIndex<usize>,
}

impl Contour {
    /// Builds a contour, checking that `lines` form one closed loop of
    /// non-degenerate, non-duplicated profile lines.
    pub fn new(lines: Vec<Line>) -> Result<Self> {
        if lines.is_empty() {
            return Err(Error::EmptyContour);
        }

        let mut starts = VertexIndex::new();
        for (pos, line) in lines.iter().enumerate() {
            if !line.is_profile() {
                return Err(Error::NotProfileLine(line.index()));
            }
            if line.is_degenerate() {
                return Err(Error::DegenerateLine(line.index()));
            }
            let duplicate = starts
                .find_all_near(&line.start())
                .into_iter()
                .any(|&other: &usize| lines[other].is_duplicate_of(line));
            if duplicate {
                return Err(Error::DuplicateLine(line.index()));
            }
            starts.insert(line.start(), pos);
        }

        check_closed(&lines)?;
        Ok(Self { lines, starts })
    }

    /// Lines in contour order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at a ring position, wrapping around.
    pub fn line(&self, pos: usize) -> &Line {
        &self.lines[pos % self.lines.len()]
    }

    /// Position of the line preceding `pos` in the ring.
    pub fn prev(&self, pos: usize) -> usize {
        (pos + self.lines.len() - 1) % self.lines.len()
    }

    /// Position of the line following `pos` in the ring.
    pub fn next(&self, pos: usize) -> usize {
        (pos + 1) % self.lines.len()
    }

    /// Position of the line with the given line index.
    pub fn position_of(&self, index: i32) -> Option<usize> {
        self.lines.iter().position(|l| l.index() == index)
    }

    /// Position of the line that starts at `p`.
    ///
    /// For a contour touching itself at `p` the first such line is returned.
    pub fn outgoing_position(&self, p: &Point) -> Option<usize> {
        self.starts.find_near(p).copied()
    }

    /// Position of the line that ends at `p`.
    pub fn incoming_position(&self, p: &Point) -> Option<usize> {
        self.outgoing_position(p).map(|pos| self.prev(pos))
    }

    /// The line ending at `p`.
    pub fn incoming(&self, p: &Point) -> Option<&Line> {
        self.incoming_position(p).map(|pos| &self.lines[pos])
    }

    /// The line starting at `p`.
    pub fn outgoing(&self, p: &Point) -> Option<&Line> {
        self.outgoing_position(p).map(|pos| &self.lines[pos])
    }

    /// Lines touching `p`, ordered `[incoming, outgoing]`.
    ///
    /// Empty if `p` is not a contour vertex.
    pub fn lines_at(&self, p: &Point) -> SmallVec<[&Line; 2]> {
        let mut result = SmallVec::new();
        if let Some(pos) = self.outgoing_position(p) {
            result.push(&self.lines[self.prev(pos)]);
            result.push(&self.lines[pos]);
        }
        result
    }

    /// Returns true if `p` is a contour vertex.
    pub fn has_vertex(&self, p: &Point) -> bool {
        self.starts.find_near(p).is_some()
    }

    /// Contour vertices in order (the start point of every line).
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.lines.iter().map(Line::start)
    }
}

/// Checks that every line ends where the next one starts, cyclically.
pub fn check_closed(lines: &[Line]) -> Result<()> {
    if lines.is_empty() {
        return Err(Error::EmptyContour);
    }
    for (line, next) in lines.iter().zip(lines.iter().cycle().skip(1)) {
        if !line.end().coincides(&next.start()) {
            return Err(Error::OpenContour(line.index(), next.index()));
        }
    }
    Ok(())
}
