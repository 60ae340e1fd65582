// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Positional editing of a contour.
//!
//! Assist algorithms describe their result as edits against the positions of
//! the input contour: trim the end of the line at position 3, replace the
//! line at position 5 with a chain, insert a chain after position 2. Each
//! position owns a small chain of output lines, so edits never shift the
//! positions of other lines. [`ContourEdit::finish`] flattens the chains
//! back into one list in contour order.

use bend_assist_geometry::{Line, Vector};
use smallvec::SmallVec;

use crate::contour::Contour;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default)]
struct Slot {
    /// Lines replacing the original line
    body: SmallVec<[Line; 3]>,
    /// Lines inserted after the body
    after: SmallVec<[Line; 2]>,
}

/// Pending edits against the lines of a contour.
#[derive(Debug, Clone)]
pub struct ContourEdit {
    slots: Vec<Slot>,
}

impl ContourEdit {
    /// Starts an edit where every position holds its original line.
    pub fn new(contour: &Contour) -> Self {
        Self::from_lines(contour.lines())
    }

    /// Starts an edit over an arbitrary line list.
    pub fn from_lines(lines: &[Line]) -> Self {
        let slots = lines
            .iter()
            .map(|l| Slot {
                body: SmallVec::from_elem(*l, 1),
                after: SmallVec::new(),
            })
            .collect();
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current lines at a position (the replacement chain, if any).
    pub fn lines_at(&self, pos: usize) -> Result<&[Line]> {
        Ok(&self.slot(pos)?.body)
    }

    /// Moves the start point of the first line at `pos` by `delta`.
    pub fn trim_start(&mut self, pos: usize, delta: Vector) -> Result<()> {
        if let Some(first) = self.slot_mut(pos)?.body.first_mut() {
            *first = first.trimmed(delta, Vector::zeros());
        }
        Ok(())
    }

    /// Moves the end point of the last line at `pos` by `delta`.
    pub fn trim_end(&mut self, pos: usize, delta: Vector) -> Result<()> {
        if let Some(last) = self.slot_mut(pos)?.body.last_mut() {
            *last = last.trimmed(Vector::zeros(), delta);
        }
        Ok(())
    }

    /// Translates every line at `pos`.
    pub fn translate(&mut self, pos: usize, dx: f64, dy: f64) -> Result<()> {
        for line in self.slot_mut(pos)?.body.iter_mut() {
            *line = line.translated(dx, dy);
        }
        Ok(())
    }

    /// Replaces the lines at `pos` with `lines`.
    pub fn replace<I>(&mut self, pos: usize, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = Line>,
    {
        self.slot_mut(pos)?.body = lines.into_iter().collect();
        Ok(())
    }

    /// Inserts `lines` after the lines at `pos`.
    ///
    /// Inserted lines are not affected by later trims of `pos`.
    pub fn insert_after<I>(&mut self, pos: usize, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = Line>,
    {
        self.slot_mut(pos)?.after.extend(lines);
        Ok(())
    }

    /// Flattens all positions into one list, dropping zero-length lines.
    pub fn finish(self) -> Vec<Line> {
        self.slots
            .into_iter()
            .flat_map(|slot| slot.body.into_iter().chain(slot.after))
            .filter(|l| !l.is_degenerate())
            .collect()
    }

    fn slot(&self, pos: usize) -> Result<&Slot> {
        self.slots.get(pos).ok_or(Error::PositionOutOfRange(pos))
    }

    fn slot_mut(&mut self, pos: usize) -> Result<&mut Slot> {
        self.slots.get_mut(pos).ok_or(Error::PositionOutOfRange(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::check_closed;
    use bend_assist_geometry::{connected_chain, Point};

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn square() -> Contour {
        let pts = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0), p(0.0, 0.0)];
        Contour::new(connected_chain(1, &pts)).expect("closed square")
    }

    #[test]
    fn unchanged_edit_round_trips() {
        let contour = square();
        let lines = ContourEdit::new(&contour).finish();
        assert_eq!(lines, contour.lines());
    }

    #[test]
    fn notch_keeps_ring_closed() {
        let contour = square();
        let mut edit = ContourEdit::new(&contour);
        // Cut a 2x2 notch into the corner at (10, 0)
        edit.trim_end(0, Vector::new(-2.0, 0.0)).unwrap();
        edit.trim_start(1, Vector::new(0.0, 2.0)).unwrap();
        edit.insert_after(0, connected_chain(0, &[p(8.0, 0.0), p(8.0, 2.0), p(10.0, 2.0)]))
            .unwrap();
        let lines = edit.finish();
        assert_eq!(lines.len(), 6);
        assert!(check_closed(&lines).is_ok());
    }

    #[test]
    fn replace_and_translate() {
        let contour = square();
        let mut edit = ContourEdit::new(&contour);
        edit.replace(0, connected_chain(0, &[p(0.0, 0.0), p(5.0, -3.0), p(10.0, 0.0)]))
            .unwrap();
        assert_eq!(edit.lines_at(0).unwrap().len(), 2);
        edit.translate(2, 0.0, 1.0).unwrap();
        assert_eq!(edit.lines_at(2).unwrap()[0].start(), p(10.0, 11.0));
        assert_eq!(edit.trim_end(9, Vector::zeros()), Err(Error::PositionOutOfRange(9)));
    }

    #[test]
    fn finish_drops_collapsed_lines() {
        let contour = square();
        let mut edit = ContourEdit::new(&contour);
        edit.trim_end(0, Vector::new(-10.0, 0.0)).unwrap();
        assert_eq!(edit.finish().len(), 3);
    }
}
