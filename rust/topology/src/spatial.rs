// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial index for tolerance-based vertex lookup and merging.
//!
//! Uses a grid-based spatial hash for O(1) average-case vertex queries. Two
//! points are the same vertex when they [coincide](Point::coincides), so the
//! cell size equals the coordinate tolerance and a lookup only has to visit
//! the 3x3 neighbourhood of the query cell.

use bend_assist_geometry::{Point, EPSILON};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// A spatial hash grid mapping vertices to values.
#[derive(Debug, Clone)]
pub struct VertexIndex<T> {
    cell_size: f64,
    grid: FxHashMap<(i64, i64), SmallVec<[(Point, T); 1]>>,
    len: usize,
}

impl<T> Default for VertexIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> VertexIndex<T> {
    /// Creates an empty index using the coordinate tolerance as cell size.
    pub fn new() -> Self {
        Self {
            cell_size: EPSILON,
            grid: FxHashMap::default(),
            len: 0,
        }
    }

    /// Number of inserted entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a value at `p`, keeping any value already stored there.
    pub fn insert(&mut self, p: Point, value: T) {
        let cell = self.cell_coords(&p);
        self.grid.entry(cell).or_default().push((p, value));
        self.len += 1;
    }

    /// Finds the first value stored at a point coinciding with `p`.
    pub fn find_near(&self, p: &Point) -> Option<&T> {
        self.find_entry(p).map(|(_, value)| value)
    }

    /// Finds the first entry (stored point and value) coinciding with `p`.
    pub fn find_entry(&self, p: &Point) -> Option<&(Point, T)> {
        self.locate(p).map(|(cell, slot)| &self.grid[&cell][slot])
    }

    /// Finds all values stored at points coinciding with `p`.
    pub fn find_all_near(&self, p: &Point) -> Vec<&T> {
        let (cx, cy) = self.cell_coords(p);
        let mut result = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(entries) = self.grid.get(&(cx + dx, cy + dy)) {
                    result.extend(entries.iter().filter(|(q, _)| q.coincides(p)).map(|(_, v)| v));
                }
            }
        }
        result
    }

    /// Returns the entry coinciding with `p`, or inserts `make()` at `p`.
    ///
    /// This is the merge-or-create step used to give coincident points a
    /// shared identity. The stored point is returned, not the query point.
    pub fn find_or_insert_with<F>(&mut self, p: Point, make: F) -> (Point, &T)
    where
        F: FnOnce() -> T,
    {
        if let Some((cell, slot)) = self.locate(&p) {
            let (q, value) = &self.grid[&cell][slot];
            return (*q, value);
        }
        let cell = self.cell_coords(&p);
        let entries = self.grid.entry(cell).or_default();
        entries.push((p, make()));
        self.len += 1;
        let (q, value) = &entries[entries.len() - 1];
        (*q, value)
    }

    /// Cell and slot of the first entry coinciding with `p`.
    fn locate(&self, p: &Point) -> Option<((i64, i64), usize)> {
        let (cx, cy) = self.cell_coords(p);
        // Search 3x3 neighbourhood
        for dx in -1..=1 {
            for dy in -1..=1 {
                let cell = (cx + dx, cy + dy);
                if let Some(entries) = self.grid.get(&cell) {
                    if let Some(slot) = entries.iter().position(|(q, _)| q.coincides(p)) {
                        return Some((cell, slot));
                    }
                }
            }
        }
        None
    }

    fn cell_coords(&self, p: &Point) -> (i64, i64) {
        (
            (p.x / self.cell_size).floor() as i64,
            (p.y / self.cell_size).floor() as i64,
        )
    }
}
