// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat pattern parts and assist classification.
//!
//! A [`Part`] owns the closed profile contour and the bend lines of a flat
//! pattern. Everything derived from them (vertices, convex hull, area,
//! bound, centroid and the assist candidates) is computed once on
//! construction, so a part is read-only afterwards.
//!
//! Area, bound and centroid come from the convex hull of the vertices, and
//! the centroid is the middle of the bound. For concave parts this is an
//! approximation; the quadrant tables used by the assists are defined
//! against this centroid.

use std::fmt;

use bend_assist_geometry::{
    centroid, connected_lines, convex_hull, polygon_area, strictly_inside, Bound, Line,
    Orientation, Point,
};
use bend_assist_topology::{renumber, Contour, Result, VertexIndex};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// The kind of change an assist applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssistKind {
    AddFlange,
    BendDeduction,
    BendRelief,
    CornerClose,
    CornerRelief,
}

impl AssistKind {
    pub const ALL: [AssistKind; 5] = [
        AssistKind::AddFlange,
        AssistKind::BendDeduction,
        AssistKind::BendRelief,
        AssistKind::CornerClose,
        AssistKind::CornerRelief,
    ];

    /// Human readable reason reported when the assist does not apply.
    pub fn failure_reason(self) -> &'static str {
        match self {
            AssistKind::AddFlange => "Cannot add flange",
            AssistKind::BendDeduction => "Cannot apply bend deduction",
            AssistKind::BendRelief => "Cannot apply Bend relief",
            AssistKind::CornerClose => "Cannot apply corner closing",
            AssistKind::CornerRelief => "Cannot apply corner relief",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AssistKind::AddFlange => "add-flange",
            AssistKind::BendDeduction => "bend-deduction",
            AssistKind::BendRelief => "bend-relief",
            AssistKind::CornerClose => "corner-close",
            AssistKind::CornerRelief => "corner-relief",
        }
    }
}

impl fmt::Display for AssistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An interior vertex where an assist can be applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistInfo {
    pub vertex: Point,
    /// Profile line indices touching the vertex, `[incoming, outgoing]`
    pub plines: SmallVec<[i32; 2]>,
    /// Bend line indices touching the vertex
    pub bend_lines: SmallVec<[i32; 2]>,
    pub kind: AssistKind,
}

/// A flat pattern: closed profile contour, bend lines and thickness.
#[derive(Debug, Clone)]
pub struct Part {
    contour: Contour,
    bend_lines: Vec<Line>,
    thickness: f64,
    vertices: Vec<Point>,
    hull: Vec<Point>,
    area: f64,
    bound: Bound,
    centroid: Point,
    assist_info: Vec<AssistInfo>,
}

impl Part {
    /// Builds a part from its profile contour and bend lines.
    ///
    /// Profile lines are renumbered `1..=n` and all points get canonical
    /// indices by coordinate. Bend lines are sorted by start Y, then X.
    /// Fails if the profile lines do not form one closed loop.
    pub fn new(plines: Vec<Line>, mut bend_lines: Vec<Line>, thickness: f64) -> Result<Self> {
        bend_lines.sort_by(|a, b| {
            let (p, q) = (a.start(), b.start());
            p.y.total_cmp(&q.y).then(p.x.total_cmp(&q.x))
        });
        let (plines, bend_lines) = renumber(&plines, &bend_lines);
        let contour = Contour::new(plines)?;

        let vertices = collect_vertices(&contour, &bend_lines);
        let hull = convex_hull(&vertices);
        let area = polygon_area(&hull);
        let bound = Bound::from_points(&hull);
        let centroid = centroid(&hull);
        let assist_info = classify(&contour, &bend_lines, &hull);

        tracing::debug!(
            plines = contour.len(),
            bend_lines = bend_lines.len(),
            thickness,
            candidates = assist_info.len(),
            "Built part"
        );

        Ok(Self {
            contour,
            bend_lines,
            thickness,
            vertices,
            hull,
            area,
            bound,
            centroid,
            assist_info,
        })
    }

    /// Profile lines in contour order.
    pub fn plines(&self) -> &[Line] {
        self.contour.lines()
    }

    pub fn bend_lines(&self) -> &[Line] {
        &self.bend_lines
    }

    pub fn contour(&self) -> &Contour {
        &self.contour
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Profile start points and bend line end points, without duplicates.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Convex hull of the vertices, counter-clockwise.
    pub fn hull(&self) -> &[Point] {
        &self.hull
    }

    /// Area of the convex hull.
    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn bound(&self) -> Bound {
        self.bound
    }

    /// Middle of the bound.
    pub fn centroid(&self) -> Point {
        self.centroid
    }

    /// All assist candidates.
    pub fn assist_info(&self) -> &[AssistInfo] {
        &self.assist_info
    }

    /// Assist candidates of one kind.
    pub fn candidates(&self, kind: AssistKind) -> impl Iterator<Item = &AssistInfo> + '_ {
        self.assist_info.iter().filter(move |info| info.kind == kind)
    }

    /// Profile line with the given index.
    pub fn pline(&self, index: i32) -> Option<&Line> {
        self.contour.position_of(index).map(|pos| self.contour.line(pos))
    }

    /// Bend line with the given index.
    pub fn bend_line(&self, index: i32) -> Option<&Line> {
        self.bend_lines.iter().find(|l| l.index() == index)
    }

    /// Regenerates the vertex table: every distinct point once, ordered by
    /// its index (profile points in contour order, then bend line points).
    pub fn regen(&self) -> Vec<Point> {
        let mut table: Vec<Point> = Vec::new();
        let mut seen = VertexIndex::new();
        let points = self
            .plines()
            .iter()
            .map(Line::start)
            .chain(self.bend_lines.iter().flat_map(|l| [l.start(), l.end()]));
        for p in points {
            if seen.find_near(&p).is_none() {
                seen.insert(p, ());
                table.push(p);
            }
        }
        table.sort_by_key(|p| p.index);
        table
    }
}

/// The result of a successful assist.
///
/// The processed part satisfies every [`Part`] invariant, so it can be fed
/// into another assist or written out.
#[derive(Debug, Clone)]
pub struct ProcessedPart {
    part: Part,
    applied: AssistKind,
}

impl ProcessedPart {
    pub fn new(part: Part, applied: AssistKind) -> Self {
        Self { part, applied }
    }

    pub fn part(&self) -> &Part {
        &self.part
    }

    pub fn into_part(self) -> Part {
        self.part
    }

    /// The assist that produced this part.
    pub fn applied(&self) -> AssistKind {
        self.applied
    }
}

impl AsRef<Part> for ProcessedPart {
    fn as_ref(&self) -> &Part {
        &self.part
    }
}

fn collect_vertices(contour: &Contour, bend_lines: &[Line]) -> Vec<Point> {
    let mut seen = VertexIndex::new();
    let mut vertices = Vec::with_capacity(contour.len() + bend_lines.len() * 2);
    let points = contour
        .vertices()
        .chain(bend_lines.iter().flat_map(|l| [l.start(), l.end()]));
    for p in points {
        if seen.find_near(&p).is_none() {
            seen.insert(p, ());
            vertices.push(p);
        }
    }
    vertices
}

/// Finds the interior bend line end points and the assists they call for.
///
/// One bend line at a vertex calls for a bend relief; two non-inclined bend
/// lines call for a corner close and a corner relief.
fn classify(contour: &Contour, bend_lines: &[Line], hull: &[Point]) -> Vec<AssistInfo> {
    let mut visited = VertexIndex::new();
    let mut info = Vec::new();

    for vertex in bend_lines.iter().flat_map(|l| [l.start(), l.end()]) {
        if visited.find_near(&vertex).is_some() {
            continue;
        }
        visited.insert(vertex, ());
        if !strictly_inside(hull, &vertex) {
            continue;
        }

        let bends = connected_lines(&vertex, bend_lines);
        let plines = contour.lines_at(&vertex);
        if bends.len() + plines.len() <= 2 {
            continue;
        }

        let pline_indices: SmallVec<[i32; 2]> = plines.iter().map(|l| l.index()).collect();
        let bend_indices: SmallVec<[i32; 2]> = bends.iter().map(|l| l.index()).collect();
        let entry = |kind| AssistInfo {
            vertex,
            plines: pline_indices.clone(),
            bend_lines: bend_indices.clone(),
            kind,
        };

        match bends.len() {
            1 => info.push(entry(AssistKind::BendRelief)),
            2 if bends.iter().all(|l| l.orientation() != Orientation::Inclined) => {
                info.push(entry(AssistKind::CornerClose));
                info.push(entry(AssistKind::CornerRelief));
            }
            _ => {}
        }
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bend_assist_geometry::{connected_chain, BendLineInfo};

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn ring(points: &[(f64, f64)]) -> Vec<Line> {
        let mut pts: Vec<Point> = points.iter().map(|&(x, y)| p(x, y)).collect();
        pts.push(pts[0]);
        connected_chain(0, &pts)
    }

    fn bend(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
        Line::bend(p(x1, y1), p(x2, y2), 1, BendLineInfo::new(90.0, 2.0, 3.665))
    }

    #[test]
    fn derived_measures_come_from_the_hull() {
        let plines = ring(&[(0.0, 0.0), (100.0, 0.0), (100.0, 70.0), (20.0, 70.0), (20.0, 50.0), (0.0, 50.0)]);
        let part = Part::new(plines, vec![bend(20.0, 50.0, 100.0, 50.0)], 2.0).unwrap();

        assert_eq!(part.vertices().len(), 7);
        assert_eq!(part.hull().len(), 5);
        for h in part.hull() {
            assert!(part.vertices().contains(h));
            assert!(part.bound().contains(h));
        }
        assert_relative_eq!(part.area(), 6800.0);
        assert_eq!(part.centroid(), p(50.0, 35.0));
        assert_relative_eq!(part.bound().height(), 70.0);
    }

    #[test]
    fn lines_and_points_are_renumbered() {
        let plines = ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let part = Part::new(plines, Vec::new(), 1.0).unwrap();
        let indices: Vec<i32> = part.plines().iter().map(Line::index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
        assert_eq!(part.plines()[3].end().index, 1);
        let table = part.regen();
        assert_eq!(table.len(), 4);
        assert_eq!(table.iter().map(|p| p.index).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn bend_lines_are_sorted_by_y_then_x() {
        let plines = ring(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)]);
        let bends = vec![
            bend(0.0, 70.0, 100.0, 70.0).with_index(1),
            bend(50.0, 30.0, 100.0, 30.0).with_index(2),
            bend(0.0, 30.0, 50.0, 30.0).with_index(3),
        ];
        let part = Part::new(plines, bends, 2.0).unwrap();
        let order: Vec<i32> = part.bend_lines().iter().map(Line::index).collect();
        assert_eq!(order, vec![3, 2, 1]);
    }

    #[test]
    fn classifies_bend_relief_vertex() {
        let plines = ring(&[(0.0, 0.0), (100.0, 0.0), (100.0, 70.0), (20.0, 70.0), (20.0, 50.0), (0.0, 50.0)]);
        let part = Part::new(plines, vec![bend(20.0, 50.0, 100.0, 50.0)], 2.0).unwrap();

        // (100, 50) lies on the hull boundary and is not a candidate
        assert_eq!(part.assist_info().len(), 1);
        let info = &part.assist_info()[0];
        assert_eq!(info.kind, AssistKind::BendRelief);
        assert_eq!(info.vertex, p(20.0, 50.0));
        assert_eq!(info.plines.as_slice(), &[4, 5]);
    }

    #[test]
    fn classifies_corner_vertex() {
        let plines = ring(&[(0.0, 0.0), (100.0, 0.0), (100.0, 80.0), (80.0, 80.0), (80.0, 100.0), (0.0, 100.0)]);
        let bends = vec![bend(80.0, 0.0, 80.0, 80.0), bend(0.0, 80.0, 80.0, 80.0)];
        let part = Part::new(plines, bends, 2.0).unwrap();

        assert_eq!(part.candidates(AssistKind::CornerClose).count(), 1);
        assert_eq!(part.candidates(AssistKind::CornerRelief).count(), 1);
        assert_eq!(part.candidates(AssistKind::BendRelief).count(), 0);
        let info = part.candidates(AssistKind::CornerClose).next().unwrap();
        assert_eq!(info.vertex, p(80.0, 80.0));
        assert_eq!(info.plines.as_slice(), &[3, 4]);
        assert_eq!(info.bend_lines.len(), 2);
    }

    #[test]
    fn rejects_open_profile() {
        let mut plines = ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        plines.pop();
        assert!(Part::new(plines, Vec::new(), 1.0).is_err());
    }
}
