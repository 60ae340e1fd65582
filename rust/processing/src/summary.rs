// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use bend_assist_core::{AssistKind, Part};
use serde::{Deserialize, Serialize};

/// Reportable measures of a part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSummary {
    pub width: f64,
    pub height: f64,
    /// Convex hull area
    pub area: f64,
    pub centroid: [f64; 2],
    pub thickness: f64,
    pub plines: usize,
    pub bend_lines: usize,
    pub vertices: usize,
    /// Assists with at least one candidate. Flanges are not listed since
    /// they depend on the chosen edge.
    pub assists: Vec<AssistKind>,
}

pub fn summarize(part: &Part) -> PartSummary {
    let bound = part.bound();
    let centroid = part.centroid();
    let assists = AssistKind::ALL
        .into_iter()
        .filter(|&kind| match kind {
            AssistKind::AddFlange => false,
            AssistKind::BendDeduction => !part.bend_lines().is_empty(),
            _ => part.candidates(kind).next().is_some(),
        })
        .collect();

    PartSummary {
        width: bound.width(),
        height: bound.height(),
        area: part.area(),
        centroid: [centroid.x, centroid.y],
        thickness: part.thickness(),
        plines: part.plines().len(),
        bend_lines: part.bend_lines().len(),
        vertices: part.vertices().len(),
        assists,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bend_assist_geometry::{connected_chain, BendLineInfo, Line, Point};

    #[test]
    fn l_part_summary() {
        let corners = [(0.0, 0.0), (100.0, 0.0), (100.0, 70.0), (20.0, 70.0), (20.0, 50.0), (0.0, 50.0), (0.0, 0.0)];
        let points: Vec<Point> = corners.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let bend = Line::bend(
            Point::new(20.0, 50.0),
            Point::new(100.0, 50.0),
            1,
            BendLineInfo::new(90.0, 2.0, 3.665),
        );
        let part = Part::new(connected_chain(0, &points), vec![bend], 2.0).unwrap();

        let summary = summarize(&part);
        assert_eq!(summary.width, 100.0);
        assert_eq!(summary.height, 70.0);
        assert_eq!(summary.area, 6800.0);
        assert_eq!(summary.centroid, [50.0, 35.0]);
        assert_eq!(summary.plines, 6);
        assert_eq!(summary.vertices, 7);
        assert_eq!(summary.assists, vec![AssistKind::BendDeduction, AssistKind::BendRelief]);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["assists"][1], "BendRelief");
    }
}
