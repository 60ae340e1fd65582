// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Convex hull and polygon measures.

use crate::bound::Bound;
use crate::point::{Point, EPSILON};

/// Convex hull of a point set, counter-clockwise, without collinear points.
///
/// Uses the monotone chain algorithm. Duplicate points are ignored; fewer
/// than three distinct points are returned as they are.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut pts: Vec<Point> = points.iter().copied().filter(Point::is_set).collect();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup_by(|a, b| a.coincides(b));
    if pts.len() < 3 {
        return pts;
    }

    let mut hull: Vec<Point> = Vec::with_capacity(pts.len() * 2);
    // Lower chain
    for p in &pts {
        while hull.len() >= 2 && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= EPSILON {
            hull.pop();
        }
        hull.push(*p);
    }
    // Upper chain
    let lower_len = hull.len() + 1;
    for p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= EPSILON
        {
            hull.pop();
        }
        hull.push(*p);
    }
    hull.pop();
    hull
}

/// Twice the signed area of the triangle `o, a, b`.
#[inline]
fn cross(o: &Point, a: &Point, b: &Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Area of a simple polygon (shoelace formula), always non-negative.
pub fn polygon_area(polygon: &[Point]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let twice: f64 = polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    twice.abs() / 2.0
}

/// Centre of the bounding box of `points`.
///
/// This is the reference point all quadrant decisions are made against. It
/// is not the area centroid.
pub fn centroid(points: &[Point]) -> Point {
    let bound = Bound::from_points(points);
    if bound.is_empty() {
        return Point::unset();
    }
    bound.mid()
}

/// Checks whether `p` lies strictly inside the counter-clockwise `hull`.
///
/// Points on the hull boundary (within [`EPSILON`]) are not inside.
pub fn strictly_inside(hull: &[Point], p: &Point) -> bool {
    if hull.len() < 3 {
        return false;
    }
    hull.iter()
        .zip(hull.iter().cycle().skip(1))
        .all(|(a, b)| {
            let len = a.distance_to(b);
            len > 0.0 && cross(a, b, p) / len > EPSILON
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn l_shape() -> Vec<Point> {
        vec![
            p(0.0, 0.0),
            p(100.0, 0.0),
            p(100.0, 70.0),
            p(20.0, 70.0),
            p(20.0, 50.0),
            p(0.0, 50.0),
        ]
    }

    #[test]
    fn hull_drops_concave_and_collinear_points() {
        let mut pts = l_shape();
        pts.push(p(50.0, 0.0));
        pts.push(p(100.0, 0.0));
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 5);
        assert!(!hull.contains(&p(20.0, 50.0)));
        assert!(!hull.contains(&p(50.0, 0.0)));
        // Every hull point comes from the input and lies within its bound
        let bound = Bound::from_points(&pts);
        for h in &hull {
            assert!(pts.contains(h));
            assert!(bound.contains(h));
        }
    }

    #[test]
    fn hull_is_counter_clockwise() {
        let hull = convex_hull(&l_shape());
        let signed: f64 = hull
            .iter()
            .zip(hull.iter().cycle().skip(1))
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum();
        assert!(signed > 0.0);
    }

    #[test]
    fn areas() {
        assert_relative_eq!(polygon_area(&l_shape()), 100.0 * 50.0 + 80.0 * 20.0);
        assert_relative_eq!(polygon_area(&convex_hull(&l_shape())), 100.0 * 70.0 - 20.0 * 20.0 / 2.0);
        assert_eq!(polygon_area(&[p(0.0, 0.0), p(1.0, 1.0)]), 0.0);
    }

    #[test]
    fn centroid_is_bound_mid() {
        assert_eq!(centroid(&l_shape()), p(50.0, 35.0));
        assert!(!centroid(&[]).is_set());
    }

    #[test]
    fn interior_test_excludes_boundary() {
        let hull = convex_hull(&l_shape());
        assert!(strictly_inside(&hull, &p(20.0, 50.0)));
        assert!(!strictly_inside(&hull, &p(50.0, 0.0)));
        assert!(!strictly_inside(&hull, &p(100.0, 70.0)));
        assert!(!strictly_inside(&hull, &p(150.0, 10.0)));
    }
}
