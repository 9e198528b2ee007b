//! Point-in-region test: bounding-box rejection followed by even-odd ray casting.

use crate::catalog::Region;
use crate::geometry::{Point, Ring};

/// Whether any polygon of `region` contains `point`.
///
/// Each polygon's bounding box is checked first; the exact ray-casting test only
/// runs on polygons whose box contains the point. Holes are not subtracted.
#[must_use]
pub fn contains(region: &Region, point: Point) -> bool {
    region
        .polygons()
        .iter()
        .any(|poly| poly.bbox.contains(point) && ring_contains(&poly.polygon.exterior, point))
}

/// Even-odd rule: a ray cast east from `point` crosses the ring an odd number of times
/// iff the point is inside.
///
/// Rings with fewer than three points contain nothing.
#[must_use]
pub fn ring_contains(ring: &Ring, point: Point) -> bool {
    if !ring.is_closed() {
        return false;
    }
    ring.edges()
        .filter(|&(start, end)| ray_crosses_edge(point, start, end))
        .count()
        % 2
        == 1
}

/// Whether the horizontal ray from `point` crosses the edge `start`-`end`.
///
/// A point level with either endpoint is nudged up to the next representable latitude
/// first, so that a ray through a shared vertex is counted for exactly one of the two
/// edges meeting there. The nudge only applies to this edge's test.
fn ray_crosses_edge(mut point: Point, start: Point, end: Point) -> bool {
    let (lo, hi) = if start.lat > end.lat {
        (end, start)
    } else {
        (start, end)
    };
    while point.lat.is_finite() && (point.lat == lo.lat || point.lat == hi.lat) {
        point.lat = point.lat.next_up();
    }
    if point.lat < lo.lat || point.lat > hi.lat {
        return false;
    }
    if lo.lon > hi.lon {
        if point.lon > lo.lon {
            return false;
        }
        if point.lon < hi.lon {
            return true;
        }
    } else {
        if point.lon > hi.lon {
            return false;
        }
        if point.lon < lo.lon {
            return true;
        }
    }
    (point.lat - lo.lat) / (point.lon - lo.lon) >= (hi.lat - lo.lat) / (hi.lon - lo.lon)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::geometry::{MultiPolygon, Polygon};

    fn ring(points: &[[f64; 2]]) -> Ring {
        points.iter().copied().map(Point::from).collect()
    }

    fn square() -> Ring {
        ring(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]])
    }

    #[rstest]
    #[case::center(5.0, 5.0, true)]
    #[case::near_corner(0.1, 9.9, true)]
    #[case::west(-1.0, 5.0, false)]
    #[case::east(11.0, 5.0, false)]
    #[case::north(5.0, 10.5, false)]
    #[case::south(5.0, -0.5, false)]
    // level with the bottom edge; nudged just above it
    #[case::bottom_edge(5.0, 0.0, true)]
    // level with the top edge; nudged just above it
    #[case::top_edge(5.0, 10.0, false)]
    fn square_containment(#[case] lon: f64, #[case] lat: f64, #[case] expected: bool) {
        assert_eq!(ring_contains(&square(), Point::new(lon, lat)), expected);
    }

    #[rstest]
    // the ray passes exactly through the apex at (5, 5)
    #[case::level_with_apex(2.0, 5.0, true)]
    #[case::below_apex(5.0, 4.0, true)]
    #[case::in_notch(6.0, 8.5, false)]
    #[case::left_arm(2.0, 7.0, true)]
    #[case::right_arm(8.0, 7.0, true)]
    fn concave_ring(#[case] lon: f64, #[case] lat: f64, #[case] expected: bool) {
        // a "V" notch cut into the top of a square
        let notched = ring(&[
            [0.0, 0.0],
            [10.0, 0.0],
            [10.0, 10.0],
            [5.0, 5.0],
            [0.0, 10.0],
        ]);
        assert_eq!(ring_contains(&notched, Point::new(lon, lat)), expected);
    }

    #[test]
    fn closure_is_implied() {
        let open = ring(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]);
        assert!(ring_contains(&open, Point::new(5.0, 5.0)));
        assert!(!ring_contains(&open, Point::new(15.0, 5.0)));
    }

    #[test]
    fn winding_order_does_not_matter() {
        let clockwise = ring(&[[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]]);
        assert!(ring_contains(&clockwise, Point::new(5.0, 5.0)));
        assert!(!ring_contains(&clockwise, Point::new(-5.0, 5.0)));
    }

    #[test]
    fn degenerate_rings_contain_nothing() {
        assert!(!ring_contains(&Ring::default(), Point::new(0.0, 0.0)));
        let segment = ring(&[[0.0, 0.0], [10.0, 10.0]]);
        assert!(!ring_contains(&segment, Point::new(5.0, 5.0)));
    }

    #[test]
    fn sloped_edges() {
        let triangle = ring(&[[0.0, 0.0], [10.0, 0.0], [0.0, 10.0]]);
        assert!(ring_contains(&triangle, Point::new(4.9, 5.0)));
        assert!(!ring_contains(&triangle, Point::new(5.1, 5.0)));
        assert!(ring_contains(&triangle, Point::new(1.0, 8.9)));
        assert!(!ring_contains(&triangle, Point::new(1.0, 9.1)));
    }

    #[test]
    fn region_is_union_of_polygons() {
        let region = Region::new(
            "Test/Islands".to_string(),
            MultiPolygon(vec![
                Polygon::from(ring(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]])),
                Polygon::from(ring(&[[5.0, 5.0], [6.0, 5.0], [6.0, 6.0], [5.0, 6.0]])),
            ]),
        );
        assert!(contains(&region, Point::new(0.5, 0.5)));
        assert!(contains(&region, Point::new(5.5, 5.5)));
        assert!(!contains(&region, Point::new(3.0, 3.0)));
    }

    #[test]
    fn holes_are_not_subtracted() {
        let region = Region::new(
            "Test/Donut".to_string(),
            MultiPolygon::from(Polygon::new(
                square(),
                vec![ring(&[[4.0, 4.0], [6.0, 4.0], [6.0, 6.0], [4.0, 6.0]])],
            )),
        );
        assert!(contains(&region, Point::new(5.0, 5.0)));
    }
}
