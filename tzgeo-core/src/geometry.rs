//! Planar geometry in longitude/latitude degree space.
//!
//! All math here treats degrees as flat Cartesian coordinates. Distances are only
//! comparable with each other, they are not physical lengths.

use std::vec;

use serde::{Deserialize, Serialize};
use tzgeo_dataset::Position;

/// A location given by longitude and latitude in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Longitude, positive east of Greenwich.
    pub lon: f64,
    /// Latitude, positive north of the equator.
    pub lat: f64,
}

impl Point {
    /// Creates a point from longitude and latitude, in that order.
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Whether both coordinates lie within the valid degree bounds. NaN never does.
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        (-180.0..=180.0).contains(&self.lon) && (-90.0..=90.0).contains(&self.lat)
    }

    /// Euclidean distance in degree space.
    #[must_use]
    pub fn distance(&self, other: Self) -> f64 {
        (self.lon - other.lon).hypot(self.lat - other.lat)
    }
}

impl From<[f64; 2]> for Point {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<Point> for [f64; 2] {
    fn from(point: Point) -> Self {
        [point.lon, point.lat]
    }
}

impl From<(f64, f64)> for Point {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

impl From<Point> for (f64, f64) {
    fn from(point: Point) -> Self {
        (point.lon, point.lat)
    }
}

impl From<Position> for Point {
    fn from(position: Position) -> Self {
        Self {
            lon: position.lon,
            lat: position.lat,
        }
    }
}

/// Axis-aligned rectangle with inclusive bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// South-west corner.
    pub min: Point,
    /// North-east corner.
    pub max: Point,
}

impl BoundingBox {
    /// Smallest box enclosing `points`.
    ///
    /// No points gives a degenerate box at the origin.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Self {
        let Some((first, rest)) = points.split_first() else {
            return Self::default();
        };
        rest.iter().fold(
            Self {
                min: *first,
                max: *first,
            },
            |bbox, p| Self {
                min: Point::new(bbox.min.lon.min(p.lon), bbox.min.lat.min(p.lat)),
                max: Point::new(bbox.max.lon.max(p.lon), bbox.max.lat.max(p.lat)),
            },
        )
    }

    /// Whether `point` lies inside or on the edge of the box.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.min.lat <= point.lat
            && point.lat <= self.max.lat
            && self.min.lon <= point.lon
            && point.lon <= self.max.lon
    }
}

/// A closed loop of points. Closure is implied: the last point connects back to the first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ring(Vec<Point>);

impl Ring {
    /// Wraps `points` without copying them.
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// The points in ring order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Number of points, counting a repeated closing point.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the ring has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A ring needs at least three points to enclose any area.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.0.len() >= 3
    }

    /// Smallest box enclosing every point of the ring.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.0)
    }

    /// Consecutive point pairs, starting with the closing edge from the last point to the first.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let closing = self.0.last().copied();
        closing
            .into_iter()
            .chain(self.0.iter().copied())
            .zip(self.0.iter().copied())
    }

    /// Area-weighted centroid (shoelace formula).
    ///
    /// Rings with zero or near-zero area fall back to the mean of their vertices,
    /// and an empty ring gives the origin.
    #[must_use]
    pub fn centroid(&self) -> Point {
        if self.0.is_empty() {
            return Point::default();
        }
        let (mut twice_area, mut cx, mut cy) = (0.0, 0.0, 0.0);
        for (a, b) in self.edges() {
            let cross = a.lon * b.lat - b.lon * a.lat;
            twice_area += cross;
            cx += (a.lon + b.lon) * cross;
            cy += (a.lat + b.lat) * cross;
        }
        if (twice_area / 2.0).abs() <= f64::EPSILON {
            return self.vertex_mean();
        }
        Point::new(cx / (3.0 * twice_area), cy / (3.0 * twice_area))
    }

    #[expect(clippy::cast_precision_loss, reason = "rings are far below 2^52 points")]
    fn vertex_mean(&self) -> Point {
        let n = self.0.len() as f64;
        let (lon, lat) = self
            .0
            .iter()
            .fold((0.0, 0.0), |(lon, lat), p| (lon + p.lon, lat + p.lat));
        Point::new(lon / n, lat / n)
    }
}

impl From<Vec<Point>> for Ring {
    fn from(points: Vec<Point>) -> Self {
        Self(points)
    }
}

impl FromIterator<Point> for Ring {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// An outer ring with optional holes.
///
/// Containment only considers the exterior; holes are kept so that datasets
/// carrying them round-trip without loss.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    /// The outer boundary.
    pub exterior: Ring,
    /// Holes, in dataset order.
    pub interiors: Vec<Ring>,
}

impl Polygon {
    /// Creates a polygon from its outer ring and holes.
    #[must_use]
    pub fn new(exterior: Ring, interiors: Vec<Ring>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }
}

impl From<Ring> for Polygon {
    fn from(exterior: Ring) -> Self {
        Self::new(exterior, Vec::new())
    }
}

/// The polygons that make up one region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiPolygon(
    /// Polygons in dataset order.
    pub Vec<Polygon>,
);

impl From<Polygon> for MultiPolygon {
    fn from(polygon: Polygon) -> Self {
        Self(vec![polygon])
    }
}

impl IntoIterator for MultiPolygon {
    type Item = Polygon;
    type IntoIter = vec::IntoIter<Polygon>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    use super::*;

    fn ring(points: &[[f64; 2]]) -> Ring {
        points.iter().copied().map(Point::from).collect()
    }

    #[rstest]
    #[case(Point::new(180.0, 90.0), true)]
    #[case(Point::new(-180.0, -90.0), true)]
    #[case(Point::new(180.000_001, 0.0), false)]
    #[case(Point::new(0.0, -90.1), false)]
    #[case(Point::new(f64::NAN, 0.0), false)]
    #[case(Point::new(0.0, f64::INFINITY), false)]
    fn point_range(#[case] point: Point, #[case] expected: bool) {
        assert_eq!(point.is_in_range(), expected);
    }

    #[test]
    fn planar_distance() {
        assert_abs_diff_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
        assert_abs_diff_eq!(Point::new(-1.0, 2.0).distance(Point::new(-1.0, 2.0)), 0.0);
    }

    #[test]
    fn point_conversions() {
        let p = Point::from([1.0, 2.0]);
        assert_eq!(p, Point::new(1.0, 2.0));
        assert_eq!(<[f64; 2]>::from(p), [1.0, 2.0]);
        assert_eq!(Point::from((1.0, 2.0)), p);
        assert_eq!(<(f64, f64)>::from(p), (1.0, 2.0));
        assert_eq!(Point::from(Position::new(1.0, 2.0)), p);
    }

    #[test]
    fn bounding_box_of_ring() {
        let bbox = ring(&[[3.0, -1.0], [-2.0, 4.0], [5.0, 2.0]]).bounding_box();
        assert_eq!(bbox.min, Point::new(-2.0, -1.0));
        assert_eq!(bbox.max, Point::new(5.0, 4.0));
    }

    #[test]
    fn bounding_box_of_nothing_is_origin() {
        let bbox = BoundingBox::from_points(&[]);
        assert_eq!(bbox, BoundingBox::default());
        assert!(bbox.contains(Point::new(0.0, 0.0)));
        assert!(!bbox.contains(Point::new(0.0, 0.1)));
    }

    #[rstest]
    #[case(Point::new(0.0, 0.0), true)]
    #[case(Point::new(10.0, 10.0), true)]
    #[case(Point::new(10.0, 5.0), true)]
    #[case(Point::new(10.000_1, 5.0), false)]
    #[case(Point::new(5.0, -0.000_1), false)]
    fn bounding_box_bounds_are_inclusive(#[case] point: Point, #[case] expected: bool) {
        let bbox = ring(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]).bounding_box();
        assert_eq!(bbox.contains(point), expected);
    }

    #[test]
    fn edges_wrap_around() {
        let edges: Vec<_> = ring(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]).edges().collect();
        assert_eq!(
            edges,
            vec![
                (Point::new(1.0, 1.0), Point::new(0.0, 0.0)),
                (Point::new(0.0, 0.0), Point::new(1.0, 0.0)),
                (Point::new(1.0, 0.0), Point::new(1.0, 1.0)),
            ]
        );
        assert_eq!(Ring::default().edges().count(), 0);
    }

    #[rstest]
    #[case::open(&[[0.0, 0.0], [4.0, 0.0], [4.0, 2.0], [0.0, 2.0]])]
    #[case::closed(&[[0.0, 0.0], [4.0, 0.0], [4.0, 2.0], [0.0, 2.0], [0.0, 0.0]])]
    #[case::clockwise(&[[0.0, 0.0], [0.0, 2.0], [4.0, 2.0], [4.0, 0.0]])]
    fn rectangle_centroid(#[case] points: &[[f64; 2]]) {
        let c = ring(points).centroid();
        assert_abs_diff_eq!(c.lon, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.lat, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn centroid_is_area_weighted() {
        // an L-shape: 2x2 square plus a 2x1 strip to the right of its bottom half
        let c = ring(&[
            [0.0, 0.0],
            [4.0, 0.0],
            [4.0, 1.0],
            [2.0, 1.0],
            [2.0, 2.0],
            [0.0, 2.0],
        ])
        .centroid();
        // square (area 4) at (1, 1), strip (area 2) at (3, 0.5)
        assert_abs_diff_eq!(c.lon, (4.0 * 1.0 + 2.0 * 3.0) / 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.lat, (4.0 * 1.0 + 2.0 * 0.5) / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_centroid_is_vertex_mean() {
        let c = ring(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]).centroid();
        assert_abs_diff_eq!(c.lon, 1.0);
        assert_abs_diff_eq!(c.lat, 1.0);

        assert_eq!(Ring::default().centroid(), Point::default());
    }

    #[test]
    fn single_polygon_normalizes_to_multipolygon() {
        let polygon = Polygon::from(ring(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]));
        let multi = MultiPolygon::from(polygon.clone());
        assert_eq!(multi.0, vec![polygon]);
    }

    #[test]
    fn multipolygon_iterates_in_dataset_order() {
        let first = Polygon::from(ring(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]));
        let second = Polygon::from(ring(&[[5.0, 5.0], [6.0, 5.0], [6.0, 6.0]]));
        let multi = MultiPolygon(vec![first.clone(), second.clone()]);
        assert_eq!(multi.into_iter().collect::<Vec<_>>(), vec![first, second]);
    }
}
