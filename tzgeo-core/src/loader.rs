//! Builds a [`Catalog`] from parsed boundary features.
//!
//! Features are converted in parallel on the rayon pool. Each worker yields its own
//! region (or nothing), and a single merge step afterwards assembles the catalog,
//! so no worker ever touches shared state. Workers enter the caller's span so their
//! log lines keep its context.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{Span, debug, info, warn};
use tzgeo_dataset::{Feature, FeatureCollection, Geometry, LinearRing};

use crate::catalog::{Catalog, Region};
use crate::geometry::{MultiPolygon, Polygon, Ring};

/// Converts every usable feature of `collection` into a region and merges them.
///
/// Features without a zone identifier, without supported geometry, or left with no
/// polygon after dropping degenerate rings are skipped. Features sharing an
/// identifier are merged in dataset order.
#[must_use]
pub fn build_catalog(collection: &FeatureCollection) -> Catalog {
    let started_at = Instant::now();
    let span = Span::current();
    let regions: Vec<Region> = collection
        .features
        .par_iter()
        .enumerate()
        .filter_map(|(index, feature)| {
            let _entered = span.enter();
            region_from_feature(index, feature)
        })
        .collect();
    let catalog: Catalog = regions.into_iter().collect();

    let elapsed = started_at.elapsed();
    info!(
        "Loaded {} zones from {} features in {elapsed:?}",
        catalog.len(),
        collection.features.len()
    );
    catalog
}

fn region_from_feature(index: usize, feature: &Feature) -> Option<Region> {
    let Some(zone_id) = feature.tzid() else {
        debug!("Skipping feature #{index}: no tzid property");
        return None;
    };
    let shape = match &feature.geometry {
        Some(Geometry::Polygon { coordinates }) => Some(MultiPolygon(
            polygon(zone_id, coordinates).into_iter().collect(),
        )),
        Some(Geometry::MultiPolygon { coordinates }) => Some(MultiPolygon(
            coordinates
                .iter()
                .filter_map(|rings| polygon(zone_id, rings))
                .collect(),
        )),
        Some(Geometry::Unsupported) => {
            warn!("Skipping zone {zone_id} (feature #{index}): geometry is neither Polygon nor MultiPolygon");
            None
        }
        None => {
            warn!("Skipping zone {zone_id} (feature #{index}): feature has no geometry");
            None
        }
    }?;
    if shape.0.is_empty() {
        warn!("Skipping zone {zone_id} (feature #{index}): no polygon with at least 3 points");
        return None;
    }
    Some(Region::new(zone_id.to_string(), shape))
}

/// The first ring is the exterior, the rest are holes. A degenerate exterior drops
/// the whole polygon, a degenerate hole only itself.
fn polygon(zone_id: &str, rings: &[LinearRing]) -> Option<Polygon> {
    let mut rings = rings.iter().map(|positions| {
        let ring: Ring = positions.iter().copied().map(Into::into).collect();
        if !ring.is_closed() {
            warn!(
                "Dropping a ring of {} points from zone {zone_id}: at least 3 are required",
                ring.len()
            );
        }
        ring
    });
    let exterior = rings.next().filter(Ring::is_closed)?;
    let interiors = rings.filter(Ring::is_closed).collect();
    Some(Polygon::new(exterior, interiors))
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;
    use tzgeo_dataset::Position;

    use super::*;
    use crate::geometry::Point;

    fn ring(points: &[[f64; 2]]) -> LinearRing {
        points.iter().map(|&[lon, lat]| Position::new(lon, lat)).collect()
    }

    fn square(lon: f64, lat: f64) -> LinearRing {
        ring(&[
            [lon, lat],
            [lon + 1.0, lat],
            [lon + 1.0, lat + 1.0],
            [lon, lat + 1.0],
            [lon, lat],
        ])
    }

    fn polygon_feature(tzid: &str, rings: Vec<LinearRing>) -> Feature {
        Feature::new(tzid, Geometry::Polygon { coordinates: rings })
    }

    #[test]
    fn polygon_and_multipolygon_are_normalized() {
        let collection: FeatureCollection = [
            polygon_feature("Test/Single", vec![square(0.0, 0.0)]),
            Feature::new(
                "Test/Multi",
                Geometry::MultiPolygon {
                    coordinates: vec![vec![square(10.0, 10.0)], vec![square(20.0, 20.0)]],
                },
            ),
        ]
        .into_iter()
        .collect();
        let catalog = build_catalog(&collection);
        assert_eq!(
            catalog.zone_ids().collect::<Vec<_>>(),
            vec!["Test/Multi", "Test/Single"]
        );
        assert_eq!(catalog.get("Test/Single").unwrap().polygons().len(), 1);
        assert_eq!(catalog.get("Test/Multi").unwrap().polygons().len(), 2);
        assert_eq!(
            catalog.first_containing(Point::new(20.5, 20.5)),
            Some("Test/Multi")
        );
    }

    #[test]
    fn holes_are_kept() {
        let collection: FeatureCollection = [polygon_feature(
            "Test/Donut",
            vec![
                ring(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]),
                square(4.0, 4.0),
            ],
        )]
        .into_iter()
        .collect();
        let catalog = build_catalog(&collection);
        let region = catalog.get("Test/Donut").unwrap();
        assert_eq!(region.polygons()[0].polygon.interiors.len(), 1);
    }

    #[test]
    fn same_tzid_merges_in_feature_order() {
        let collection: FeatureCollection = [
            polygon_feature("Test/Split", vec![square(0.0, 0.0)]),
            polygon_feature("Test/Other", vec![square(5.0, 5.0)]),
            polygon_feature("Test/Split", vec![square(30.0, 30.0)]),
        ]
        .into_iter()
        .collect();
        let catalog = build_catalog(&collection);
        let centroids: Vec<Point> = catalog.get("Test/Split").unwrap().centroids().collect();
        assert_eq!(centroids.len(), 2);
        assert!(centroids[0].lon < centroids[1].lon);
    }

    #[traced_test]
    #[test]
    fn unusable_features_are_skipped() {
        let mut no_tzid = polygon_feature("", vec![square(0.0, 0.0)]);
        no_tzid.properties.tzid = None;
        let collection: FeatureCollection = [
            polygon_feature("", vec![square(0.0, 0.0)]),
            no_tzid,
            Feature::new("Test/Point", Geometry::Unsupported),
            Feature {
                geometry: None,
                ..polygon_feature("Test/Null", vec![])
            },
            polygon_feature("Test/Kept", vec![square(0.0, 0.0)]),
        ]
        .into_iter()
        .collect();
        let catalog = build_catalog(&collection);
        assert_eq!(catalog.zone_ids().collect::<Vec<_>>(), vec!["Test/Kept"]);
        assert!(logs_contain("no tzid property"));
        assert!(logs_contain("Skipping zone Test/Point"));
        assert!(logs_contain("Skipping zone Test/Null"));
        assert!(logs_contain("Loaded 1 zones from 5 features"));
    }

    #[traced_test]
    #[test]
    fn degenerate_rings_are_dropped() {
        let collection: FeatureCollection = [
            polygon_feature("Test/Line", vec![ring(&[[0.0, 0.0], [1.0, 1.0]])]),
            polygon_feature(
                "Test/BadHole",
                vec![square(0.0, 0.0), ring(&[[0.5, 0.5], [0.6, 0.6]])],
            ),
            Feature::new(
                "Test/Partial",
                Geometry::MultiPolygon {
                    coordinates: vec![vec![ring(&[[9.0, 9.0]])], vec![square(5.0, 5.0)]],
                },
            ),
            polygon_feature("Test/NoRings", vec![]),
        ]
        .into_iter()
        .collect();
        let catalog = build_catalog(&collection);
        assert_eq!(
            catalog.zone_ids().collect::<Vec<_>>(),
            vec!["Test/BadHole", "Test/Partial"]
        );
        let bad_hole = catalog.get("Test/BadHole").unwrap();
        assert!(bad_hole.polygons()[0].polygon.interiors.is_empty());
        assert_eq!(catalog.get("Test/Partial").unwrap().polygons().len(), 1);
        assert!(logs_contain("Dropping a ring of 2 points from zone Test/Line"));
        assert!(logs_contain("Skipping zone Test/NoRings"));
    }

    #[test]
    fn empty_collection_gives_empty_catalog() {
        assert!(build_catalog(&FeatureCollection::default()).is_empty());
    }
}
