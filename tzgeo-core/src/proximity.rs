//! Nearest-centroid fallback for points no region contains.

use crate::catalog::Catalog;
use crate::geometry::Point;

/// The closest region centroid found by [`nearest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestZone<'a> {
    /// Identifier of the region owning the centroid.
    pub zone_id: &'a str,
    /// Planar distance in degrees from the query point to the centroid.
    pub distance: f64,
}

/// Finds the region whose centroid lies closest to `point`, if within `radius` degrees.
///
/// Every centroid of every region is considered. On an exact tie the smallest zone
/// identifier wins: regions are visited in ascending order and only a strictly
/// closer centroid replaces the current best.
#[must_use]
pub fn nearest(catalog: &Catalog, point: Point, radius: f64) -> Option<NearestZone<'_>> {
    let mut best: Option<NearestZone<'_>> = None;
    for region in catalog.regions() {
        for centroid in region.centroids() {
            let distance = centroid.distance(point);
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(NearestZone {
                    zone_id: region.id(),
                    distance,
                });
            }
        }
    }
    best.filter(|b| b.distance <= radius)
}
