//! Immutable snapshot of every known timezone region.
//!
//! A [`Catalog`] is built once by the [loader](crate::loader) and then only read.
//! Regions are kept ordered by zone identifier, which fixes both the order of
//! multi-zone answers and which zone wins a "first match" query.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::containment;
use crate::geometry::{BoundingBox, MultiPolygon, Point, Polygon};

/// One polygon of a region together with its precomputed bounding box and centroid.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionPolygon {
    /// The polygon as loaded, holes included.
    pub polygon: Polygon,
    /// Bounds of the exterior ring, used to skip the exact test.
    pub bbox: BoundingBox,
    /// Area-weighted center of the exterior ring, used only by the centroid search.
    pub centroid: Point,
}

impl From<Polygon> for RegionPolygon {
    fn from(polygon: Polygon) -> Self {
        Self {
            bbox: polygon.exterior.bounding_box(),
            centroid: polygon.exterior.centroid(),
            polygon,
        }
    }
}

/// All geometry known for one zone identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    id: String,
    polygons: Vec<RegionPolygon>,
}

impl Region {
    /// Builds a region, precomputing bounding boxes and centroids for every polygon.
    #[must_use]
    pub fn new(id: String, shape: MultiPolygon) -> Self {
        Self {
            id,
            polygons: shape.into_iter().map(RegionPolygon::from).collect(),
        }
    }

    /// The zone identifier, e.g. `Asia/Tokyo`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Polygons in dataset order.
    #[must_use]
    pub fn polygons(&self) -> &[RegionPolygon] {
        &self.polygons
    }

    /// One centroid per polygon, in polygon order.
    pub fn centroids(&self) -> impl Iterator<Item = Point> + '_ {
        self.polygons.iter().map(|p| p.centroid)
    }

    /// See [`containment::contains`].
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        containment::contains(self, point)
    }
}

/// Zone identifier → region map with deterministic, ascending iteration order.
///
/// Every region in a catalog has at least one polygon. An empty catalog is valid;
/// it is what an engine holds before its first load and after a failed one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    regions: BTreeMap<String, Region>,
}

impl Catalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of zone identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the catalog holds no region at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// The region for `zone_id`, if known.
    #[must_use]
    pub fn get(&self, zone_id: &str) -> Option<&Region> {
        self.regions.get(zone_id)
    }

    /// All zone identifiers, ascending.
    pub fn zone_ids(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    /// All regions, ascending by zone identifier.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    /// Identifiers of every region containing `point`, ascending.
    ///
    /// The iterator is lazy, so taking only the first element stops at the first match.
    pub fn containing(&self, point: Point) -> impl Iterator<Item = &str> {
        self.regions()
            .filter(move |region| region.contains(point))
            .map(Region::id)
    }

    /// The smallest identifier of a region containing `point`.
    #[must_use]
    pub fn first_containing(&self, point: Point) -> Option<&str> {
        self.containing(point).next()
    }

    /// Adds `region`, appending its polygons if the identifier is already present.
    ///
    /// Regions without polygons are ignored.
    pub(crate) fn insert(&mut self, region: Region) {
        if region.polygons.is_empty() {
            return;
        }
        match self.regions.entry(region.id.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(region);
            }
            Entry::Occupied(mut entry) => entry.get_mut().polygons.extend(region.polygons),
        }
    }
}

impl FromIterator<Region> for Catalog {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for region in iter {
            catalog.insert(region);
        }
        catalog
    }
}
