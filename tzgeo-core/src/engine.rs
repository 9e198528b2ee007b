//! The published catalog and the query/load API on top of it.

use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{trace, warn};
use tzgeo_dataset::{DataEncoding, FeatureCollection, read_dataset};

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::datasets::MOCK_DATASET;
use crate::geometry::Point;
use crate::loader::build_catalog;
use crate::nautical::nautical_zone;
use crate::proximity::nearest;
use crate::{TzGeoCoreError, TzGeoCoreResult};

/// Something that can resolve a coordinate to timezone identifiers.
pub trait ZoneLookup: Send + Sync + Debug {
    /// Every zone identifier for `point`, ascending.
    ///
    /// Returns more than one identifier only when several regions contain the point.
    fn lookup(&self, point: Point) -> TzGeoCoreResult<Vec<String>>;

    /// A single zone identifier for `point`.
    fn lookup_one(&self, point: Point) -> TzGeoCoreResult<String> {
        self.lookup(point)?
            .into_iter()
            .next()
            .ok_or(TzGeoCoreError::NoZoneFound {
                lon: point.lon,
                lat: point.lat,
            })
    }
}

/// Resolves coordinates against a catalog that can be replaced at any time.
///
/// Queries share a read lock and can run from any number of threads, rayon workers
/// included. A load decodes and builds its catalog without holding any lock and only
/// takes the write lock to swap the finished catalog in, so a query answers either
/// from the previous catalog or from the new one, never from a half-built one.
/// Concurrent loads each publish a whole catalog; the last one to finish wins.
///
/// ```
/// use tzgeo_core::{Engine, Point, ZoneLookup};
///
/// let engine = Engine::mock()?;
/// let zones = engine.lookup(Point::new(24.105_078, 56.946_285))?;
/// assert_eq!(zones, vec![tzgeo_core::datasets::MOCK_ZONE_ID]);
/// # Ok::<(), tzgeo_core::TzGeoCoreError>(())
/// ```
#[derive(Debug)]
pub struct Engine {
    catalog: RwLock<Arc<Catalog>>,
    config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::empty(EngineConfig::default())
    }
}

impl Engine {
    /// Loads a dataset (plain, gzip, zlib or zstd compressed GeoJSON) with default settings.
    pub fn new(dataset: &[u8]) -> TzGeoCoreResult<Self> {
        Self::with_config(dataset, EngineConfig::default())
    }

    /// Loads a dataset with the given settings.
    pub fn with_config(dataset: &[u8], config: EngineConfig) -> TzGeoCoreResult<Self> {
        config.validate()?;
        let engine = Self::empty(config);
        engine.load_raw(dataset)?;
        Ok(engine)
    }

    /// An engine without any regions.
    ///
    /// Every lookup goes straight to the nautical fallback until something is loaded.
    #[must_use]
    pub fn empty(config: EngineConfig) -> Self {
        Self {
            catalog: RwLock::new(Arc::default()),
            config,
        }
    }

    /// An engine over the embedded single-zone dataset covering the whole globe.
    pub fn mock() -> TzGeoCoreResult<Self> {
        Self::new(MOCK_DATASET)
    }

    /// Settings the engine was built with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The currently published catalog.
    ///
    /// Holding the returned snapshot does not block loads; it simply keeps answering
    /// from the catalog as it was when taken.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog.read())
    }

    /// Replaces the catalog with one built from `collection`.
    pub fn load(&self, collection: &FeatureCollection) {
        self.publish(build_catalog(collection));
    }

    /// Decodes `dataset`, detecting its encoding, and replaces the catalog with its regions.
    ///
    /// On failure the catalog is reset to empty and [`TzGeoCoreError::ParseError`] is returned.
    pub fn load_raw(&self, dataset: &[u8]) -> TzGeoCoreResult<()> {
        self.load_encoded(dataset, None)
    }

    /// Same as [`Engine::load_raw`], but with a known encoding instead of detection.
    ///
    /// Brotli datasets can only be loaded this way.
    pub fn load_encoded(
        &self,
        dataset: &[u8],
        encoding: Option<DataEncoding>,
    ) -> TzGeoCoreResult<()> {
        match read_dataset(dataset, encoding) {
            Ok(collection) => {
                self.publish(build_catalog(&collection));
                Ok(())
            }
            Err(e) => {
                warn!("Boundary dataset rejected, catalog reset to empty: {e}");
                self.publish(Catalog::default());
                Err(e.into())
            }
        }
    }

    /// The write lock is held for the swap only. Building happens on the rayon pool,
    /// whose workers may themselves be waiting on the read lock.
    fn publish(&self, catalog: Catalog) {
        let catalog = Arc::new(catalog);
        *self.catalog.write() = catalog;
    }

    /// Answers a point no region contains: nearest centroid, then the nautical zone.
    fn fallback(&self, catalog: &Catalog, point: Point) -> TzGeoCoreResult<String> {
        if let Some(found) = nearest(catalog, point, self.config.search_radius) {
            trace!(
                "({}, {}) matched no region, nearest centroid is {} at {:.4}°",
                point.lon, point.lat, found.zone_id, found.distance
            );
            return Ok(found.zone_id.to_string());
        }
        if self.config.nautical_fallback {
            let zone = nautical_zone(point);
            trace!(
                "({}, {}) has no centroid within {}°, using {zone}",
                point.lon, point.lat, self.config.search_radius
            );
            return Ok(zone);
        }
        Err(TzGeoCoreError::NoZoneFound {
            lon: point.lon,
            lat: point.lat,
        })
    }
}

fn check_range(point: Point) -> TzGeoCoreResult<()> {
    if point.is_in_range() {
        Ok(())
    } else {
        Err(TzGeoCoreError::OutOfRange {
            lon: point.lon,
            lat: point.lat,
        })
    }
}

impl ZoneLookup for Engine {
    fn lookup(&self, point: Point) -> TzGeoCoreResult<Vec<String>> {
        check_range(point)?;
        let catalog = self.snapshot();
        let zones: Vec<String> = catalog.containing(point).map(str::to_string).collect();
        if zones.is_empty() {
            Ok(vec![self.fallback(&catalog, point)?])
        } else {
            Ok(zones)
        }
    }

    fn lookup_one(&self, point: Point) -> TzGeoCoreResult<String> {
        check_range(point)?;
        let catalog = self.snapshot();
        match catalog.first_containing(point) {
            Some(zone) => Ok(zone.to_string()),
            None => self.fallback(&catalog, point),
        }
    }
}
