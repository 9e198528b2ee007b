//! Engine tuning knobs.

use serde::{Deserialize, Serialize};

use crate::{TzGeoCoreError, TzGeoCoreResult};

/// Default radius, in degrees, of the nearest-centroid search.
pub const DEFAULT_SEARCH_RADIUS: f64 = 2.0;

/// Controls how the engine falls back when no region contains a point.
///
/// ```
/// use tzgeo_core::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.search_radius, 2.0);
/// assert!(config.nautical_fallback);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Centroids farther than this many degrees from the point are ignored.
    pub search_radius: f64,
    /// Answer with an `Etc/GMT±N` zone when the centroid search comes up empty.
    ///
    /// With this disabled such lookups fail with [`TzGeoCoreError::NoZoneFound`].
    pub nautical_fallback: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_radius: DEFAULT_SEARCH_RADIUS,
            nautical_fallback: true,
        }
    }
}

impl EngineConfig {
    /// Rejects radii that are negative, NaN or infinite.
    pub fn validate(&self) -> TzGeoCoreResult<()> {
        if self.search_radius.is_finite() && self.search_radius >= 0.0 {
            Ok(())
        } else {
            Err(TzGeoCoreError::InvalidSearchRadius(self.search_radius))
        }
    }
}
