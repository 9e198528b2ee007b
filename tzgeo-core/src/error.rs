use tzgeo_dataset::DatasetError;

/// Errors that can occur while loading boundary data or resolving a point.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum TzGeoCoreError {
    /// The queried coordinate lies outside `[-180, 180]` x `[-90, 90]`.
    #[error(
        "Point ({lon}, {lat}) is out of range. Longitude must be within [-180, 180] and latitude within [-90, 90]"
    )]
    OutOfRange {
        /// Longitude of the rejected point.
        lon: f64,
        /// Latitude of the rejected point.
        lat: f64,
    },

    /// The boundary dataset could not be decoded. The catalog was reset to empty.
    #[error("Unable to load boundary dataset: {0}")]
    ParseError(#[from] DatasetError),

    /// Neither containment, the centroid search nor the nautical fallback produced a zone.
    #[error("No corresponding zone found for point ({lon}, {lat})")]
    NoZoneFound {
        /// Longitude of the queried point.
        lon: f64,
        /// Latitude of the queried point.
        lat: f64,
    },

    /// The configured centroid search radius is negative or not finite.
    #[error("Invalid search radius {0}. It must be a finite, non-negative number of degrees")]
    InvalidSearchRadius(f64),
}

/// A convenience [`Result`] for `tzgeo-core`.
pub type TzGeoCoreResult<T> = Result<T, TzGeoCoreError>;
