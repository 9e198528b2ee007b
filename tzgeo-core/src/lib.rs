#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod catalog;
pub mod containment;
pub mod datasets;
pub mod geometry;
pub mod loader;
pub mod nautical;
pub mod proximity;

mod config;
pub use config::{DEFAULT_SEARCH_RADIUS, EngineConfig};

mod engine;
pub use engine::{Engine, ZoneLookup};

mod error;
pub use error::{TzGeoCoreError, TzGeoCoreResult};

pub use catalog::{Catalog, Region};
pub use geometry::Point;
pub use nautical::nautical_zone;
/// Re-exported so callers can decode datasets without a direct dependency.
pub use tzgeo_dataset::{DataEncoding, DatasetError, FeatureCollection};
