//! Boundary datasets embedded in the crate.
//!
//! The full-coverage dataset is large and is always supplied by the caller.

/// A single region slightly larger than the globe, so every valid coordinate resolves
/// to [`MOCK_ZONE_ID`]. Useful for wiring up callers without shipping real data.
pub const MOCK_DATASET: &[u8] = include_bytes!("../data/mock.geojson");

/// The only zone identifier in [`MOCK_DATASET`].
pub const MOCK_ZONE_ID: &str = "America/Los_Angeles";
