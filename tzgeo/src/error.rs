use std::io;
use std::path::PathBuf;

use tzgeo_core::TzGeoCoreError;

/// A convenience [`Result`] for the tzgeo crate.
pub type TzGeoResult<T> = Result<T, TzGeoError>;

#[derive(thiserror::Error, Debug)]
pub enum TzGeoError {
    #[error("Unable to load config file {1}: {0}")]
    ConfigLoadError(#[source] io::Error, PathBuf),

    #[error("Unable to parse config file {1}: {0}")]
    ConfigParseError(#[source] serde_yaml::Error, PathBuf),

    #[error("Unable to read boundary dataset {1}: {0}")]
    DatasetLoadError(#[source] io::Error, PathBuf),

    #[error(
        "No boundary dataset given. Use --dataset FILE, set `dataset` in the config file, or pass --mock"
    )]
    NoDataset,

    #[error("Unable to read batch input: {0}")]
    BatchInputError(#[source] io::Error),

    #[error("Unable to write output: {0}")]
    OutputError(#[from] io::Error),

    #[error("Unable to serialize output: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error(transparent)]
    CoreError(#[from] TzGeoCoreError),
}
