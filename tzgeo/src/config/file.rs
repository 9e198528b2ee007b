use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tzgeo_core::datasets::MOCK_DATASET;
use tzgeo_core::{DataEncoding, Engine, EngineConfig};

use crate::{TzGeoError, TzGeoResult};

pub type UnrecognizedValues = BTreeMap<String, serde_yaml::Value>;
pub type UnrecognizedKeys = BTreeSet<String>;

/// Settings read from a YAML file and overridden by command line arguments.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Boundary dataset to load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<PathBuf>,

    /// Encoding of the dataset file. Detected from its content when not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<DataEncoding>,

    /// Use the embedded single-zone dataset instead of a file.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub mock: bool,

    #[serde(flatten)]
    pub engine: EngineConfig,

    #[serde(flatten, skip_serializing)]
    pub unrecognized: UnrecognizedValues,
}

impl Config {
    /// Validates the settings and warns about keys that were not understood.
    pub fn finalize(&self) -> TzGeoResult<UnrecognizedKeys> {
        self.engine.validate()?;
        let keys: UnrecognizedKeys = self.unrecognized.keys().cloned().collect();
        for key in &keys {
            warn!(
                "Ignoring unrecognized configuration key '{key}'. Please check your configuration file for typos."
            );
        }
        Ok(keys)
    }

    /// Builds an engine and loads the configured dataset into it.
    pub fn resolve(&self) -> TzGeoResult<Engine> {
        let engine = Engine::empty(self.engine);
        if self.mock {
            info!("Using the embedded mock dataset");
            engine.load_raw(MOCK_DATASET)?;
            return Ok(engine);
        }
        let path = self.dataset.as_deref().ok_or(TzGeoError::NoDataset)?;
        info!("Loading boundary dataset {}", path.display());
        let data = fs::read(path).map_err(|e| TzGeoError::DatasetLoadError(e, path.into()))?;
        engine.load_encoded(&data, self.encoding)?;
        Ok(engine)
    }
}

pub fn read_config(file_name: &Path) -> TzGeoResult<Config> {
    let contents = fs::read_to_string(file_name)
        .map_err(|e| TzGeoError::ConfigLoadError(e, file_name.into()))?;
    parse_config(&contents, file_name)
}

pub fn parse_config(contents: &str, file_name: &Path) -> TzGeoResult<Config> {
    serde_yaml::from_str(contents).map_err(|e| TzGeoError::ConfigParseError(e, file_name.into()))
}
