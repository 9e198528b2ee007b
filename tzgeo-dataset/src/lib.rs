#![doc = include_str!("../README.md")]

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

mod decoders;
pub use decoders::*;

mod model;
pub use model::{Feature, FeatureCollection, Geometry, LinearRing, Position, Properties};

/// A convenience [`Result`] for dataset decoding.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Errors raised while turning raw dataset bytes into a [`FeatureCollection`].
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error("Unable to decompress {encoding} dataset: {source}")]
    Decompress {
        encoding: DataEncoding,
        #[source]
        source: std::io::Error,
    },

    #[error("Dataset encoding could not be detected. Expected GeoJSON, gzip, zlib or zstd data")]
    UnrecognizedEncoding,

    #[error("Dataset is not a valid GeoJSON feature collection: {0}")]
    InvalidGeoJson(#[from] serde_json::Error),
}

/// Wire encodings a boundary dataset may arrive in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataEncoding {
    /// Uncompressed GeoJSON text.
    Json,
    Gzip,
    Zlib,
    /// Brotli has no magic number, so it is never detected and must be requested.
    Brotli,
    Zstd,
}

impl DataEncoding {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Some(match value.to_ascii_lowercase().as_str() {
            "json" | "geojson" => Self::Json,
            "gz" | "gzip" => Self::Gzip,
            "zlib" | "deflate" => Self::Zlib,
            "br" | "brotli" => Self::Brotli,
            "zst" | "zstd" => Self::Zstd,
            _ => None?,
        })
    }

    /// Sniffs the encoding from leading magic bytes.
    #[must_use]
    pub fn detect(data: &[u8]) -> Option<Self> {
        Some(match data {
            [0x1f, 0x8b, ..] => Self::Gzip,
            [0x78, 0x01 | 0x5e | 0x9c | 0xda, ..] => Self::Zlib,
            [0x28, 0xb5, 0x2f, 0xfd, ..] => Self::Zstd,
            v if v.trim_ascii_start().first() == Some(&b'{') => Self::Json,
            _ => None?,
        })
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Gzip => "gzip",
            Self::Zlib => "zlib",
            Self::Brotli => "brotli",
            Self::Zstd => "zstd",
        }
    }

    #[must_use]
    pub fn is_compressed(self) -> bool {
        !matches!(self, Self::Json)
    }
}

impl fmt::Display for DataEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!("Invalid dataset encoding '{s}'. Valid options: json, gzip, zlib, brotli, zstd")
        })
    }
}

/// Decompresses `data` using `encoding`, or the detected encoding when `None`.
///
/// Uncompressed input is returned borrowed.
pub fn decode(data: &[u8], encoding: Option<DataEncoding>) -> DatasetResult<Cow<'_, [u8]>> {
    let encoding = encoding
        .or_else(|| DataEncoding::detect(data))
        .ok_or(DatasetError::UnrecognizedEncoding)?;
    let decoded = match encoding {
        DataEncoding::Json => return Ok(Cow::Borrowed(data)),
        DataEncoding::Gzip => decode_gzip(data),
        DataEncoding::Zlib => decode_zlib(data),
        DataEncoding::Brotli => decode_brotli(data),
        DataEncoding::Zstd => decode_zstd(data),
    };
    decoded
        .map(Cow::Owned)
        .map_err(|source| DatasetError::Decompress { encoding, source })
}

/// Parses uncompressed GeoJSON text.
pub fn parse_feature_collection(json: &[u8]) -> DatasetResult<FeatureCollection> {
    Ok(serde_json::from_slice(json)?)
}

/// Decompresses (if needed) and parses a boundary dataset.
pub fn read_dataset(data: &[u8], encoding: Option<DataEncoding>) -> DatasetResult<FeatureCollection> {
    parse_feature_collection(&decode(data, encoding)?)
}
