//! In-memory shape of a timezone boundary feature collection.
//!
//! Only the parts of [GeoJSON](https://datatracker.ietf.org/doc/html/rfc7946)
//! that boundary datasets use are modelled: features with a `tzid` property
//! and `Polygon` or `MultiPolygon` geometry. Any other geometry type decodes to
//! [`Geometry::Unsupported`] instead of failing the whole collection.

use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A `[longitude, latitude]` position in degrees.
///
/// Decoding accepts positions with extra members (e.g. altitude) and drops them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub lon: f64,
    pub lat: f64,
}

impl Position {
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<[f64; 2]> for Position {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.lon)?;
        tuple.serialize_element(&self.lat)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PositionVisitor;

        impl<'de> Visitor<'de> for PositionVisitor {
            type Value = Position;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a [longitude, latitude] array")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Position, A::Error> {
                let lon = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let lat = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                while seq.next_element::<de::IgnoredAny>()?.is_some() {}
                Ok(Position { lon, lat })
            }
        }

        deserializer.deserialize_seq(PositionVisitor)
    }
}

/// A closed loop of positions; the closing position may or may not be repeated.
pub type LinearRing = Vec<Position>;

/// Geometry attached to a boundary feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// Outer ring followed by zero or more holes.
    Polygon { coordinates: Vec<LinearRing> },
    /// Several polygons, each an outer ring followed by its holes.
    MultiPolygon { coordinates: Vec<Vec<LinearRing>> },
    /// Any geometry type a boundary dataset is not expected to carry.
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    /// The timezone identifier, e.g. `Europe/Riga`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tzid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: Properties,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl Feature {
    #[must_use]
    pub fn new(tzid: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            properties: Properties {
                tzid: Some(tzid.into()),
            },
            geometry: Some(geometry),
        }
    }

    /// The feature's zone identifier, if present and non-empty.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        self.properties.tzid.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}

/// GeoJSON permits `"properties": null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
