//! Plain text and JSON rendering of lookup results.

use std::io::Write;

use serde::Serialize;
use tzgeo_core::{Point, TzGeoCoreResult, ZoneLookup};

use crate::TzGeoResult;

/// The zones found for one coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub lon: f64,
    pub lat: f64,
    pub zones: Vec<String>,
}

impl Resolution {
    /// Looks `point` up, keeping only the first zone when `one` is set.
    pub fn resolve(lookup: &dyn ZoneLookup, point: Point, one: bool) -> TzGeoCoreResult<Self> {
        let zones = if one {
            vec![lookup.lookup_one(point)?]
        } else {
            lookup.lookup(point)?
        };
        Ok(Self {
            lon: point.lon,
            lat: point.lat,
            zones,
        })
    }
}

/// One zone per line, or a single JSON object.
pub fn write_resolution(out: &mut dyn Write, resolution: &Resolution, json: bool) -> TzGeoResult<()> {
    if json {
        serde_json::to_writer(&mut *out, resolution)?;
        writeln!(out)?;
    } else {
        for zone in &resolution.zones {
            writeln!(out, "{zone}")?;
        }
    }
    Ok(())
}

/// One identifier per line, or a JSON array.
pub fn write_zone_ids<'a>(
    out: &mut dyn Write,
    zone_ids: impl Iterator<Item = &'a str>,
    json: bool,
) -> TzGeoResult<()> {
    if json {
        serde_json::to_writer(&mut *out, &zone_ids.collect::<Vec<_>>())?;
        writeln!(out)?;
    } else {
        for zone_id in zone_ids {
            writeln!(out, "{zone_id}")?;
        }
    }
    Ok(())
}
