//! Resolves many `lon,lat` lines at once on the rayon pool.

use rayon::prelude::*;
use serde::Serialize;
use tzgeo_core::{Point, ZoneLookup};

use crate::output::Resolution;

/// The outcome for one input line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchLine {
    /// 1-based line number in the input.
    pub line: usize,
    #[serde(skip)]
    pub input: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Resolved(Resolution),
    Failed { error: String },
}

/// Parses `lon,lat`. Whitespace around either number is ignored, and a plain space
/// works as separator too.
pub fn parse_point(text: &str) -> Result<Point, String> {
    let mut parts = text.split([',', ' ', '\t']).filter(|s| !s.is_empty());
    let (Some(lon), Some(lat), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("Expected 'lon,lat' but got '{text}'"));
    };
    let parse = |value: &str| {
        value
            .parse::<f64>()
            .map_err(|e| format!("Invalid coordinate '{value}': {e}"))
    };
    Ok(Point::new(parse(lon)?, parse(lat)?))
}

/// Resolves every non-blank, non-comment (`#`) line of `input`, in input order.
///
/// A bad line is reported in its [`BatchLine`] and does not stop the others.
pub fn resolve_lines(lookup: &dyn ZoneLookup, input: &str, one: bool) -> Vec<BatchLine> {
    let lines: Vec<(usize, &str)> = input
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .collect();
    lines
        .par_iter()
        .map(|&(line, text)| {
            let outcome = parse_point(text)
                .and_then(|point| {
                    Resolution::resolve(lookup, point, one).map_err(|e| e.to_string())
                })
                .map_or_else(|error| Outcome::Failed { error }, Outcome::Resolved);
            BatchLine {
                line,
                input: text.to_string(),
                outcome,
            }
        })
        .collect()
}
