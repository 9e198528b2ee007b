use std::fs;
use std::io::{self, Read as _, Write};
use std::path::Path;

use tzgeo_core::{Engine, Point};

use crate::batch::{Outcome, resolve_lines};
use crate::config::Command;
use crate::output::{Resolution, write_resolution, write_zone_ids};
use crate::{TzGeoError, TzGeoResult};

/// Runs `command` against `engine`, writing results to `out`.
pub fn run(command: &Command, engine: &Engine, out: &mut dyn Write) -> TzGeoResult<()> {
    match command {
        Command::Lookup {
            lon,
            lat,
            one,
            json,
        } => {
            let resolution = Resolution::resolve(engine, Point::new(*lon, *lat), *one)?;
            write_resolution(out, &resolution, *json)
        }
        Command::Batch { input, one, json } => {
            let text = read_batch_input(input.as_deref())?;
            for line in resolve_lines(engine, &text, *one) {
                if *json {
                    serde_json::to_writer(&mut *out, &line)?;
                    writeln!(out)?;
                } else {
                    match &line.outcome {
                        Outcome::Resolved(res) => {
                            writeln!(out, "{}\t{}", line.input, res.zones.join(","))?;
                        }
                        Outcome::Failed { error } => {
                            writeln!(out, "{}\terror: {error}", line.input)?;
                        }
                    }
                }
            }
            Ok(())
        }
        Command::Zones { json } => write_zone_ids(out, engine.snapshot().zone_ids(), *json),
    }
}

fn read_batch_input(path: Option<&Path>) -> TzGeoResult<String> {
    let text = match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).map(|_| text)
        }
    };
    text.map_err(TzGeoError::BatchInputError)
}
