use std::path::PathBuf;

use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{Parser, Subcommand};
use tzgeo_core::DataEncoding;

use crate::config::Config;

/// Defines the styles used for the CLI help output.
const HELP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Blue.on_default().bold())
    .usage(AnsiColor::Blue.on_default().bold())
    .literal(AnsiColor::White.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug, PartialEq)]
#[command(
    about = "Resolve coordinates to IANA timezone identifiers using an offline boundary dataset",
    version,
    after_help = "Use RUST_LOG environment variable to control logging level, e.g. RUST_LOG=debug or RUST_LOG=tzgeo=debug. Use TZGEO_FORMAT to pick the log format: full, compact, pretty or json.",
    styles = HELP_STYLES
)]
pub struct Args {
    #[command(flatten)]
    pub meta: MetaArgs,
    #[command(flatten)]
    pub engine: EngineArgs,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Args, Debug, Clone, PartialEq, Default)]
pub struct MetaArgs {
    /// Path to a YAML config file. Command line values take precedence over it.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Boundary dataset: GeoJSON, optionally gzip, zlib, brotli or zstd compressed.
    #[arg(short, long, global = true, conflicts_with = "mock")]
    pub dataset: Option<PathBuf>,
    /// Use the embedded dataset that maps every point to a single zone.
    #[arg(long, global = true)]
    pub mock: bool,
    /// Dataset encoding, detected from the content if omitted. Required for brotli.
    #[arg(short, long, global = true)]
    pub encoding: Option<DataEncoding>,
}

#[derive(clap::Args, Debug, Clone, PartialEq, Default)]
pub struct EngineArgs {
    /// Maximum distance in degrees to the nearest region centroid. [DEFAULT: 2.0]
    #[arg(long, global = true)]
    pub search_radius: Option<f64>,
    /// Fail instead of answering with an Etc/GMT zone when nothing else matches.
    #[arg(long, global = true)]
    pub no_nautical_fallback: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Resolve a single coordinate
    Lookup {
        /// Longitude in degrees, -180 to 180
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Latitude in degrees, -90 to 90
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Print only the first zone
        #[arg(long)]
        one: bool,
        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Resolve "lon,lat" lines from a file or stdin
    Batch {
        /// File to read, stdin if omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Print only the first zone of each line
        #[arg(long)]
        one: bool,
        /// Print JSON lines instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// List zone identifiers in the loaded dataset
    #[command(alias = "list")]
    Zones {
        /// Print a JSON array instead of one identifier per line
        #[arg(long)]
        json: bool,
    },
}

impl Args {
    /// Applies command line values on top of `config`.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(dataset) = &self.meta.dataset {
            config.dataset = Some(dataset.clone());
            config.mock = false;
        }
        if self.meta.mock {
            config.mock = true;
        }
        if self.meta.encoding.is_some() {
            config.encoding = self.meta.encoding;
        }
        if let Some(radius) = self.engine.search_radius {
            config.engine.search_radius = radius;
        }
        if self.engine.no_nautical_fallback {
            config.engine.nautical_fallback = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::iter;

    use clap::CommandFactory as _;
    use tzgeo_core::EngineConfig;

    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(iter::once("tzgeo").chain(args.iter().copied()))
    }

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn lookup_accepts_negative_coordinates() {
        let args = parse(&[
            "--mock", "lookup", "--lon", "-176.47", "--lat", "-0.19", "--one",
        ])
        .unwrap();
        assert!(args.meta.mock);
        assert_eq!(
            args.command,
            Command::Lookup {
                lon: -176.47,
                lat: -0.19,
                one: true,
                json: false,
            }
        );
    }

    #[test]
    fn global_options_after_subcommand() {
        let args = parse(&["zones", "--json", "--dataset", "zones.geojson", "-e", "br"]).unwrap();
        assert_eq!(args.meta.dataset, Some(PathBuf::from("zones.geojson")));
        assert_eq!(args.meta.encoding, Some(DataEncoding::Brotli));
        assert_eq!(args.command, Command::Zones { json: true });
    }

    #[test]
    fn dataset_conflicts_with_mock() {
        assert!(parse(&["--mock", "--dataset", "a.geojson", "zones"]).is_err());
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        assert!(parse(&["--encoding", "lzma", "zones"]).is_err());
    }

    #[test]
    fn arguments_override_config() {
        let mut config = Config {
            dataset: Some(PathBuf::from("from-file.geojson")),
            encoding: Some(DataEncoding::Gzip),
            ..Config::default()
        };
        let args = parse(&[
            "--dataset",
            "from-cli.geojson",
            "--search-radius",
            "0.25",
            "--no-nautical-fallback",
            "batch",
        ])
        .unwrap();
        args.merge_into_config(&mut config);
        assert_eq!(config.dataset, Some(PathBuf::from("from-cli.geojson")));
        assert_eq!(config.encoding, Some(DataEncoding::Gzip));
        assert_eq!(
            config.engine,
            EngineConfig {
                search_radius: 0.25,
                nautical_fallback: false,
            }
        );
    }
}
