//! Logging setup for the `tzgeo` binary using `tracing` and `tracing-subscriber`.
//!
//! - `RUST_LOG` selects what is logged (standard `EnvFilter` syntax)
//! - `TZGEO_FORMAT` selects how it is printed: `full`, `compact`, `pretty` or `json`
//!
//! Logs always go to stderr so that command output on stdout stays machine readable.

use std::io;
use std::str::FromStr;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Crates whose log level follows the level given for `tzgeo=`.
const LIBRARY_TARGETS: [&str; 2] = ["tzgeo_core", "tzgeo_dataset"];

/// Log output format, read from `TZGEO_FORMAT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, single-line logs.
    Full,
    /// Like `Full`, but shorter lines.
    #[default]
    Compact,
    /// Multi-line logs for local debugging.
    Pretty,
    /// Newline-delimited JSON.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "compact" => Ok(Self::Compact),
            "pretty" | "verbose" => Ok(Self::Pretty),
            "json" | "jsonl" => Ok(Self::Json),
            _ => Err(format!(
                "Invalid log format '{s}'. Valid options: full, compact, pretty, json"
            )),
        }
    }
}

/// Installs the global subscriber, bridging `log` records into `tracing`.
///
/// An invalid filter falls back to `debug`, an invalid format to [`LogFormat::Compact`].
pub fn init_tracing(filter: &str, format: Option<&str>) {
    // a second bridge cannot be installed, and that is fine
    let _ = tracing_log::LogTracer::builder()
        .with_interest_cache(tracing_log::InterestCacheConfig::default())
        .init();

    let env_filter = EnvFilter::from_str(filter).unwrap_or_else(|_| {
        eprintln!("Warning: Invalid log filter '{filter}', logging everything at debug level");
        EnvFilter::new("debug")
    });

    let format = format
        .and_then(|s| {
            s.parse::<LogFormat>()
                .map_err(|e| eprintln!("Warning: {e}. Falling back to compact"))
                .ok()
        })
        .unwrap_or_default();

    let layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);
    let layer = match format {
        LogFormat::Full => layer.with_span_events(FmtSpan::NONE).boxed(),
        LogFormat::Compact => layer.compact().with_span_events(FmtSpan::NONE).boxed(),
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Json => layer.json().with_span_events(FmtSpan::NONE).boxed(),
    };
    let _ = Registry::default()
        .with(layer.with_filter(env_filter))
        .try_init();
}

/// Builds the log filter from `RUST_LOG`.
///
/// Without `RUST_LOG` everything from tzgeo is logged at `info`. A level given for
/// `tzgeo=` is copied to the library crates unless they have their own.
#[must_use]
pub fn log_filter(rust_log: Option<String>) -> String {
    const PREFIX: &str = "tzgeo=";
    let Some(rust_log) = rust_log else {
        return format!("{PREFIX}info,tzgeo_core=info,tzgeo_dataset=info");
    };
    let Some(level) = rust_log.split(',').find_map(|s| s.trim().strip_prefix(PREFIX)) else {
        return rust_log;
    };
    let mut filter = rust_log.clone();
    for target in LIBRARY_TARGETS {
        if !rust_log.contains(&format!("{target}=")) {
            filter.push_str(&format!(",{target}={level}"));
        }
    }
    filter
}
