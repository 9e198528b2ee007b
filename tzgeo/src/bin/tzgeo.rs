use std::{env, io, process};

use clap::Parser;
use log::log_enabled;
use tracing::{error, info};
use tzgeo::TzGeoResult;
use tzgeo::commands::run;
use tzgeo::config::{Args, Config, read_config};
use tzgeo::logging::{init_tracing, log_filter};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn start(args: &Args) -> TzGeoResult<()> {
    info!("Starting tzgeo v{VERSION}");

    let mut config = if let Some(ref cfg_filename) = args.meta.config {
        info!("Using {}", cfg_filename.display());
        read_config(cfg_filename)?
    } else {
        Config::default()
    };
    args.merge_into_config(&mut config);
    config.finalize()?;

    let engine = config.resolve()?;
    let stdout = io::stdout();
    run(&args.command, &engine, &mut stdout.lock())
}

fn main() {
    let filter = log_filter(env::var("RUST_LOG").ok());
    init_tracing(&filter, env::var("TZGEO_FORMAT").ok().as_deref());

    let args = Args::parse();
    if let Err(e) = start(&args) {
        // Ensure the message is printed, even if the logging is disabled
        if log_enabled!(log::Level::Error) {
            error!("{e}");
        } else {
            eprintln!("{e}");
        }
        process::exit(1);
    }
}
