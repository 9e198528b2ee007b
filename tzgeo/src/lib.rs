#![doc = include_str!("../README.md")]

pub mod batch;
pub mod commands;
pub mod config;
pub mod logging;
pub mod output;

mod error;
pub use error::{TzGeoError, TzGeoResult};
