//! # disk-inventory
//!
//! Library behind the `disk-inventory` command: mount point usage and large
//! file discovery under directory roots.
//!
//! ## Main Parts
//!
//! - [`utils`] - threshold parsing ("100M" to bytes) and recursive directory sizing
//! - [`filtering`] - base name filter and the strict size threshold
//! - [`scanner`] - the large file finder
//! - [`record`] - found files and their share of the containing directory
//! - [`report`] - plain-text report lines
//! - [`mounts`] - mount table and per-mount block counts
//! - [`config`] - layered options and the configuration file
//! - [`error`] - the error type shared by all of the above

pub mod config;
pub mod error;
pub mod filtering;
pub mod mounts;
pub mod record;
pub mod report;
pub mod scanner;
pub mod utils;

pub use config::{FilterOptions, ScanOptions};
pub use error::{Error, Result};
