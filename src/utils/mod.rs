//! Utility functions and helpers.
//!
//! This module contains utility functions used throughout the application,
//! such as threshold parsing, directory sizing and unit conversion.

pub mod size;

pub use size::{GB, KB, MB, calculate_dir_size, parse_threshold, to_gigabytes, to_megabytes};
