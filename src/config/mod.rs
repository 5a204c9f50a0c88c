//! Configuration types for filtering and scanning.
//!
//! Options are assembled once at startup from the command line and the
//! optional configuration file, then handed to the scanner by value.

pub mod file;
pub mod filter;
pub mod scan;

pub use file::FileConfig;
pub use filter::{DEFAULT_THRESHOLD, FilterOptions};
pub use scan::ScanOptions;
