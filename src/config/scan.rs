//! Scanning configuration for directory traversal.
//!
//! This module defines the options that control how directory roots are
//! walked and how much is reported while doing so.

/// Configuration for directory scanning behavior.
#[derive(Clone, Debug, Default)]
pub struct ScanOptions {
    /// Whether to report tolerated errors (unsizable directories, unreadable mounts)
    pub verbose: bool,

    /// Number of threads used to size parent directories (0 = default)
    pub threads: usize,

    /// Whether to hide the progress spinner
    pub quiet: bool,
}
