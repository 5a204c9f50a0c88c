//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments, options, and their validation
//! using the [clap](https://docs.rs/clap/) library.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use disk_inventory::config::{DEFAULT_THRESHOLD, FileConfig, FilterOptions, ScanOptions};

/// Command-line arguments selecting which files are reported.
#[derive(Parser)]
struct FilteringArgs {
    /// Report files strictly larger than this size
    ///
    /// Format is <num><unit> with unit K, M or G and an optional trailing B,
    /// case-insensitive and always base 1024 (e.g. 500K, 100M, 2GB).
    /// Defaults to 100M.
    #[arg(short = 't', long)]
    threshold: Option<String>,

    /// Only report files whose name matches this regular expression
    ///
    /// The pattern is tested against the file name alone, never the full path.
    /// An empty pattern disables filtering.
    #[arg(short = 'f', long)]
    filter: Option<String>,
}

/// Command-line arguments for controlling directory scanning behavior.
#[derive(Parser)]
struct ScanningArgs {
    /// The number of threads used to size directories
    ///
    /// A value of 0 uses the default number of threads (typically the number of CPU cores).
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Show errors that were tolerated while scanning
    ///
    /// Directories that could not be fully sized and mount points that could
    /// not be queried are reported on stderr.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Hide the progress spinner
    #[arg(short = 'q', long)]
    quiet: bool,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
///
/// Helper methods accept a [`FileConfig`] reference so that config-file values act as
/// defaults when the corresponding CLI argument is not provided.
#[derive(Parser)]
#[command(name = "disk-inventory")]
#[command(
    about = "Report mount point usage, or find large files under the given directories"
)]
#[command(version)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Directories to search for large files
    ///
    /// When none are given, total/used/free space is printed for every
    /// mounted device instead. A directory named `config` is read as the
    /// subcommand when it comes first; pass it as `./config`.
    #[arg(num_args = 0..)]
    dirs: Vec<PathBuf>,

    /// Filtering options
    #[command(flatten)]
    filtering: FilteringArgs,

    /// Scanning options
    #[command(flatten)]
    scanning: ScanningArgs,
}

impl Cli {
    /// Directory roots given on the command line.
    ///
    /// An empty slice selects the mount report.
    #[must_use]
    pub fn directories(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Extract filtering options from CLI args and config file.
    ///
    /// Priority: CLI argument > config file > hardcoded default. An empty
    /// filter pattern counts as no pattern.
    #[must_use]
    pub fn filter_options(&self, config: &FileConfig) -> FilterOptions {
        FilterOptions {
            threshold: self
                .filtering
                .threshold
                .clone()
                .or_else(|| config.filtering.threshold.clone())
                .unwrap_or_else(|| DEFAULT_THRESHOLD.to_string()),
            pattern: self
                .filtering
                .filter
                .clone()
                .or_else(|| config.filtering.filter.clone())
                .filter(|p| !p.is_empty()),
        }
    }

    /// Extract scanning options from CLI args and config file.
    ///
    /// - **threads**: CLI > config > `0` (default)
    /// - **verbose** / **quiet**: CLI flag `||` config value `||` `false`
    #[must_use]
    pub fn scan_options(&self, config: &FileConfig) -> ScanOptions {
        ScanOptions {
            verbose: self.scanning.verbose || config.scanning.verbose.unwrap_or(false),
            threads: self
                .scanning
                .threads
                .or(config.scanning.threads)
                .unwrap_or(0),
            quiet: self.scanning.quiet || config.scanning.quiet.unwrap_or(false),
        }
    }
}
