//! # disk-inventory
//!
//! A one-shot CLI report of filesystem usage.
//!
//! Without arguments it prints total, used and free space for every mounted
//! device. Given one or more directories, it prints each directory's size and
//! every file in it larger than a threshold, together with the share of its
//! containing directory that file takes up.
//!
//! ## Usage
//!
//! ```bash
//! # Usage of every mounted device
//! disk-inventory
//!
//! # Files over 100 MiB under /var and /home
//! disk-inventory /var /home
//!
//! # ISO images over 1 GiB
//! disk-inventory -t 1G -f '\.iso$' ~/Downloads
//! ```

mod cli;

use std::path::{Path, PathBuf};
use std::process::exit;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;
use disk_inventory::{
    config::{FileConfig, ScanOptions},
    filtering::NameFilter,
    mounts::{self, DiskStatus, MOUNT_TABLE},
    report,
    scanner::Scanner,
    utils::calculate_dir_size,
};

/// Entry point for the disk-inventory application.
///
/// Any error is fatal: it is printed to stderr and the process exits with a
/// non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// The threshold and filter are validated before anything is walked, so a
/// malformed threshold never starts a traversal.
///
/// # Errors
///
/// Returns errors from threshold or filter parsing, thread-pool configuration,
/// the mount table, directory traversal, or usage percentage computation.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command);
    }

    let file_config = load_config();
    let filter_options = args.filter_options(&file_config);
    let scan_options = args.scan_options(&file_config);

    let threshold = filter_options.threshold_bytes()?;
    let name_filter = filter_options.name_filter()?;

    if scan_options.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(scan_options.threads)
            .build_global()?;
    }

    let dirs = args.directories();
    if dirs.is_empty() {
        return print_disk_usage(&scan_options);
    }

    let scanner = Scanner::new(scan_options);
    for dir in dirs {
        print_large_files(&scanner, dir, &name_filter, threshold)?;
    }

    Ok(())
}

/// Print total/used/free for every device-backed mount point.
///
/// A mount point that cannot be queried is printed with zero usage.
fn print_disk_usage(scan_options: &ScanOptions) -> Result<()> {
    let mount_points = mounts::read_mount_points(Path::new(MOUNT_TABLE))?;

    for mount in &mount_points {
        let status = mounts::disk_status(mount).unwrap_or_else(|err| {
            if scan_options.verbose {
                eprintln!("{}", format!("Warning: {err}").yellow());
            }
            DiskStatus::default()
        });
        println!("{}", report::mount_line(mount, &status));
    }

    Ok(())
}

/// Print the size of `dir` and every large file below it.
fn print_large_files(
    scanner: &Scanner,
    dir: &Path,
    name_filter: &NameFilter,
    threshold: u64,
) -> Result<()> {
    let total_size = calculate_dir_size(dir)?;
    println!("{}", report::root_line(dir, total_size));

    let records = scanner.find_large_files(dir, name_filter, threshold)?;
    for record in &records {
        println!("{}", report::file_line(record)?);
    }

    Ok(())
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# disk-inventory configuration
# All values shown are their defaults. Uncomment and change as needed.

[filtering]
# Report files strictly larger than this (<num><K|M|G>[B], base 1024)
# threshold = "100M"

# Regular expression matched against file names (empty = no filtering)
# filter = ""

[scanning]
# Number of threads used to size directories (0 = all CPU cores)
# threads = 0

# Show errors that were tolerated while scanning
# verbose = false

# Hide the progress spinner
# quiet = false
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => println!("{}", config_path()?.display()),
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// The config file location, or an error on platforms without a config directory.
fn config_path() -> Result<PathBuf> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };
    Ok(path)
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = config_path()?;

    if path.exists() {
        println!("Config file: {} (found)", path.display());
    } else {
        println!(
            "Config file: {} (not found - showing defaults)",
            path.display()
        );
    }

    let config = FileConfig::load_from(&path)?;
    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_str(val: Option<&str>, default: &str) -> String {
        val.map_or_else(
            || format!("\"{default}\"  (default)"),
            |v| format!("\"{v}\""),
        )
    }
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }

    format!(
        "\
[filtering]
threshold = {threshold}
filter    = {filter}

[scanning]
threads   = {threads}
verbose   = {verbose}
quiet     = {quiet}",
        threshold = show_str(
            config.filtering.threshold.as_deref(),
            disk_inventory::config::DEFAULT_THRESHOLD
        ),
        filter = show_str(config.filtering.filter.as_deref(), ""),
        threads = config.scanning.threads.map_or_else(
            || "0 (all cores)  (default)".to_string(),
            |v| v.to_string()
        ),
        verbose = show_bool(config.scanning.verbose, false),
        quiet = show_bool(config.scanning.quiet, false),
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let path = config_path()?;

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    std::fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config() -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            FileConfig::default()
        }
    }
}
