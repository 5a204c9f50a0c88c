//! Error types for disk-inventory operations.
//!
//! Every failure the library can surface is a variant of [`Error`]. The binary
//! treats all of them as fatal; the only tolerated failure (sizing the parent
//! directory of a single large file) never leaves the scanner.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a disk inventory.
#[derive(Error, Debug)]
pub enum Error {
    /// The threshold unit letter is not one of K, M or G.
    #[error("Unknown unit in {input}, it needs to be <num>(K|M|G)[B]")]
    UnknownUnit {
        /// The threshold string as given by the user.
        input: String,
    },

    /// The numeric part of a threshold is not an unsigned integer.
    #[error("Failed to parse {magnitude:?} in threshold {input}")]
    InvalidMagnitude {
        /// The threshold string as given by the user.
        input: String,
        /// The part in front of the unit letter.
        magnitude: String,
    },

    /// The threshold does not fit into a 64-bit byte count.
    #[error("Threshold {input} is too large")]
    ThresholdOverflow {
        /// The threshold string as given by the user.
        input: String,
    },

    /// The name filter is not a valid regular expression.
    #[error("Invalid filter pattern {pattern:?}: {source}")]
    InvalidFilter {
        /// The pattern as given by the user.
        pattern: String,
        /// The underlying compile error.
        source: regex::Error,
    },

    /// An entry could not be read while walking a directory tree.
    #[error("Failed to read {}: {source}", path.display())]
    Traversal {
        /// The entry that failed, or the walk root when unknown.
        path: PathBuf,
        /// The underlying walk error.
        source: walkdir::Error,
    },

    /// A usage percentage was requested for a zero file or directory size.
    #[error(
        "Failed to get file usage {}: neither file nor dir can be zero: file size: {file_size}, dir size: {dir_size}",
        file.display()
    )]
    InvalidUsageInput {
        /// The file whose share was requested.
        file: PathBuf,
        /// Size of the file in bytes.
        file_size: u64,
        /// Aggregate size of its containing directory in bytes.
        dir_size: u64,
    },

    /// The mount table could not be read.
    #[error("Failed to get the disks from {}: {source}", path.display())]
    MountTable {
        /// Path of the mount table.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// Block counts could not be retrieved for a mount point.
    #[error("Failed to read disk status for {}: {source}", path.display())]
    DiskStatus {
        /// The mount point.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

impl Error {
    /// Build a [`Error::Traversal`] from a walk error, falling back to `root`
    /// when the error does not carry a path of its own.
    #[must_use]
    pub fn traversal(root: &std::path::Path, source: walkdir::Error) -> Self {
        let path = source.path().unwrap_or(root).to_path_buf();
        Self::Traversal { path, source }
    }

    /// Whether this error comes from parsing a threshold string.
    #[must_use]
    pub const fn is_unit_parse(&self) -> bool {
        matches!(
            self,
            Self::UnknownUnit { .. } | Self::InvalidMagnitude { .. } | Self::ThresholdOverflow { .. }
        )
    }
}
