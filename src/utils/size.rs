//! Size parsing and measuring utilities.
//!
//! This module provides the threshold parser that turns strings like "100M"
//! into byte counts, the recursive directory size walk, and the fixed binary
//! conversions used by the report.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// One kibibyte.
pub const KB: u64 = 1024;
/// One mebibyte.
pub const MB: u64 = 1024 * KB;
/// One gibibyte.
pub const GB: u64 = 1024 * MB;

/// Calculate the total size of a directory tree, in bytes.
///
/// Every non-directory entry contributes its own size (symbolic links are not
/// followed, so a link counts with its link size). Directory entries contribute
/// nothing.
///
/// The walk stops at the first entry that cannot be read and that error is
/// returned; a single unreadable subtree fails the whole computation.
///
/// # Errors
///
/// Returns [`Error::Traversal`] carrying the failing path if `path` does not
/// exist or any entry below it cannot be read.
pub fn calculate_dir_size(path: &Path) -> Result<u64> {
    match sum_until_error(path) {
        (size, None) => Ok(size),
        (_, Some(err)) => Err(Error::traversal(path, err)),
    }
}

/// Walk `path` and sum non-directory sizes until the first error.
///
/// Returns the bytes accumulated so far together with the error that stopped
/// the walk, if any. Entries are visited in lexical order, so the partial sum
/// is the same on every run.
pub(crate) fn sum_until_error(path: &Path) -> (u64, Option<walkdir::Error>) {
    let mut total = 0u64;

    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => return (total, Some(err)),
        };

        if entry.file_type().is_dir() {
            continue;
        }

        match entry.metadata() {
            Ok(metadata) => total += metadata.len(),
            Err(err) => return (total, Some(err)),
        }
    }

    (total, None)
}

/// Parse a threshold string of the form `<integer><unit>` into bytes.
///
/// The unit is one of K, M or G with an optional trailing B, matched
/// case-insensitively, and always binary (1K = 1024 bytes).
///
/// # Errors
///
/// - [`Error::UnknownUnit`] when the unit letter is missing or not K/M/G
/// - [`Error::InvalidMagnitude`] when the numeric part is not an unsigned integer
/// - [`Error::ThresholdOverflow`] when the result does not fit in a `u64`
///
/// # Examples
///
/// ```
/// # use disk_inventory::utils::parse_threshold;
/// assert_eq!(parse_threshold("100M").unwrap(), 104_857_600);
/// assert_eq!(parse_threshold("50kb").unwrap(), 51_200);
/// ```
pub fn parse_threshold(input: &str) -> Result<u64> {
    let upper = input.to_uppercase();
    let without_b = upper.strip_suffix('B').unwrap_or(&upper);

    let mut chars = without_b.chars();
    let unit = chars.next_back();
    let magnitude = chars.as_str();

    let multiplier = match unit {
        Some('K') => KB,
        Some('M') => MB,
        Some('G') => GB,
        _ => {
            return Err(Error::UnknownUnit {
                input: input.to_string(),
            });
        }
    };

    let number: u64 = magnitude.parse().map_err(|_| Error::InvalidMagnitude {
        input: input.to_string(),
        magnitude: magnitude.to_string(),
    })?;

    number
        .checked_mul(multiplier)
        .ok_or_else(|| Error::ThresholdOverflow {
            input: input.to_string(),
        })
}

/// Convert a byte count to mebibytes.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn to_megabytes(bytes: u64) -> f64 {
    bytes as f64 / MB as f64
}

/// Convert a byte count to gibibytes.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn to_gigabytes(bytes: u64) -> f64 {
    bytes as f64 / GB as f64
}
