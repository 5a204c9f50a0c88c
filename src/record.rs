//! Large file records and their share of the containing directory.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A file that passed the name filter and size threshold.
///
/// `dir_size` is the aggregate size of the file's immediate parent directory,
/// computed recursively. It may be smaller than the true value when part of
/// the parent could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path of the file as produced by the walk.
    pub file: PathBuf,

    /// Size of the file in bytes.
    pub file_size: u64,

    /// The containing directory.
    pub dir: PathBuf,

    /// Aggregate size of `dir` in bytes.
    pub dir_size: u64,
}

impl FileRecord {
    /// Create a new record.
    #[must_use]
    pub const fn new(file: PathBuf, file_size: u64, dir: PathBuf, dir_size: u64) -> Self {
        Self {
            file,
            file_size,
            dir,
            dir_size,
        }
    }

    /// Percentage of the containing directory taken up by this file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUsageInput`] if either size is zero.
    pub fn usage_percentage(&self) -> Result<f64> {
        usage_percentage(&self.file, self.file_size, self.dir_size)
    }
}

/// Compute `100 * file_size / dir_size` for `file`.
///
/// # Errors
///
/// Returns [`Error::InvalidUsageInput`] naming `file` when either size is
/// zero, which covers both empty files and directories whose size was
/// unavailable.
///
/// # Examples
///
/// ```
/// # use std::path::Path;
/// # use disk_inventory::record::usage_percentage;
/// let file = Path::new("/data/big.iso");
/// assert_eq!(usage_percentage(file, 250, 1000).unwrap(), 25.0);
/// assert!(usage_percentage(file, 0, 1000).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn usage_percentage(file: &Path, file_size: u64, dir_size: u64) -> Result<f64> {
    if file_size == 0 || dir_size == 0 {
        return Err(Error::InvalidUsageInput {
            file: file.to_path_buf(),
            file_size,
            dir_size,
        });
    }

    Ok(file_size as f64 * 100.0 / dir_size as f64)
}

/// The directory a walked path lives in.
///
/// A bare file name has an empty parent, which is reported as `.`.
#[must_use]
pub fn containing_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
