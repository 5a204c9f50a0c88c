//! Plain-text report lines.
//!
//! Sizes are printed with two decimals in binary megabytes (files and roots)
//! or gigabytes (mount points).

use std::path::Path;

use crate::{
    error::Result,
    mounts::DiskStatus,
    record::FileRecord,
    utils::{to_gigabytes, to_megabytes},
};

/// Summary line for one mount point.
#[must_use]
pub fn mount_line(mount: &Path, status: &DiskStatus) -> String {
    format!(
        "{} All: {:.2} GB Used: {:.2} GB Free: {:.2} GB",
        mount.display(),
        to_gigabytes(status.total),
        to_gigabytes(status.used),
        to_gigabytes(status.free)
    )
}

/// Summary line for one directory root.
#[must_use]
pub fn root_line(root: &Path, total_size: u64) -> String {
    format!(
        "path: {}, Size: {:.2} MB",
        root.display(),
        to_megabytes(total_size)
    )
}

/// Line for one large file, including its share of the containing directory.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidUsageInput`] if the file or directory size
/// is zero.
pub fn file_line(record: &FileRecord) -> Result<String> {
    let percent = record.usage_percentage()?;

    Ok(format!(
        "{} in {}, Size: {:.2} MB => {percent:.2}%",
        record.file.display(),
        record.dir.display(),
        to_megabytes(record.file_size)
    ))
}
