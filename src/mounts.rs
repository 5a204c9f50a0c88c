//! Mounted filesystem usage.
//!
//! Reads the mount table, keeps the entries backed by a `/dev` device and
//! asks the kernel for block counts of each mount point.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default location of the kernel mount table.
pub const MOUNT_TABLE: &str = "/proc/mounts";

/// Space figures for one mount point, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskStatus {
    /// Total size of the filesystem.
    pub total: u64,
    /// Bytes in use (`total - free`).
    pub used: u64,
    /// Free bytes, including those reserved for root.
    pub free: u64,
}

impl DiskStatus {
    /// Build a status from block counts and the fragment size.
    #[must_use]
    pub const fn from_blocks(blocks: u64, blocks_free: u64, block_size: u64) -> Self {
        let total = blocks.saturating_mul(block_size);
        let free = blocks_free.saturating_mul(block_size);
        Self {
            total,
            used: total.saturating_sub(free),
            free,
        }
    }
}

/// Read the mount points of all device-backed filesystems from `table`.
///
/// # Errors
///
/// Returns [`Error::MountTable`] if the table cannot be read.
pub fn read_mount_points(table: &Path) -> Result<Vec<PathBuf>> {
    let content = std::fs::read_to_string(table).map_err(|source| Error::MountTable {
        path: table.to_path_buf(),
        source,
    })?;

    Ok(parse_mount_table(&content))
}

/// Extract the mount points whose device starts with `/dev`, in table order.
#[must_use]
pub fn parse_mount_table(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let device = fields.next()?;
            let mount = fields.next()?;
            device
                .starts_with("/dev")
                .then(|| PathBuf::from(unescape_mount_field(mount)))
        })
        .collect()
}

/// Decode the octal escapes (`\040` for space and friends) used in the mount table.
fn unescape_mount_field(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\'
            && let Some(octal) = bytes.get(i + 1..i + 4)
            && octal.iter().all(|b| (b'0'..=b'7').contains(b))
            && let Ok(value) = u8::from_str_radix(&String::from_utf8_lossy(octal), 8)
        {
            out.push(value);
            i += 4;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

/// Query block counts for the filesystem mounted at `mount`.
///
/// # Errors
///
/// Returns [`Error::DiskStatus`] if the statvfs call fails.
#[cfg(unix)]
#[allow(clippy::useless_conversion)]
pub fn disk_status(mount: &Path) -> Result<DiskStatus> {
    use nix::sys::statvfs::statvfs;

    let stat = statvfs(mount).map_err(|errno| Error::DiskStatus {
        path: mount.to_path_buf(),
        source: errno.into(),
    })?;

    Ok(DiskStatus::from_blocks(
        u64::from(stat.blocks()),
        u64::from(stat.blocks_free()),
        u64::from(stat.fragment_size()),
    ))
}

/// Query block counts for the filesystem mounted at `mount`.
///
/// # Errors
///
/// Always fails: block counts are only available on Unix.
#[cfg(not(unix))]
pub fn disk_status(mount: &Path) -> Result<DiskStatus> {
    Err(Error::DiskStatus {
        path: mount.to_path_buf(),
        source: std::io::Error::from(std::io::ErrorKind::Unsupported),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE_TABLE: &str = "\
sysfs /sys sysfs rw,nosuid,nodev,noexec,relatime 0 0
proc /proc proc rw,nosuid,nodev,noexec,relatime 0 0
/dev/nvme0n1p2 / ext4 rw,relatime 0 0
tmpfs /run tmpfs rw,nosuid,nodev 0 0
/dev/nvme0n1p1 /boot/efi vfat rw,relatime 0 0
/dev/sdb1 /media/usb\\040stick exfat rw 0 0
devpts /dev/pts devpts rw 0 0

/dev/mapper/vg-home /home xfs rw 0 0
";

    #[test]
    fn test_parse_mount_table_keeps_devices_in_order() {
        let mounts = parse_mount_table(SAMPLE_TABLE);

        assert_eq!(
            mounts,
            vec![
                PathBuf::from("/"),
                PathBuf::from("/boot/efi"),
                PathBuf::from("/media/usb stick"),
                PathBuf::from("/home"),
            ]
        );
    }

    #[test]
    fn test_parse_mount_table_skips_short_lines() {
        assert!(parse_mount_table("/dev/sda1\n\n   \n").is_empty());
    }

    #[test]
    fn test_unescape_mount_field() {
        assert_eq!(unescape_mount_field("/plain"), "/plain");
        assert_eq!(unescape_mount_field("/a\\040b"), "/a b");
        assert_eq!(unescape_mount_field("/tab\\011here"), "/tab\there");
        assert_eq!(unescape_mount_field("/back\\134slash"), "/back\\slash");
        assert_eq!(unescape_mount_field("/trailing\\04"), "/trailing\\04");
        assert_eq!(unescape_mount_field("/not\\9octal"), "/not\\9octal");
    }

    #[test]
    fn test_read_mount_points_from_file() {
        let tmp = TempDir::new().unwrap();
        let table = tmp.path().join("mounts");
        std::fs::write(&table, SAMPLE_TABLE).unwrap();

        assert_eq!(read_mount_points(&table).unwrap().len(), 4);
    }

    #[test]
    fn test_read_mount_points_missing_table() {
        let tmp = TempDir::new().unwrap();
        let table = tmp.path().join("missing");

        match read_mount_points(&table) {
            Err(Error::MountTable { path, .. }) => assert_eq!(path, table),
            other => panic!("expected mount table error, got {other:?}"),
        }
    }

    #[test]
    fn test_disk_status_from_blocks() {
        let status = DiskStatus::from_blocks(1000, 250, 4096);

        assert_eq!(status.total, 4_096_000);
        assert_eq!(status.free, 1_024_000);
        assert_eq!(status.used, 3_072_000);
        assert_eq!(status.used, status.total - status.free);
    }

    #[test]
    fn test_disk_status_never_underflows() {
        let status = DiskStatus::from_blocks(10, 20, 512);
        assert_eq!(status.used, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_disk_status_of_temp_dir() {
        let tmp = TempDir::new().unwrap();
        let status = disk_status(tmp.path()).unwrap();

        assert!(status.total >= status.free);
        assert_eq!(status.used, status.total - status.free);
    }

    #[cfg(unix)]
    #[test]
    fn test_disk_status_missing_mount() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing");

        assert!(matches!(
            disk_status(&missing),
            Err(Error::DiskStatus { .. })
        ));
    }
}
