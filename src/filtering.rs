//! File filtering functionality.
//!
//! This module decides which walked entries count as "large files": the base
//! name has to match the optional filter pattern and the size has to strictly
//! exceed the threshold.

use std::{borrow::Cow, ffi::OsStr, path::Path};

use regex::bytes::Regex;

use crate::error::{Error, Result};

/// Optional regular expression matched against a file's base name.
///
/// An absent pattern matches everything. The full path is never inspected, so
/// a pattern like `^logs` will not match `/var/logs/app.txt`. On unix the raw
/// bytes of the name are matched, so names that are not valid UTF-8 are never
/// altered before matching.
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    regex: Option<Regex>,
}

impl NameFilter {
    /// Compile a name filter from an optional pattern.
    ///
    /// `None` and the empty string both produce a filter that matches every
    /// file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFilter`] if the pattern is not a valid regular
    /// expression.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::path::Path;
    /// # use disk_inventory::filtering::NameFilter;
    /// let filter = NameFilter::new(Some(r"\.log$")).unwrap();
    /// assert!(filter.matches(Path::new("/var/log/syslog.log")));
    /// assert!(!filter.matches(Path::new("/var/log/syslog.1")));
    /// ```
    pub fn new(pattern: Option<&str>) -> Result<Self> {
        let regex = match pattern {
            None | Some("") => None,
            Some(pattern) => Some(Regex::new(pattern).map_err(|source| Error::InvalidFilter {
                pattern: pattern.to_string(),
                source,
            })?),
        };

        Ok(Self { regex })
    }

    /// Check the base name of `path` against the pattern.
    ///
    /// Paths without a final component (such as `/` or `..`) only match when
    /// there is no pattern.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        let Some(regex) = &self.regex else {
            return true;
        };

        path.file_name().is_some_and(|name| regex.is_match(&name_bytes(name)))
    }
}

#[cfg(unix)]
fn name_bytes(name: &OsStr) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;

    Cow::Borrowed(name.as_bytes())
}

#[cfg(not(unix))]
fn name_bytes(name: &OsStr) -> Cow<'_, [u8]> {
    match name.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}

/// Check if a file is strictly larger than the threshold.
#[must_use]
pub const fn meets_size_criteria(size: u64, threshold: u64) -> bool {
    size > threshold
}
