//! Filtering configuration for large file selection.
//!
//! This module defines the raw filtering options as entered by the user. They
//! are validated (threshold parsed, pattern compiled) before any directory is
//! walked.

use crate::error::Result;
use crate::filtering::NameFilter;
use crate::utils::parse_threshold;

/// Threshold used when neither the command line nor the config file sets one.
pub const DEFAULT_THRESHOLD: &str = "100M";

/// Configuration for large file filtering criteria.
#[derive(Clone, Debug)]
pub struct FilterOptions {
    /// Size a file must exceed to be reported (e.g. `"100M"`)
    pub threshold: String,

    /// Regular expression tested against file base names, if any
    pub pattern: Option<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD.to_string(),
            pattern: None,
        }
    }
}

impl FilterOptions {
    /// Parse the threshold string into a byte count.
    ///
    /// # Errors
    ///
    /// Returns a unit parse error if the threshold is malformed.
    pub fn threshold_bytes(&self) -> Result<u64> {
        parse_threshold(&self.threshold)
    }

    /// Compile the name filter.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidFilter`] if the pattern does not compile.
    pub fn name_filter(&self) -> Result<NameFilter> {
        NameFilter::new(self.pattern.as_deref())
    }
}
