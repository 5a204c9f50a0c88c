//! Directory scanning and large file detection.
//!
//! This module walks a directory root once, picks out the files that pass the
//! name filter and exceed the size threshold, and sizes the immediate parent
//! directory of each of them.
//!
//! Errors during the walk itself abort the scan. Errors while sizing a parent
//! directory do not: the record keeps whatever was summed before the failure.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    time::Duration,
};

use colored::Colorize;
use humansize::{BINARY, format_size};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::{
    config::ScanOptions,
    error::{Error, Result},
    filtering::{NameFilter, meets_size_criteria},
    record::{FileRecord, containing_dir},
    utils::size::sum_until_error,
};

/// A file that passed the filter and threshold, before its parent is sized.
struct Candidate {
    path: PathBuf,
    size: u64,
}

/// Directory scanner for finding large files.
///
/// The `Scanner` encapsulates the traversal of a directory root and the
/// per-file parent directory sizing. Parent sizes are computed once per
/// distinct directory within a single scan and in parallel on the rayon pool;
/// the resulting records are identical to sizing every parent sequentially.
#[derive(Debug)]
pub struct Scanner {
    /// Configuration options for scanning behavior
    scan_options: ScanOptions,
}

impl Scanner {
    /// Create a new scanner with the specified options.
    ///
    /// # Examples
    ///
    /// ```
    /// # use disk_inventory::{config::ScanOptions, scanner::Scanner};
    /// let scanner = Scanner::new(ScanOptions {
    ///     verbose: true,
    ///     threads: 4,
    ///     quiet: true,
    /// });
    /// ```
    #[must_use]
    pub const fn new(scan_options: ScanOptions) -> Self {
        Self { scan_options }
    }

    /// Find every file under `root` larger than `threshold` whose base name
    /// matches `filter`.
    ///
    /// Records come back in traversal order, which is lexical by file name
    /// within each directory. Each record carries the recursive size of the
    /// file's immediate parent directory. An empty vector means nothing
    /// qualified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Traversal`] if `root` or any entry below it cannot be
    /// read during the walk.
    pub fn find_large_files(
        &self,
        root: &Path,
        filter: &NameFilter,
        threshold: u64,
    ) -> Result<Vec<FileRecord>> {
        let progress = self.progress_bar(root);

        let candidates = match Self::collect_candidates(root, filter, threshold, &progress) {
            Ok(candidates) => candidates,
            Err(err) => {
                progress.finish_and_clear();
                return Err(err);
            }
        };

        progress.set_message(format!(
            "Sizing directories of {} large files...",
            candidates.len()
        ));
        let dir_sizes = self.size_parent_dirs(&candidates);

        progress.finish_with_message(format!(
            "✅ {} scanned, {} large files",
            root.display(),
            candidates.len()
        ));

        Ok(candidates
            .into_iter()
            .map(|candidate| {
                let dir = containing_dir(&candidate.path);
                let dir_size = dir_sizes.get(&dir).copied().unwrap_or(0);
                FileRecord::new(candidate.path, candidate.size, dir, dir_size)
            })
            .collect())
    }

    /// Walk `root` once and keep the files that pass filter and threshold.
    fn collect_candidates(
        root: &Path,
        filter: &NameFilter,
        threshold: u64,
        progress: &ProgressBar,
    ) -> Result<Vec<Candidate>> {
        let mut candidates = Vec::new();
        let mut scanned_bytes = 0u64;

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::traversal(root, e))?;

            if entry.file_type().is_dir() {
                continue;
            }

            let size = entry.metadata().map_err(|e| Error::traversal(root, e))?.len();
            scanned_bytes += size;

            if !filter.matches(entry.path()) || !meets_size_criteria(size, threshold) {
                continue;
            }

            candidates.push(Candidate {
                path: entry.into_path(),
                size,
            });
            progress.set_message(format!(
                "Scanning {}... {} found in {}",
                root.display(),
                candidates.len(),
                format_size(scanned_bytes, BINARY)
            ));
        }

        Ok(candidates)
    }

    /// Size every distinct parent directory among the candidates.
    fn size_parent_dirs(&self, candidates: &[Candidate]) -> HashMap<PathBuf, u64> {
        let mut seen = HashSet::new();
        let parents: Vec<PathBuf> = candidates
            .iter()
            .map(|candidate| containing_dir(&candidate.path))
            .filter(|dir| seen.insert(dir.clone()))
            .collect();

        parents
            .into_par_iter()
            .map(|dir| {
                let size = self.parent_dir_size(&dir);
                (dir, size)
            })
            .collect()
    }

    /// Recursive size of `dir`, tolerating errors.
    ///
    /// On failure the bytes summed before the error are returned, which is
    /// zero when `dir` itself is unreadable.
    fn parent_dir_size(&self, dir: &Path) -> u64 {
        let (size, err) = sum_until_error(dir);

        if let Some(err) = err
            && self.scan_options.verbose
        {
            eprintln!(
                "{}",
                format!("Warning: failed to size {}: {err}", dir.display()).yellow()
            );
        }

        size
    }

    /// Spinner shown on stderr while a root is walked.
    fn progress_bar(&self, root: &Path) -> ProgressBar {
        if self.scan_options.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Scanning {}...", root.display()));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Create a quiet scanner with default options.
    fn quiet_scanner() -> Scanner {
        Scanner::new(ScanOptions {
            verbose: false,
            threads: 1,
            quiet: true,
        })
    }

    /// Helper to create a file of `size` bytes, ensuring parent dirs exist.
    fn create_file(path: &Path, size: usize) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, vec![b'x'; size]).unwrap();
    }

    #[test]
    fn test_empty_tree_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        let scanner = quiet_scanner();

        for threshold in [0, 1, 1024] {
            let records = scanner
                .find_large_files(tmp.path(), &NameFilter::default(), threshold)
                .unwrap();
            assert!(records.is_empty());
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let tmp = TempDir::new().unwrap();
        create_file(&tmp.path().join("a.bin"), 50);
        create_file(&tmp.path().join("b.bin"), 100);
        create_file(&tmp.path().join("c.bin"), 150);
        create_file(&tmp.path().join("d.bin"), 250);

        let records = quiet_scanner()
            .find_large_files(tmp.path(), &NameFilter::default(), 100)
            .unwrap();

        let sizes: Vec<u64> = records.iter().map(|r| r.file_size).collect();
        assert_eq!(sizes, vec![150, 250]);
    }

    #[test]
    fn test_records_in_lexical_order() {
        let tmp = TempDir::new().unwrap();
        create_file(&tmp.path().join("zeta.bin"), 10);
        create_file(&tmp.path().join("alpha.bin"), 10);
        create_file(&tmp.path().join("mid/inner.bin"), 10);

        let records = quiet_scanner()
            .find_large_files(tmp.path(), &NameFilter::default(), 0)
            .unwrap();

        let files: Vec<PathBuf> = records.into_iter().map(|r| r.file).collect();
        assert_eq!(
            files,
            vec![
                tmp.path().join("alpha.bin"),
                tmp.path().join("mid/inner.bin"),
                tmp.path().join("zeta.bin"),
            ]
        );
    }

    #[test]
    fn test_parent_dir_size_is_recursive() {
        let tmp = TempDir::new().unwrap();
        create_file(&tmp.path().join("data/big.bin"), 300);
        create_file(&tmp.path().join("data/small.bin"), 20);
        create_file(&tmp.path().join("data/nested/more.bin"), 80);
        create_file(&tmp.path().join("elsewhere.bin"), 5);

        let records = quiet_scanner()
            .find_large_files(tmp.path(), &NameFilter::default(), 100)
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file, tmp.path().join("data/big.bin"));
        assert_eq!(records[0].dir, tmp.path().join("data"));
        assert_eq!(records[0].dir_size, 400);
    }

    #[test]
    fn test_shared_parent_gets_same_size() {
        let tmp = TempDir::new().unwrap();
        create_file(&tmp.path().join("a.bin"), 200);
        create_file(&tmp.path().join("b.bin"), 300);

        let records = quiet_scanner()
            .find_large_files(tmp.path(), &NameFilter::default(), 100)
            .unwrap();

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.dir_size == 500));
    }

    #[test]
    fn test_filter_matches_base_name_only() {
        let tmp = TempDir::new().unwrap();
        create_file(&tmp.path().join("logs/app.txt"), 200);
        create_file(&tmp.path().join("data/logs.bin"), 200);

        let filter = NameFilter::new(Some("^logs")).unwrap();
        let records = quiet_scanner()
            .find_large_files(tmp.path(), &filter, 100)
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file, tmp.path().join("data/logs.bin"));
    }

    #[test]
    fn test_missing_root_fails_with_path() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing");

        match quiet_scanner().find_large_files(&missing, &NameFilter::default(), 0) {
            Err(Error::Traversal { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected traversal error, got {other:?}"),
        }
    }

    #[test]
    fn test_file_root() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("single.bin");
        create_file(&file, 64);

        let records = quiet_scanner()
            .find_large_files(&file, &NameFilter::default(), 10)
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].dir, tmp.path().to_path_buf());
        assert_eq!(records[0].dir_size, 64);
    }

    #[test]
    fn test_parent_dir_size_tolerates_missing_dir() {
        let tmp = TempDir::new().unwrap();
        let scanner = Scanner::new(ScanOptions {
            verbose: true,
            threads: 1,
            quiet: true,
        });

        assert_eq!(scanner.parent_dir_size(&tmp.path().join("gone")), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdir_aborts_walk_but_not_parent_sizing() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        create_file(&tmp.path().join("a_readable/file.bin"), 100);
        create_file(&tmp.path().join("b_locked/inner.bin"), 500);

        let locked = tmp.path().join("b_locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits are not enforced for privileged users.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let scanner = Scanner::new(ScanOptions {
            verbose: true,
            threads: 1,
            quiet: true,
        });
        let walk = scanner.find_large_files(tmp.path(), &NameFilter::default(), 0);
        let tolerated = scanner.parent_dir_size(tmp.path());
        let readable_only =
            scanner.find_large_files(&tmp.path().join("a_readable"), &NameFilter::default(), 0);

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        match walk {
            Err(Error::Traversal { path, .. }) => assert_eq!(path, locked),
            other => panic!("expected traversal error, got {other:?}"),
        }
        assert_eq!(tolerated, 100);

        let records = readable_only.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].dir_size, 100);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_not_followed() {
        let tmp = TempDir::new().unwrap();
        create_file(&tmp.path().join("real/huge.bin"), 4096);
        fs::create_dir_all(tmp.path().join("links")).unwrap();
        std::os::unix::fs::symlink(
            tmp.path().join("real/huge.bin"),
            tmp.path().join("links/huge.link"),
        )
        .unwrap();

        let filter = NameFilter::new(Some("huge")).unwrap();
        let records = quiet_scanner()
            .find_large_files(tmp.path(), &filter, 1024)
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file, tmp.path().join("real/huge.bin"));
    }
}
