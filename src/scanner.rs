/*!
 * Directory and file scanning functionality
 */

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;
use walkdir::{DirEntry, WalkDir};

use crate::config::ScanConfig;
use crate::types::{FileRecord, ScanResult, SkipReason, SkippedFile};

/// Relative path used for the scan root itself
pub const ROOT_REL_PATH: &str = ".";

/// Scanner for directory contents
pub struct Scanner {
    /// Scanner configuration
    config: ScanConfig,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: ScanConfig, progress: Arc<ProgressBar>) -> Self {
        Self { config, progress }
    }

    /// Walk the root directory and collect matching files
    pub fn scan(&self) -> ScanResult {
        let root = self.config.root.as_path();
        if !root.is_dir() {
            self.progress.suspend(|| {
                log::debug!("Scan root {} is not a directory", root.display())
            });
            return ScanResult::default();
        }

        let mut files = Vec::new();
        let mut skipped = Vec::new();
        let mut directories = BTreeSet::new();
        let mut excluded_directories = BTreeSet::new();

        let mut walker = WalkDir::new(root).sort_by_file_name().into_iter();

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.progress.suspend(|| log::warn!("Error walking directory: {}", e));
                    continue;
                }
            };

            let rel_path = relative_path(root, entry.path());

            if entry.file_type().is_dir() {
                if self.is_scan_excluded(Path::new(&rel_path)) {
                    self.progress
                        .suspend(|| log::debug!("Excluding directory {}", rel_path));
                    excluded_directories.insert(rel_path);
                    walker.skip_current_dir();
                } else {
                    directories.insert(rel_path);
                }
                continue;
            }

            // Links to directories are listed by the parent but never entered
            if entry.path_is_symlink() && entry.path().is_dir() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            if !self.should_include(&file_name) {
                continue;
            }

            match self.process_file(&entry, &rel_path) {
                Ok(record) => files.push(record),
                Err(skip) => skipped.push(skip),
            }
        }

        ScanResult {
            files,
            directories: directories.into_iter().collect(),
            excluded_directories: excluded_directories.into_iter().collect(),
            skipped,
        }
    }

    /// Read a single matching file
    fn process_file(
        &self,
        entry: &DirEntry,
        rel_path: &str,
    ) -> std::result::Result<FileRecord, SkippedFile> {
        self.progress.inc(1);
        self.progress.set_message(format!("Current file: {}", rel_path));

        match read_text(entry.path()) {
            Ok(contents) => Ok(FileRecord {
                path: rel_path.to_string(),
                contents,
            }),
            Err(reason) => {
                self.progress.suspend(|| match &reason {
                    SkipReason::Encoding => log::warn!(
                        "Could not read file {} due to encoding error. Skipping.",
                        rel_path
                    ),
                    SkipReason::Io(detail) => log::warn!(
                        "An unexpected error occurred with file {}: {}",
                        rel_path,
                        detail
                    ),
                });
                Err(SkippedFile {
                    path: rel_path.to_string(),
                    reason,
                })
            }
        }
    }

    /// Check if a directory, given relative to the root, must not be scanned
    ///
    /// A directory is excluded when any of its path components equals a name
    /// in the scan-exclude or output-exclude set.
    pub fn is_scan_excluded(&self, rel_path: &Path) -> bool {
        rel_path.components().any(|component| {
            let name = component.as_os_str().to_string_lossy();
            self.config.scan_exclude.contains(name.as_ref())
                || self.config.output_exclude.contains(name.as_ref())
        })
    }

    /// Check if a file name passes the extension filter
    pub fn should_include(&self, file_name: &str) -> bool {
        if file_name == self.config.skip_file {
            return false;
        }

        file_name.ends_with(&self.config.primary_extension)
            || self
                .config
                .extras
                .iter()
                .any(|extra| file_name.ends_with(extra.suffix()))
    }
}

/// Path of `path` relative to `root`, `.` for the root itself
fn relative_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => ROOT_REL_PATH.to_string(),
        Ok(rel) => rel.to_string_lossy().to_string(),
        Err(_) => path.to_string_lossy().to_string(),
    }
}

/// Read a whole file as UTF-8
fn read_text(path: &Path) -> std::result::Result<String, SkipReason> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => Err(SkipReason::Encoding),
        Err(e) => Err(SkipReason::Io(e.to_string())),
    }
}
