/*!
 * Core types and data structures for the gatherfs application
 */

use std::fmt;

use serde::Serialize;

/// A collected file and its full text contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// Path relative to the scan root
    pub path: String,
    /// Full UTF-8 contents
    pub contents: String,
}

impl FileRecord {
    /// Number of lines in the contents
    pub fn line_count(&self) -> usize {
        self.contents.lines().count()
    }

    /// Number of characters in the contents
    pub fn char_count(&self) -> usize {
        self.contents.chars().count()
    }
}

/// Why a matching file was left out of the result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The file is not valid UTF-8
    Encoding,
    /// Any other read failure, with the error detail
    Io(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Encoding => write!(f, "encoding error"),
            SkipReason::Io(detail) => write!(f, "{}", detail),
        }
    }
}

/// A file that matched the inclusion test but could not be read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    /// Path relative to the scan root
    pub path: String,
    /// Reason the file was skipped
    pub reason: SkipReason,
}

/// The product of one traversal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    /// Collected files, in traversal order
    pub files: Vec<FileRecord>,
    /// Sorted relative paths of directories whose files were scanned
    pub directories: Vec<String>,
    /// Sorted relative paths of directories cut off by the scan-exclude set
    pub excluded_directories: Vec<String>,
    /// Files that matched but could not be read
    pub skipped: Vec<SkippedFile>,
}

impl ScanResult {
    /// Visited plus excluded directories
    pub fn directory_count(&self) -> usize {
        self.directories.len() + self.excluded_directories.len()
    }
}
