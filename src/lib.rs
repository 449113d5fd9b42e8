/*!
 * gatherfs - Gather source files of a directory tree into a single text dump
 *
 * This library walks a directory tree, collects files by extension while
 * skipping excluded directories, and writes a manifest followed by the
 * contents of every collected file.
 */

pub mod config;
pub mod error;
pub mod report;
pub mod scanner;
pub mod types;
pub mod writer;


// Re-export main components for easier access
pub use config::{Config, Extra, Profile, ScanConfig};
pub use error::{GatherError, Result};
pub use report::{FileReportInfo, ReportFormat, Reporter, ScanReport};
pub use scanner::Scanner;
pub use types::{FileRecord, ScanResult, SkipReason, SkippedFile};
pub use writer::ManifestWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
