/*!
 * Manifest writer implementation for gatherfs
 */

use std::collections::BTreeSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::config::OUTPUT_FILE_SUFFIX;
use crate::error::{GatherError, Result};
use crate::types::ScanResult;

/// Marker appended to excluded directories in the structure section
pub const EXCLUDED_MARKER: &str = "[excluded from files_within.txt]";

/// Writes a [`ScanResult`] as a plain text manifest
pub struct ManifestWriter {
    /// Names that suppress a line when found anywhere in a path
    output_exclude: BTreeSet<String>,
    /// Directory the manifest is written into
    output_dir: PathBuf,
}

impl ManifestWriter {
    /// Create a new manifest writer
    pub fn new(output_exclude: BTreeSet<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_exclude,
            output_dir: output_dir.into(),
        }
    }

    /// Write the manifest to a new timestamped file and return its path
    pub fn write(&self, result: &ScanResult) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|source| GatherError::OutputDir {
            path: self.output_dir.clone(),
            source,
        })?;

        let (path, file) = self.create_output_file(&Local::now())?;
        let mut writer = BufWriter::new(file);

        self.render(result, &mut writer)
            .and_then(|_| writer.flush())
            .map_err(|source| GatherError::OutputFile {
                path: path.clone(),
                source,
            })?;

        Ok(path)
    }

    /// Output file name for a generation time
    pub fn file_name(timestamp: &DateTime<Local>) -> String {
        format!(
            "{}_{}",
            timestamp.format("%Y%m%d_%H%M%S"),
            OUTPUT_FILE_SUFFIX
        )
    }

    /// Open a fresh output file, adding a counter when the name is taken
    fn create_output_file(&self, timestamp: &DateTime<Local>) -> Result<(PathBuf, File)> {
        let stamp = timestamp.format("%Y%m%d_%H%M%S").to_string();
        let mut attempt = 0u32;

        loop {
            let name = if attempt == 0 {
                Self::file_name(timestamp)
            } else {
                format!("{}_{}_{}", stamp, attempt, OUTPUT_FILE_SUFFIX)
            };
            let path = self.output_dir.join(name);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
                Err(source) => return Err(GatherError::OutputFile { path, source }),
            }
        }
    }

    /// Check if a path is suppressed from the manifest
    ///
    /// Matches an output-exclude name anywhere in the path, not only as a
    /// whole component.
    pub fn is_output_excluded(&self, path: &str) -> bool {
        self.output_exclude
            .iter()
            .any(|name| path.contains(name.as_str()))
    }

    /// Render the manifest into `out`
    pub fn render<W: Write>(&self, result: &ScanResult, out: &mut W) -> io::Result<()> {
        writeln!(out, "Number of files: {}", result.files.len())?;
        writeln!(out, "Number of directories: {}", result.directory_count())?;
        writeln!(out)?;

        writeln!(out, "Directory structure:")?;
        for directory in &result.directories {
            if !self.is_output_excluded(directory) {
                writeln!(out, "{}", directory)?;
            }
        }
        for directory in &result.excluded_directories {
            if !self.is_output_excluded(directory) {
                writeln!(out, "{} {}", directory, EXCLUDED_MARKER)?;
            }
        }
        writeln!(out)?;

        writeln!(out, "List of file paths:")?;
        for file in &result.files {
            if !self.is_output_excluded(&file.path) {
                writeln!(out, "{}", file.path)?;
            }
        }
        writeln!(out)?;

        for file in &result.files {
            if !self.is_output_excluded(&file.path) {
                writeln!(out, "{}:\n{}", file.path, file.contents)?;
            }
        }

        Ok(())
    }
}
