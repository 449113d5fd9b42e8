/*!
 * Reporting functionality for gatherfs
 *
 * Summarizes a finished run either as console tables rendered with the
 * tabled library or as a JSON document.
 */

use std::time::Duration;

use clap::ValueEnum;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::error::Result;
use crate::types::ScanResult;

/// Files listed before the table switches to the largest ten
const FULL_LISTING_LIMIT: usize = 15;

/// Information about a collected file
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileReportInfo {
    /// Path relative to the scan root
    pub path: String,
    /// Number of lines in the file
    pub lines: usize,
    /// Number of characters in the file
    pub chars: usize,
}

/// Statistics for a finished run
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Output file path
    pub output_file: String,
    /// Time taken to scan and write
    #[serde(serialize_with = "serialize_secs")]
    pub duration: Duration,
    /// Number of collected files
    pub files_collected: usize,
    /// Number of scanned directories
    pub directories_visited: usize,
    /// Number of directories cut off by the scan-exclude set
    pub directories_excluded: usize,
    /// Number of matching files that could not be read
    pub files_skipped: usize,
    /// Total number of lines
    pub total_lines: usize,
    /// Total number of characters
    pub total_chars: usize,
    /// Details for each collected file
    pub file_details: Vec<FileReportInfo>,
}

impl ScanReport {
    /// Build a report from a scan result
    pub fn new(result: &ScanResult, output_file: String, duration: Duration) -> Self {
        let file_details: Vec<FileReportInfo> = result
            .files
            .iter()
            .map(|file| FileReportInfo {
                path: file.path.clone(),
                lines: file.line_count(),
                chars: file.char_count(),
            })
            .collect();

        Self {
            output_file,
            duration,
            files_collected: result.files.len(),
            directories_visited: result.directories.len(),
            directories_excluded: result.excluded_directories.len(),
            files_skipped: result.skipped.len(),
            total_lines: file_details.iter().map(|f| f.lines).sum(),
            total_chars: file_details.iter().map(|f| f.chars).sum(),
            file_details,
        }
    }
}

fn serialize_secs<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Format of the report output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Console table output
    #[default]
    Table,
    /// JSON document
    Json,
}

/// Report generator for scan results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string based on scan statistics
    pub fn generate_report(&self, report: &ScanReport) -> Result<String> {
        match self.format {
            ReportFormat::Table => Ok(self.generate_console_report(report)),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &ScanReport) -> Result<()> {
        println!("\n{}", self.generate_report(report)?);
        Ok(())
    }

    // Keep the trailing components of a path within max_len characters
    fn format_path(&self, path: &str, max_len: usize) -> String {
        if path.chars().count() <= max_len {
            return path.to_string();
        }

        let parts: Vec<&str> = path.split(std::path::MAIN_SEPARATOR).collect();
        let mut current_len = 3; // "..."
        let mut segments = Vec::new();

        for part in parts.iter().rev() {
            let part_len = part.chars().count() + 1;
            if current_len + part_len > max_len {
                break;
            }
            segments.push(*part);
            current_len += part_len;
        }

        // A single component longer than the limit keeps its tail
        if segments.is_empty() {
            let tail: String = path
                .chars()
                .rev()
                .take(max_len.saturating_sub(3))
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            return format!("...{}", tail);
        }

        let mut result = String::from("...");
        for part in segments.iter().rev() {
            result.push(std::path::MAIN_SEPARATOR);
            result.push_str(part);
        }
        result
    }

    fn style(table: &mut Table) -> String {
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));
        table.to_string()
    }

    fn create_summary_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let rows = vec![
            SummaryRow {
                key: "📂 Output File",
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "⏱️ Process Time",
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📄 Files Collected",
                value: self.format_number(report.files_collected),
            },
            SummaryRow {
                key: "📁 Directories",
                value: format!(
                    "{} scanned / {} excluded",
                    self.format_number(report.directories_visited),
                    self.format_number(report.directories_excluded)
                ),
            },
            SummaryRow {
                key: "⚠️ Files Skipped",
                value: self.format_number(report.files_skipped),
            },
            SummaryRow {
                key: "📝 Total Lines",
                value: self.format_number(report.total_lines),
            },
            SummaryRow {
                key: "📦 LLM Tokens",
                value: format!(
                    "{} tokens (estimated)",
                    self.format_number(report.total_chars / 4)
                ),
            },
        ];

        Self::style(&mut Table::new(rows))
    }

    fn create_files_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Est. Tokens")]
            tokens: String,
        }

        // Largest first
        let mut files: Vec<_> = report.file_details.iter().collect();
        files.sort_by(|a, b| b.chars.cmp(&a.chars).then_with(|| a.path.cmp(&b.path)));

        let files_to_show = if files.len() > FULL_LISTING_LIMIT {
            &files[..10]
        } else {
            &files[..]
        };

        let rows: Vec<FileRow> = files_to_show
            .iter()
            .map(|info| FileRow {
                path: self.format_path(&info.path, 60),
                lines: self.format_number(info.lines),
                tokens: self.format_number(info.chars / 4),
            })
            .collect();

        Self::style(&mut Table::new(rows))
    }

    fn generate_console_report(&self, report: &ScanReport) -> String {
        let summary_table = self.create_summary_table(report);
        let files_table = self.create_files_table(report);

        let summary_title = "✅  GATHER COMPLETE";
        let files_title = if report.file_details.len() > FULL_LISTING_LIMIT {
            "📋  TOP 10 LARGEST FILES BY CHARACTER COUNT  📋"
        } else {
            "📋  COLLECTED FILES"
        };

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title, files_table, summary_title, summary_table
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FileRecord, SkipReason, SkippedFile};

    fn sample_result() -> ScanResult {
        ScanResult {
            files: vec![
                FileRecord {
                    path: "a.py".to_string(),
                    contents: "x = 1\ny = 2\n".to_string(),
                },
                FileRecord {
                    path: "b.md".to_string(),
                    contents: "# title\n".to_string(),
                },
            ],
            directories: vec![".".to_string()],
            excluded_directories: vec![".git".to_string()],
            skipped: vec![SkippedFile {
                path: "bad.py".to_string(),
                reason: SkipReason::Encoding,
            }],
        }
    }

    #[test]
    fn test_report_totals() {
        let report = ScanReport::new(&sample_result(), "out.txt".to_string(), Duration::ZERO);
        assert_eq!(report.files_collected, 2);
        assert_eq!(report.directories_visited, 1);
        assert_eq!(report.directories_excluded, 1);
        assert_eq!(report.files_skipped, 1);
        assert_eq!(report.total_lines, 3);
        assert_eq!(report.total_chars, 20);
    }

    #[test]
    fn test_console_report_lists_files() {
        let report = ScanReport::new(&sample_result(), "out.txt".to_string(), Duration::ZERO);
        let text = Reporter::new(ReportFormat::Table)
            .generate_report(&report)
            .unwrap();
        assert!(text.contains("COLLECTED FILES"));
        assert!(text.contains("a.py"));
        assert!(text.contains("out.txt"));
    }

    #[test]
    fn test_json_report() {
        let report = ScanReport::new(&sample_result(), "out.txt".to_string(), Duration::ZERO);
        let text = Reporter::new(ReportFormat::Json)
            .generate_report(&report)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["files_collected"], 2);
        assert_eq!(value["file_details"][0]["path"], "a.py");
    }

    #[test]
    fn test_format_path_truncates_from_the_left() {
        let reporter = Reporter::new(ReportFormat::Table);
        let sep = std::path::MAIN_SEPARATOR;
        let path = format!("very_long_directory{sep}another_directory{sep}file.py");
        let short = reporter.format_path(&path, 30);
        assert!(short.starts_with("..."));
        assert!(short.ends_with("file.py"));
        assert!(short.chars().count() <= 30);
        assert_eq!(reporter.format_path("a.py", 30), "a.py");
    }
}
