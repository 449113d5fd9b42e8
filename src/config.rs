/*!
 * Configuration handling for gatherfs
 */

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_complete::Shell;

use crate::error::Result;
use crate::report::ReportFormat;
use crate::{ensure, error};

/// Extension every profile collects
pub const PRIMARY_EXTENSION: &str = ".py";

/// File name that is never collected, so the gatherer does not dump itself
pub const SELF_FILE_NAME: &str = "gather_pythons.py";

/// Suffix shared by every generated output file
pub const OUTPUT_FILE_SUFFIX: &str = "files_within.txt";

/// Optional file types that can be collected next to the primary extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Extra {
    /// `.html` files
    Html,
    /// `.js` files
    Js,
    /// `.css` files
    Css,
    /// `.md` files
    Md,
}

impl Extra {
    /// File name suffix matched by this extra
    pub fn suffix(self) -> &'static str {
        match self {
            Extra::Html => ".html",
            Extra::Js => ".js",
            Extra::Css => ".css",
            Extra::Md => ".md",
        }
    }
}

/// Parsed `--extras` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraList(pub Vec<Extra>);

/// Parse a comma list of extras; empty items are ignored, so `""` selects none
fn parse_extras(value: &str) -> std::result::Result<ExtraList, String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| <Extra as ValueEnum>::from_str(item, true))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map(ExtraList)
}

/// Named bundle of defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Profile {
    /// Whole project dump into `directory_printouts/` (default)
    #[default]
    Directory,
    /// Python-focused dump into the working directory
    Pythons,
}

impl Profile {
    /// Directory names that stop traversal
    pub fn scan_exclude(self) -> &'static [&'static str] {
        match self {
            Profile::Directory => &[
                ".git",
                "directory_printouts",
                "VERSIONS",
                "__pycache__",
                "othersecretefolder",
            ],
            Profile::Pythons => &[
                "VERSIONS",
                "__pycache__",
                "pets_venv",
                "ip_adapter",
                "2024sept7_test",
                "othersecretefolder",
            ],
        }
    }

    /// Names that suppress listing in the written manifest
    pub fn output_exclude(self) -> &'static [&'static str] {
        match self {
            Profile::Directory => &[".git", "directory_printouts", "VERSIONS", "__pycache__"],
            Profile::Pythons => &["VERSIONS", "__pycache__", "pets_venv"],
        }
    }

    /// Optional extensions enabled by default
    pub fn extras(self) -> &'static [Extra] {
        match self {
            Profile::Directory => &[Extra::Html, Extra::Js, Extra::Css, Extra::Md],
            Profile::Pythons => &[Extra::Html, Extra::Js, Extra::Css],
        }
    }

    /// Directory the manifest is written into
    pub fn output_dir(self) -> PathBuf {
        match self {
            Profile::Directory => PathBuf::from("directory_printouts"),
            Profile::Pythons => PathBuf::from("."),
        }
    }
}

/// Command-line arguments for gatherfs
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "gatherfs",
    version = env!("CARGO_PKG_VERSION"),
    about = "Gather source files of a directory tree into a single text dump",
    long_about = "Walks a directory tree, collects files by extension while skipping excluded directories, and writes a manifest plus all file contents to a timestamped files_within.txt."
)]
pub struct Args {
    /// Root directory to scan
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Bundle of default excludes, extensions and output location
    #[clap(long, value_enum, default_value_t = Profile::default())]
    pub profile: Profile,

    /// Directory to write the output file into (overrides the profile)
    #[clap(long)]
    pub output_dir: Option<String>,

    /// Comma-separated optional extensions to collect: html, js, css, md
    /// (overrides the profile; an empty value disables all)
    #[clap(long, value_name = "EXTRAS", value_parser = parse_extras)]
    pub extras: Option<ExtraList>,

    /// Comma-separated directory names to exclude from scanning
    #[clap(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Comma-separated names to exclude from the written output
    #[clap(long, value_delimiter = ',')]
    pub output_exclude: Vec<String>,

    /// File name that is never collected
    #[clap(long, default_value = SELF_FILE_NAME)]
    pub skip_file: String,

    /// Format of the summary printed after the run
    #[clap(long, value_enum, default_value_t = ReportFormat::default())]
    pub report: ReportFormat,

    /// Print neither the progress spinner nor the summary report
    #[clap(long, short)]
    pub quiet: bool,

    /// Show debug diagnostics
    #[clap(long, short)]
    pub verbose: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Immutable settings for one traversal
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanConfig {
    /// Root of the traversal
    pub root: PathBuf,
    /// Directory names that stop traversal
    pub scan_exclude: BTreeSet<String>,
    /// Names that suppress listing in the manifest
    pub output_exclude: BTreeSet<String>,
    /// Extension that is always collected
    pub primary_extension: String,
    /// Optional extensions that are collected as well
    pub extras: BTreeSet<Extra>,
    /// File name that is never collected
    pub skip_file: String,
}

impl ScanConfig {
    /// Configuration with the defaults of `profile`
    pub fn from_profile(root: impl Into<PathBuf>, profile: Profile) -> Self {
        Self {
            root: root.into(),
            scan_exclude: profile.scan_exclude().iter().map(|s| s.to_string()).collect(),
            output_exclude: profile
                .output_exclude()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            primary_extension: PRIMARY_EXTENSION.to_string(),
            extras: profile.extras().iter().copied().collect(),
            skip_file: SELF_FILE_NAME.to_string(),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Traversal settings
    pub scan: ScanConfig,
    /// Directory the output file is written into
    pub output_dir: PathBuf,
    /// Summary format
    pub report: ReportFormat,
    /// Suppress spinner and summary
    pub quiet: bool,
    /// Debug diagnostics
    pub verbose: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let profile = args.profile;
        let mut scan = ScanConfig::from_profile(args.directory_path, profile);

        if let Some(ExtraList(extras)) = args.extras {
            scan.extras = extras.into_iter().collect();
        }
        scan.scan_exclude.extend(non_empty(args.exclude));
        scan.output_exclude.extend(non_empty(args.output_exclude));
        scan.skip_file = args.skip_file;

        Self {
            scan,
            output_dir: args
                .output_dir
                .map(PathBuf::from)
                .unwrap_or_else(|| profile.output_dir()),
            report: args.report,
            quiet: args.quiet,
            verbose: args.verbose,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let primary = &self.scan.primary_extension;
        ensure!(!primary.is_empty(), Config, "primary extension must not be empty");
        ensure!(
            primary.starts_with('.'),
            Config,
            "primary extension must start with '.': {}",
            primary
        );

        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(error!(
                Config,
                "output path exists and is not a directory: {}",
                self.output_dir.display()
            ));
        }

        if !self.scan.root.is_dir() {
            // Not fatal: the walk simply yields nothing
            log::warn!(
                "Scan root {} is not a directory; the result will be empty",
                self.scan.root.display()
            );
        }

        Ok(())
    }
}

fn non_empty(names: Vec<String>) -> impl Iterator<Item = String> {
    names.into_iter().map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}
