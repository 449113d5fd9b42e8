/*!
 * Command-line interface for gatherfs
 */

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser};
use env_logger::{Env, Target};
use indicatif::{ProgressBar, ProgressStyle};

use gatherfs::config::{Args, Config};
use gatherfs::report::{Reporter, ScanReport};
use gatherfs::scanner::Scanner;
use gatherfs::writer::ManifestWriter;

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Stdout)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "gatherfs", &mut io::stdout());
        return Ok(());
    }

    init_logger(args.verbose);

    let config = Config::from_args(args);
    config.validate()?;

    let progress = if config.quiet {
        ProgressBar::hidden()
    } else {
        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos} files")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        progress.enable_steady_tick(Duration::from_millis(100));
        progress
    };
    progress.set_prefix("📂 Scanning");
    progress.set_message(config.scan.root.display().to_string());

    let scanner = Scanner::new(config.scan.clone(), Arc::new(progress.clone()));
    let writer = ManifestWriter::new(config.scan.output_exclude.clone(), &config.output_dir);

    let start_time = Instant::now();

    let result = scanner.scan();

    progress.set_prefix("💾 Writing");
    let output_file = writer.write(&result)?;

    let duration = start_time.elapsed();
    progress.finish_and_clear();

    log::info!(
        "Files have been gathered and written to {}",
        output_file.display()
    );

    if !config.quiet {
        let report = ScanReport::new(&result, output_file.display().to_string(), duration);
        Reporter::new(config.report).print_report(&report)?;
    }

    Ok(())
}
