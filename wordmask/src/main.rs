// wordmask/src/main.rs
//! Wordmask entry point.
//!
//! Parses the command line, sets up logging and the theme, and dispatches to
//! the selected command. Exit code 1 means an error or an exceeded scan
//! threshold.

use clap::Parser;
use std::process::ExitCode;

use wordmask::cli::{Cli, Commands};
use wordmask::commands::{self, error_msg, scan::ScanOutcome};
use wordmask::logger;
use wordmask::ui::theme::{build_theme_map, ThemeStyle};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));

    let theme_map = match build_theme_map(cli.theme.as_deref()) {
        Ok(theme_map) => theme_map,
        Err(e) => {
            error_msg(format!("Theme error: {:#}", e), &ThemeStyle::default_theme_map());
            return ExitCode::FAILURE;
        }
    };

    let result = match &cli.command {
        Commands::Sanitize(cmd) => commands::sanitize::run_sanitize(cmd, &theme_map, cli.quiet)
            .await
            .map(|_| ExitCode::SUCCESS),
        Commands::Scan(cmd) => commands::scan::run_scan(cmd, &theme_map, cli.quiet)
            .await
            .map(|outcome| match outcome {
                ScanOutcome::WithinThreshold => ExitCode::SUCCESS,
                ScanOutcome::ThresholdExceeded => ExitCode::FAILURE,
            }),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error_msg(format!("{:#}", e), &theme_map);
            ExitCode::FAILURE
        }
    }
}
