//! `wordmask scan`: reports where the sensitive words occur.
//!
//! Nothing is masked. Matches go to stdout as a table or as JSON, and the
//! command can fail a CI step when the number of matches passes a threshold.

use anyhow::{Context, Result};
use comfy_table::{presets, Table};
use is_terminal::IsTerminal;
use log::info;
use std::io::{self, Write};

use wordmask_core::{MatchRecord, SanitizationEngine};

use crate::cli::ScanCommand;
use crate::commands::{build_engine, error_msg, read_input};
use crate::ui::redaction_summary;
use crate::ui::theme::ThemeMap;

/// Outcome of a scan run, used by `main` to pick the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    WithinThreshold,
    ThresholdExceeded,
}

pub fn threshold_exceeded(match_count: usize, threshold: Option<usize>) -> bool {
    threshold.is_some_and(|limit| match_count > limit)
}

pub async fn run_scan(cmd: &ScanCommand, theme_map: &ThemeMap, quiet: bool) -> Result<ScanOutcome> {
    info!("Starting scan operation.");
    let input = read_input(cmd.source.input_file.as_deref())?;
    let engine = build_engine(&cmd.source)?;

    let matches = engine
        .scan(&input, &cmd.options())
        .await
        .context("Scan failed")?;

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    if cmd.json {
        let json = serde_json::to_string_pretty(&matches).context("Failed to serialize matches")?;
        writeln!(writer, "{}", json)?;
    } else {
        write_match_table(&matches, &mut writer)?;
    }
    writer.flush()?;

    if !quiet && !cmd.json {
        let stderr_supports_color = io::stderr().is_terminal();
        redaction_summary::print_summary(&matches, &mut io::stderr(), theme_map, stderr_supports_color)?;
    }

    if threshold_exceeded(matches.len(), cmd.fail_over_threshold) {
        error_msg(
            format!(
                "Found {} match(es), over the allowed threshold of {}.",
                matches.len(),
                cmd.fail_over_threshold.unwrap_or_default()
            ),
            theme_map,
        );
        return Ok(ScanOutcome::ThresholdExceeded);
    }

    info!("Scan operation completed.");
    Ok(ScanOutcome::WithinThreshold)
}

fn write_match_table<W: Write>(matches: &[MatchRecord], writer: &mut W) -> io::Result<()> {
    if matches.is_empty() {
        return writeln!(writer, "No matches.");
    }
    let mut table = Table::new();
    table.load_preset(presets::ASCII_MARKDOWN);
    table.set_header(vec!["Word", "Start", "Length"]);
    for record in matches {
        table.add_row(vec![record.word.clone(), record.start.to_string(), record.length.to_string()]);
    }
    writeln!(writer, "{}", table)
}
