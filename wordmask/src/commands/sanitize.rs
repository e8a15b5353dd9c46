//! `wordmask sanitize`: masks the sensitive words in a file or stdin.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, Write};

use wordmask_core::{SanitizationEngine, SanitizeResult};

use crate::cli::SanitizeCommand;
use crate::commands::{build_engine, info_msg, read_input, warn_msg};
use crate::ui::diff_viewer;
use crate::ui::redaction_summary;
use crate::ui::theme::ThemeMap;

pub async fn run_sanitize(cmd: &SanitizeCommand, theme_map: &ThemeMap, quiet: bool) -> Result<()> {
    info!("Starting sanitize operation.");
    let options = cmd.options();
    let input = read_input(cmd.source.input_file.as_deref())?;
    let engine = build_engine(&cmd.source)?;

    let result = engine
        .sanitize(&input, &options)
        .await
        .context("Sanitization failed")?;

    debug!(
        "Content sanitized in {:.2}ms. Original length: {}, Sanitized length: {}",
        result.elapsed_ms,
        input.len(),
        result.sanitized_text.len()
    );

    if result.degraded && !quiet {
        warn_msg("Word list too large for the regex matcher; used the fallback matcher.", theme_map);
    }

    handle_primary_output(cmd, &input, &result, theme_map, quiet)?;

    if !cmd.no_summary && !quiet && !cmd.json {
        let stderr_supports_color = io::stderr().is_terminal();
        redaction_summary::print_summary(&result.matches, &mut io::stderr(), theme_map, stderr_supports_color)?;
    }

    info!("Sanitize operation completed.");
    Ok(())
}

fn render<W: Write>(
    cmd: &SanitizeCommand,
    input: &str,
    result: &SanitizeResult,
    writer: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    if cmd.json {
        let json = serde_json::to_string_pretty(result).context("Failed to serialize result")?;
        writeln!(writer, "{}", json)?;
    } else if cmd.diff {
        diff_viewer::print_diff(input, &result.sanitized_text, writer, theme_map, enable_colors)?;
    } else {
        write!(writer, "{}", result.sanitized_text)?;
    }
    writer.flush()?;
    Ok(())
}

fn handle_primary_output(
    cmd: &SanitizeCommand,
    input: &str,
    result: &SanitizeResult,
    theme_map: &ThemeMap,
    quiet: bool,
) -> Result<()> {
    if let Some(path) = &cmd.output {
        if !quiet {
            info_msg(format!("Writing sanitized content to file: {}", path.display()), theme_map);
        }
        let mut file = fs::File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        render(cmd, input, result, &mut file, theme_map, false)
    } else {
        let stdout = io::stdout();
        let supports_color = stdout.is_terminal();
        let mut writer = stdout.lock();
        render(cmd, input, result, &mut writer, theme_map, supports_color)
    }
}
