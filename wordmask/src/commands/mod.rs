// wordmask/src/commands/mod.rs
//! Command implementations and the helpers they share: reading input,
//! loading the word list and configuration, and themed stderr messages.
//! License: MIT OR APACHE 2.0

pub mod sanitize;
pub mod scan;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::debug;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use wordmask_core::{load_config_or_default, WordList, WordmaskEngine};

use crate::cli::SourceArgs;
use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Reads the whole input from `path`, or from stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

/// Builds an engine over the word list and configuration named by `source`.
pub fn build_engine(source: &SourceArgs) -> Result<WordmaskEngine> {
    let config = load_config_or_default(source.config.as_deref())?;
    let words = WordList::load_from_file(&source.words)?;
    debug!(
        "Loaded {} active word(s) from {}",
        words.active_count(),
        source.words.display()
    );

    let engine = WordmaskEngine::with_config(Arc::new(words.into_source()), config)?;
    Ok(engine)
}
