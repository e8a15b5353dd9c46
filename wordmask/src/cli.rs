// wordmask/src/cli.rs
//! This file defines the command-line interface (CLI) for the wordmask application,
//! including all available commands and their arguments.
//! License: MIT OR APACHE 2.0

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use wordmask_core::{MaskStrategy, SanitizeOptions};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "wordmask",
    version = env!("CARGO_PKG_VERSION"),
    about = "Mask sensitive words in text",
    long_about = "Wordmask masks every occurrence of a managed list of sensitive words in text read from a file or stdin. Words can be matched as whole words or inside other words, with or without case sensitivity, and replaced by a full mask, a first/last-character mask, a fixed-length mask or a short content hash.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `wordmask` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Masks the sensitive words in a file or stdin.
    #[command(about = "Masks the sensitive words in a file or stdin.")]
    Sanitize(SanitizeCommand),

    /// Reports where the sensitive words occur without masking anything.
    #[command(about = "Reports where the sensitive words occur without masking anything.")]
    Scan(ScanCommand),
}

/// Input, word list and matching flags shared by every command.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long = "input", short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Word list file (.txt, .json or YAML).
    #[arg(
        long = "words",
        short = 'w',
        value_name = "FILE",
        env = "WORDMASK_WORDS",
        help = "Path to the sensitive word list (.txt, .json or .yaml)."
    )]
    pub words: PathBuf,

    /// Path to an engine configuration file (YAML or JSON).
    #[arg(long = "config", value_name = "FILE", env = "WORDMASK_CONFIG", help = "Path to an engine configuration file.")]
    pub config: Option<PathBuf>,

    /// Match case exactly.
    #[arg(long = "case-sensitive", help = "Match words with their exact case.")]
    pub case_sensitive: bool,

    /// Also match words embedded inside longer words.
    #[arg(long = "partial-words", help = "Also match words embedded inside longer words.")]
    pub partial_words: bool,
}

/// Arguments for the `sanitize` command.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Write sanitized output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Masking strategy.
    #[arg(long = "strategy", short = 's', value_enum, default_value = "full-mask", help = "How each match is replaced.")]
    pub strategy: StrategyChoice,

    /// Mask character.
    #[arg(long = "mask-char", short = 'm', default_value_t = '*', help = "Character used to mask matches.")]
    pub mask_char: char,

    /// Mask length for the fixed-length strategy.
    #[arg(long = "fixed-length", value_name = "N", default_value_t = 3, help = "Number of mask characters for the fixed-length strategy (1-1024).")]
    pub fixed_length: usize,

    /// Show a unified diff to highlight the changes made.
    #[arg(long, short = 'D', conflicts_with = "json", help = "Show a unified diff to highlight the changes made.")]
    pub diff: bool,

    /// Print the full result as JSON.
    #[arg(long, help = "Print the sanitized text and matches as JSON.")]
    pub json: bool,

    /// Suppress the match summary.
    #[arg(long = "no-summary", help = "Suppress the match summary.")]
    pub no_summary: bool,
}

impl SanitizeCommand {
    pub fn options(&self) -> SanitizeOptions {
        SanitizeOptions::default()
            .with_strategy(self.strategy.into())
            .with_mask_character(self.mask_char)
            .with_fixed_length(self.fixed_length)
            .with_whole_word_only(!self.source.partial_words)
            .with_case_sensitive(self.source.case_sensitive)
    }
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print matches as JSON to stdout.
    #[arg(long = "json", help = "Print the matches as JSON.")]
    pub json: bool,

    /// Exit with a non-zero code if more matches than this are found.
    #[arg(long = "fail-over-threshold", value_name = "N", help = "Exit with a non-zero code if the number of matches exceeds this threshold.")]
    pub fail_over_threshold: Option<usize>,
}

impl ScanCommand {
    pub fn options(&self) -> SanitizeOptions {
        SanitizeOptions::default()
            .with_whole_word_only(!self.source.partial_words)
            .with_case_sensitive(self.source.case_sensitive)
    }
}

/// Masking strategy as spelled on the command line.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum StrategyChoice {
    /// Every character becomes the mask character.
    FullMask,
    /// Keep the first and last character.
    FirstLast,
    /// Replace the whole match with a fixed number of mask characters.
    FixedLength,
    /// Replace the match with a short SHA-256 prefix.
    Hash,
}

impl From<StrategyChoice> for MaskStrategy {
    fn from(choice: StrategyChoice) -> Self {
        match choice {
            StrategyChoice::FullMask => MaskStrategy::FullMask,
            StrategyChoice::FirstLast => MaskStrategy::FirstLastOnly,
            StrategyChoice::FixedLength => MaskStrategy::FixedLength,
            StrategyChoice::Hash => MaskStrategy::Hash,
        }
    }
}
