//! errors.rs - Custom error types for the wordmask-core library.
//!
//! `CompilationError` is recovered inside the engine by switching to the
//! fallback automaton. Every other `WordmaskError` reaches the caller, and the
//! caller never receives partially masked text alongside it.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// Reasons the primary compiler refuses a word set.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum CompilationError {
    #[error("active word set has {0} words, exceeding the limit of {1}")]
    TooManyWords(usize, usize),

    #[error("combined pattern length ({0} bytes) exceeds maximum allowed ({1})")]
    PatternTooLarge(usize, usize),

    #[error("failed to compile word pattern: {0}")]
    Regex(#[from] regex::Error),
}

/// All error kinds surfaced by `wordmask-core`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum WordmaskError {
    #[error(transparent)]
    Compilation(#[from] CompilationError),

    #[error("matching exceeded its time budget after {elapsed_ms} ms")]
    MatchTimeout { elapsed_ms: u64 },

    #[error("sanitization was cancelled")]
    Cancelled,

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("word source failed: {0}")]
    WordSource(#[from] anyhow::Error),

    #[error("blocking matcher task failed: {0}")]
    BuildTask(#[from] tokio::task::JoinError),
}

impl WordmaskError {
    /// Whether the same request may succeed if simply tried again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WordmaskError::MatchTimeout { .. })
    }
}
