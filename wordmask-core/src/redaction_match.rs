//! Match spans, reported matches and sanitize results, plus the PII-aware
//! debug logging helpers used wherever a matched word could reach a log line.
//!
//! License: MIT OR Apache-2.0

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Whether matched words may appear verbatim in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("WORDMASK_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Half-open byte range into the original text. Both ends lie on `char`
/// boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchSpan {
    pub start: usize,
    pub length: usize,
}

impl MatchSpan {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// A match as reported to the caller: the original slice and its byte range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub word: String,
    pub start: usize,
    pub length: usize,
}

impl MatchRecord {
    pub fn from_span(text: &str, span: MatchSpan) -> Self {
        Self {
            word: text[span.start..span.end()].to_string(),
            start: span.start,
            length: span.length,
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Outcome of one sanitize call. `matches` ascend by `start` and never overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizeResult {
    pub sanitized_text: String,
    pub matches: Vec<MatchRecord>,
    /// Set when the fallback automaton produced the result.
    pub degraded: bool,
    pub elapsed_ms: f64,
}

impl SanitizeResult {
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    let len = s.chars().count();
    if len <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", len)
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_mask_action_debug(
    module_path: &str,
    original_sensitive_content: &str,
    replacement: &str,
    span: MatchSpan,
) {
    debug!(
        "{} Mask action at {}..{}: Original='{}', Masked='{}'",
        module_path,
        span.start,
        span.end(),
        get_loggable_content(original_sensitive_content),
        replacement
    );
}
