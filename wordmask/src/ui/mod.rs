// wordmask/src/ui/mod.rs
//! Terminal rendering: themes, status messages, diffs and summaries.
//! License: MIT OR APACHE 2.0

pub mod diff_viewer;
pub mod output_format;
pub mod redaction_summary;
pub mod theme;
