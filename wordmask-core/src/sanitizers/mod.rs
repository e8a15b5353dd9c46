//! Word matchers.
//!
//! `compiler` builds the primary matcher: one case-aware regular expression
//! over the whole active word set. `fallback` provides the Aho-Corasick
//! matcher used when the primary one cannot be built. Both report byte spans
//! into the original text and are polled against a [`crate::guard::ScanGuard`].
//!
//! License: MIT OR APACHE 2.0

pub mod compiler;
pub mod fallback;
