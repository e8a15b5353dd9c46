// wordmask-core/src/lib.rs
//! # Wordmask Core Library
//!
//! `wordmask-core` masks occurrences of a managed list of sensitive words in
//! free text. The word list lives outside the library, behind the
//! [`WordSource`] trait; the engine only ever works on a snapshot of the
//! active words taken when a matcher is built.
//!
//! ## Modules
//!
//! * `words`: `WordEntry`, the `WordSource` contract, in-memory and file-backed word lists.
//! * `options`: per-request `SanitizeOptions`, `MaskStrategy` and `MatchSpec`.
//! * `config`: `EngineConfig` with cache, compiler and scan limits.
//! * `sanitizers`: the primary regex compiler and the Aho-Corasick fallback.
//! * `resolver`: word-boundary filtering and overlap resolution for raw spans.
//! * `masking`: applies a `MaskStrategy` to resolved spans.
//! * `cache`: the `MatcherCache`, with TTL expiry and single-flight builds.
//! * `engine` / `engines`: the `SanitizationEngine` trait and `WordmaskEngine`.
//! * `events`: the `SanitizationObserver` hook for metrics.
//! * `guard`: cancellation and scan time budgets.
//! * `log_sanitizer`, `headless`: convenience front ends.
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use wordmask_core::{SanitizationEngine, SanitizeOptions, StaticWordSource, WordmaskEngine};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let source = Arc::new(StaticWordSource::from_words(["create", "string"]));
//! let engine = WordmaskEngine::new(source);
//!
//! let result = engine
//!     .sanitize("You need to create a string", &SanitizeOptions::default())
//!     .await?;
//! assert_eq!(result.sanitized_text, "You need to ****** a ******");
//! assert_eq!(result.matches.len(), 2);
//!
//! // After the word list changes, drop the cached matchers.
//! engine.invalidate();
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`WordmaskError`]. A primary compilation failure
//! never reaches the caller: the engine degrades to the automaton and flags
//! the result. Word sources and file loaders use `anyhow::Error`.
//!
//! ---
//! License: MIT OR APACHE 2.0

pub mod cache;
pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod events;
pub mod guard;
pub mod headless;
pub mod log_sanitizer;
pub mod masking;
pub mod options;
pub mod redaction_match;
pub mod resolver;
pub mod sanitizers;
pub mod words;

pub use cache::{CacheStats, MatcherCache};
pub use config::{load_config_or_default, CacheConfig, CompilerConfig, EngineConfig};
pub use engine::SanitizationEngine;
pub use engines::word_engine::WordmaskEngine;
pub use errors::{CompilationError, WordmaskError};
pub use events::{CountingObserver, EventCounts, NoopObserver, SanitizationObserver};
pub use guard::{cancel_pair, CancelHandle, CancelSignal, ScanGuard};
pub use headless::headless_sanitize;
pub use log_sanitizer::LogSanitizer;
pub use options::{MaskStrategy, MatchSpec, SanitizeOptions};
pub use redaction_match::{redact_sensitive, MatchRecord, MatchSpan, SanitizeResult};
pub use sanitizers::compiler::{compile, CompiledMatcher};
pub use sanitizers::fallback::FallbackMatcher;
pub use words::{select_words, StaticWordSource, WordEntry, WordList, WordSource};
