// wordmask-core/src/engines/word_engine.rs
//! The word-list `SanitizationEngine`.
//!
//! A sanitize call resolves the matcher configuration from the options, asks
//! the cache for a compiled matcher, scans, and masks. When the primary
//! compiler refuses the word set the engine builds an Aho-Corasick automaton
//! from a fresh snapshot instead, resolves overlaps itself and flags the
//! result as degraded. The fallback automaton is never cached.
//!
//! License: MIT OR APACHE 2.0

use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;
use tokio::time::Instant;

use crate::cache::{CacheStats, MatcherCache};
use crate::config::EngineConfig;
use crate::engine::SanitizationEngine;
use crate::errors::WordmaskError;
use crate::events::{NoopObserver, SanitizationObserver};
use crate::guard::{CancelSignal, ScanGuard};
use crate::masking;
use crate::options::{MatchSpec, SanitizeOptions};
use crate::redaction_match::{MatchRecord, MatchSpan, SanitizeResult};
use crate::sanitizers::fallback::FallbackMatcher;
use crate::words::WordSource;

pub struct WordmaskEngine {
    cache: MatcherCache,
    source: Arc<dyn WordSource>,
    observer: Arc<dyn SanitizationObserver>,
    config: EngineConfig,
}

impl std::fmt::Debug for WordmaskEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordmaskEngine")
            .field("cache", &self.cache)
            .field("config", &self.config)
            .finish()
    }
}

impl WordmaskEngine {
    /// An engine with the default configuration and no observer.
    pub fn new(source: Arc<dyn WordSource>) -> Self {
        let config = EngineConfig::default();
        let observer: Arc<dyn SanitizationObserver> = Arc::new(NoopObserver);
        Self {
            cache: MatcherCache::new(config.cache_ttl(), config.compiler.clone(), Arc::clone(&observer)),
            source,
            observer,
            config,
        }
    }

    pub fn with_config(source: Arc<dyn WordSource>, config: EngineConfig) -> Result<Self, WordmaskError> {
        Self::with_observer(source, config, Arc::new(NoopObserver))
    }

    pub fn with_observer(
        source: Arc<dyn WordSource>,
        config: EngineConfig,
        observer: Arc<dyn SanitizationObserver>,
    ) -> Result<Self, WordmaskError> {
        config.validate()?;
        Ok(Self {
            cache: MatcherCache::new(config.cache_ttl(), config.compiler.clone(), Arc::clone(&observer)),
            source,
            observer,
            config,
        })
    }

    pub fn cache(&self) -> &MatcherCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Builds the matcher for the default options ahead of the first request.
    pub async fn warm_up(&self) -> Result<(), WordmaskError> {
        let spec = MatchSpec::default();
        match self.cache.get_or_build(spec, self.source.as_ref()).await {
            Ok(matcher) => {
                debug!("Warm-up built matcher with {} words.", matcher.word_count());
                Ok(())
            }
            Err(WordmaskError::Compilation(err)) => {
                warn!("Warm-up could not build the primary matcher: {}", err);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Locates resolved match spans, falling back to the automaton when the
    /// primary matcher cannot be compiled. The boolean is the degraded flag.
    async fn locate(
        &self,
        content: &str,
        spec: MatchSpec,
        cancel: &CancelSignal,
    ) -> Result<(Vec<MatchSpan>, bool), WordmaskError> {
        cancel.check()?;
        let budget = self.config.scan_timeout();

        match self.cache.get_or_build(spec, self.source.as_ref()).await {
            Ok(matcher) => {
                let guard = ScanGuard::new(budget, cancel.clone());
                let text = content.to_owned();
                // Scanning is CPU bound; keep it off the async workers.
                let spans = tokio::task::spawn_blocking(move || matcher.find_spans(&text, &guard)).await??;
                Ok((spans, false))
            }
            Err(WordmaskError::Compilation(err)) => {
                warn!("Primary matcher unavailable for {:?}: {}. Using fallback automaton.", spec, err);
                self.observer.error();

                let entries = self
                    .source
                    .list_active_words()
                    .await
                    .map_err(WordmaskError::WordSource)?;
                let text = content.to_owned();
                let cancel = cancel.clone();
                let spans = tokio::task::spawn_blocking(move || {
                    let fallback = FallbackMatcher::build(&entries, spec);
                    let guard = ScanGuard::new(budget, cancel);
                    fallback.find_spans(&text, &guard)
                })
                .await??;
                Ok((spans, true))
            }
            Err(err) => Err(err),
        }
    }

    async fn run(
        &self,
        content: &str,
        options: &SanitizeOptions,
        cancel: &CancelSignal,
    ) -> Result<SanitizeResult, WordmaskError> {
        options.validate()?;
        let spec = options.match_spec();
        debug!(
            "Sanitizing {} bytes (strategy={:?}, whole_word_only={}, case_sensitive={}).",
            content.len(),
            options.strategy,
            spec.whole_word_only,
            spec.case_sensitive
        );

        let (spans, degraded) = self.locate(content, spec, cancel).await?;
        cancel.check()?;
        let (sanitized_text, matches) = masking::mask(content, &spans, options);

        Ok(SanitizeResult {
            sanitized_text,
            matches,
            degraded,
            elapsed_ms: 0.0,
        })
    }

    /// Reports duration, match count and failures for one operation.
    fn record<T>(&self, started: Instant, outcome: &Result<T, WordmaskError>, matches: impl Fn(&T) -> usize) -> f64 {
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        self.observer.duration_ms(elapsed_ms);
        match outcome {
            Ok(value) => self.observer.match_count(matches(value)),
            Err(err) => {
                debug!("Sanitize operation failed after {:.2} ms: {}", elapsed_ms, err);
                self.observer.error();
            }
        }
        elapsed_ms
    }
}

#[async_trait]
impl SanitizationEngine for WordmaskEngine {
    async fn sanitize_with_cancel(
        &self,
        content: &str,
        options: &SanitizeOptions,
        cancel: CancelSignal,
    ) -> Result<SanitizeResult, WordmaskError> {
        let started = Instant::now();
        let mut outcome = self.run(content, options, &cancel).await;
        let elapsed_ms = self.record(started, &outcome, |result| result.matches.len());
        if let Ok(result) = outcome.as_mut() {
            result.elapsed_ms = elapsed_ms;
        }
        outcome
    }

    async fn scan(&self, content: &str, options: &SanitizeOptions) -> Result<Vec<MatchRecord>, WordmaskError> {
        let started = Instant::now();
        let outcome = self
            .locate(content, options.match_spec(), &CancelSignal::never())
            .await
            .map(|(spans, _)| {
                spans
                    .into_iter()
                    .map(|span| MatchRecord::from_span(content, span))
                    .collect::<Vec<_>>()
            });
        self.record(started, &outcome, Vec::len);
        outcome
    }

    fn invalidate(&self) {
        self.cache.invalidate();
    }

    fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompilerConfig;
    use crate::events::CountingObserver;
    use crate::options::MaskStrategy;
    use crate::words::{StaticWordSource, WordEntry};
    use anyhow::{anyhow, Result};

    struct FailingSource;

    #[async_trait]
    impl WordSource for FailingSource {
        async fn list_active_words(&self) -> Result<Vec<WordEntry>> {
            Err(anyhow!("word store unavailable"))
        }
    }

    fn engine(words: &[&str]) -> WordmaskEngine {
        WordmaskEngine::new(Arc::new(StaticWordSource::from_words(words.iter().copied())))
    }

    #[tokio::test]
    async fn test_sanitize_masks_whole_words() -> Result<()> {
        let engine = engine(&["create", "string"]);
        let result = engine
            .sanitize("You need to create a string", &SanitizeOptions::default())
            .await?;
        assert_eq!(result.sanitized_text, "You need to ****** a ******");
        assert_eq!(result.matches.len(), 2);
        assert!(!result.degraded);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_options_are_rejected_before_matching() -> Result<()> {
        let engine = WordmaskEngine::new(Arc::new(FailingSource));
        let options = SanitizeOptions::default()
            .with_strategy(MaskStrategy::FixedLength)
            .with_fixed_length(0);
        let err = engine.sanitize("text", &options).await.unwrap_err();
        assert!(matches!(err, WordmaskError::InvalidOption(_)));
        Ok(())
    }

    #[tokio::test]
    async fn test_word_source_failure_propagates() -> Result<()> {
        let engine = WordmaskEngine::new(Arc::new(FailingSource));
        let err = engine.sanitize("text", &SanitizeOptions::default()).await.unwrap_err();
        assert!(matches!(err, WordmaskError::WordSource(_)));
        Ok(())
    }

    #[tokio::test]
    async fn test_compilation_failure_degrades_to_fallback() -> Result<()> {
        let observer = Arc::new(CountingObserver::new());
        let config = EngineConfig {
            compiler: CompilerConfig { max_words: 1, ..Default::default() },
            ..Default::default()
        };
        let engine = WordmaskEngine::with_observer(
            Arc::new(StaticWordSource::from_words(["create", "string"])),
            config,
            observer.clone(),
        )?;

        let result = engine
            .sanitize("You need to create a string", &SanitizeOptions::default())
            .await?;
        assert!(result.degraded);
        assert_eq!(result.sanitized_text, "You need to ****** a ******");
        assert_eq!(engine.cache_stats().live_entries, 0);

        let counts = observer.counts();
        assert_eq!(counts.errors, 1);
        assert_eq!(counts.matches, 2);
        assert_eq!(counts.sanitize_calls, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_degraded_path_masks_final_sigma_words() -> Result<()> {
        let words = || Arc::new(StaticWordSource::from_words(["ΟΔΟΣ"]));
        let config = EngineConfig {
            compiler: CompilerConfig { max_pattern_bytes: 1, ..Default::default() },
            ..Default::default()
        };
        let primary = WordmaskEngine::new(words());
        let degraded = WordmaskEngine::with_config(words(), config)?;

        let expected = primary.sanitize("the ΟΔΟΣ road", &SanitizeOptions::default()).await?;
        let result = degraded.sanitize("the ΟΔΟΣ road", &SanitizeOptions::default()).await?;
        assert!(!expected.degraded);
        assert!(result.degraded);
        assert_eq!(expected.sanitized_text, "the **** road");
        assert_eq!(result.sanitized_text, expected.sanitized_text);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_degraded_requests_compile_once() -> Result<()> {
        let observer = Arc::new(CountingObserver::new());
        let config = EngineConfig {
            compiler: CompilerConfig { max_words: 1, ..Default::default() },
            ..Default::default()
        };
        let engine = Arc::new(WordmaskEngine::with_observer(
            Arc::new(StaticWordSource::from_words(["a", "b"])),
            config,
            observer.clone(),
        )?);

        let mut handles = Vec::new();
        for _ in 0..16 {
            let engine = Arc::clone(&engine);
            handles.push(tokio::spawn(async move {
                engine.sanitize("a or b", &SanitizeOptions::default()).await
            }));
        }
        for handle in handles {
            let result = handle.await??;
            assert!(result.degraded);
            assert_eq!(result.sanitized_text, "* or *");
        }

        let counts = observer.counts();
        assert_eq!(counts.cache_misses, 1);
        assert_eq!(counts.errors, 16);
        assert_eq!(engine.cache_stats().live_entries, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_cancelled_before_start() -> Result<()> {
        let engine = engine(&["secret"]);
        let (handle, signal) = crate::guard::cancel_pair();
        handle.cancel();
        let err = engine
            .sanitize_with_cancel("a secret", &SanitizeOptions::default(), signal)
            .await
            .unwrap_err();
        assert!(matches!(err, WordmaskError::Cancelled));
        Ok(())
    }

    #[tokio::test]
    async fn test_scan_reports_without_masking() -> Result<()> {
        let engine = engine(&["cat"]);
        let options = SanitizeOptions::default().with_whole_word_only(false);
        let records = engine.scan("category cat", &options).await?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], MatchRecord { word: "cat".into(), start: 0, length: 3 });
        Ok(())
    }

    #[tokio::test]
    async fn test_warm_up_populates_cache() -> Result<()> {
        let engine = engine(&["secret"]);
        engine.warm_up().await?;
        assert_eq!(engine.cache_stats().live_entries, 1);
        engine.invalidate();
        assert_eq!(engine.cache_stats().live_entries, 0);
        Ok(())
    }
}
