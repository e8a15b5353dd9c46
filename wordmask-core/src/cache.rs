//! cache.rs - Matcher cache with time-based expiry and single-flight builds.
//!
//! One entry is kept per [`MatchSpec`]. Entries are published whole under a
//! write lock and never mutated afterwards, so a reader sees either the old
//! matcher or the new one. Builds for the same spec are serialized behind an
//! async mutex: the first caller compiles, later callers wake up to find the
//! installed entry. A failed build is remembered the same way, so the callers
//! that queued behind it receive its error instead of compiling again. A
//! generation counter, bumped by every invalidation, stops a build that raced
//! with an invalidation from installing its result.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::config::CompilerConfig;
use crate::errors::{CompilationError, WordmaskError};
use crate::events::SanitizationObserver;
use crate::options::MatchSpec;
use crate::sanitizers::compiler::{self, CompiledMatcher};
use crate::words::{select_words, WordSource};

#[derive(Debug, Clone)]
struct CacheEntry {
    matcher: Arc<CompiledMatcher>,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// A word set the primary compiler refused, kept until invalidation or TTL
/// expiry.
#[derive(Debug, Clone)]
struct FailedBuild {
    error: CompilationError,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<MatchSpec, CacheEntry>,
    failures: HashMap<MatchSpec, FailedBuild>,
    generation: u64,
}

/// Point-in-time view of the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub live_entries: usize,
    pub generation: u64,
    pub ttl: Duration,
}

pub struct MatcherCache {
    ttl: Duration,
    limits: CompilerConfig,
    state: RwLock<CacheState>,
    /// One build lock per spec, indexed by [`build_slot`].
    build_locks: [Mutex<()>; 4],
    observer: Arc<dyn SanitizationObserver>,
}

fn build_slot(spec: MatchSpec) -> usize {
    (usize::from(spec.whole_word_only) << 1) | usize::from(spec.case_sensitive)
}

impl std::fmt::Debug for MatcherCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatcherCache")
            .field("ttl", &self.ttl)
            .field("limits", &self.limits)
            .field("stats", &self.stats())
            .finish()
    }
}

impl MatcherCache {
    pub fn new(ttl: Duration, limits: CompilerConfig, observer: Arc<dyn SanitizationObserver>) -> Self {
        Self {
            ttl,
            limits,
            state: RwLock::new(CacheState::default()),
            build_locks: Default::default(),
            observer,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn limits(&self) -> &CompilerConfig {
        &self.limits
    }

    /// The live matcher for `spec`, if any. An expired entry is dropped.
    pub fn get(&self, spec: MatchSpec) -> Option<Arc<CompiledMatcher>> {
        let now = Instant::now();
        {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            match state.entries.get(&spec) {
                None => return None,
                Some(entry) if entry.is_live(now) => {
                    self.observer.cache_hit();
                    return Some(Arc::clone(&entry.matcher));
                }
                Some(_) => {}
            }
        }

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let expired = state.entries.get(&spec).is_some_and(|entry| !entry.is_live(now));
        if expired {
            state.entries.remove(&spec);
            debug!("Evicted expired matcher for {:?}.", spec);
            self.observer.cache_eviction();
        }
        None
    }

    /// The live matcher for `spec`, building and installing one from a fresh
    /// word snapshot when needed. Concurrent callers for the same spec share
    /// a single build.
    ///
    /// A [`WordmaskError::Compilation`] error means the primary compiler
    /// refused the word set; nothing is installed in that case.
    pub async fn get_or_build(
        &self,
        spec: MatchSpec,
        source: &dyn WordSource,
    ) -> Result<Arc<CompiledMatcher>, WordmaskError> {
        if let Some(matcher) = self.get(spec) {
            return Ok(matcher);
        }

        let _build = self.build_locks[build_slot(spec)].lock().await;
        if let Some(matcher) = self.get(spec) {
            return Ok(matcher);
        }
        if let Some(error) = self.recent_failure(spec) {
            debug!("Reusing failed build for {:?}: {}", spec, error);
            return Err(WordmaskError::Compilation(error));
        }

        self.observer.cache_miss();
        let generation = self.generation();
        let entries = source.list_active_words().await.map_err(WordmaskError::WordSource)?;

        let limits = self.limits.clone();
        let built = tokio::task::spawn_blocking(move || {
            let words = select_words(&entries, spec.case_sensitive);
            let fingerprint = compiler::fingerprint(&words, spec);
            compiler::compile_words(&words, spec, fingerprint, &limits)
        })
        .await?;

        let matcher = match built {
            Ok(matcher) => Arc::new(matcher),
            Err(error) => {
                self.remember_failure(spec, error.clone(), generation);
                return Err(WordmaskError::Compilation(error));
            }
        };
        self.install(spec, Arc::clone(&matcher), generation);
        Ok(matcher)
    }

    fn install(&self, spec: MatchSpec, matcher: Arc<CompiledMatcher>, generation: u64) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.generation != generation {
            debug!("Cache invalidated during build for {:?}; result not installed.", spec);
            return false;
        }
        info!(
            "Installed matcher for {:?} ({} words, fingerprint {}, built {}).",
            spec,
            matcher.word_count(),
            &matcher.fingerprint()[..12],
            matcher.built_at().to_rfc3339()
        );
        state.failures.remove(&spec);
        state.entries.insert(
            spec,
            CacheEntry {
                matcher,
                expires_at: Instant::now() + self.ttl,
            },
        );
        true
    }

    fn recent_failure(&self, spec: MatchSpec) -> Option<CompilationError> {
        let now = Instant::now();
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let failed = state.failures.get(&spec).cloned()?;
        if now < failed.expires_at {
            return Some(failed.error);
        }
        state.failures.remove(&spec);
        None
    }

    fn remember_failure(&self, spec: MatchSpec, error: CompilationError, generation: u64) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.generation != generation {
            return;
        }
        state.failures.insert(
            spec,
            FailedBuild {
                error,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Drops every entry. Safe to call at any time, including with nothing
    /// cached; builds already in flight will not install their result.
    pub fn invalidate(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.generation = state.generation.wrapping_add(1);
        let dropped = state.entries.len();
        state.entries.clear();
        state.failures.clear();
        drop(state);

        for _ in 0..dropped {
            self.observer.cache_eviction();
        }
        debug!("Matcher cache invalidated ({} entries dropped).", dropped);
    }

    pub fn generation(&self) -> u64 {
        self.state.read().unwrap_or_else(PoisonError::into_inner).generation
    }

    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        CacheStats {
            live_entries: state.entries.values().filter(|e| e.is_live(now)).count(),
            generation: state.generation,
            ttl: self.ttl,
        }
    }
}
