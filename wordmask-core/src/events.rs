//! Observability events emitted by the engine.
//!
//! The engine only reports what happened; recording it (counters, histograms,
//! exporters) belongs to whoever implements [`SanitizationObserver`].
//!
//! License: MIT OR Apache-2.0

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Receiver for engine events. Every method defaults to a no-op.
pub trait SanitizationObserver: Send + Sync {
    fn cache_hit(&self) {}
    fn cache_miss(&self) {}
    fn cache_eviction(&self) {}
    fn match_count(&self, _count: usize) {}
    fn duration_ms(&self, _elapsed_ms: f64) {}
    fn error(&self) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SanitizationObserver for NoopObserver {}

/// Totals recorded by a [`CountingObserver`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EventCounts {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_evictions: u64,
    pub matches: u64,
    pub errors: u64,
    pub sanitize_calls: u64,
    pub total_duration_ms: f64,
}

/// Thread-safe in-process counters for every event.
#[derive(Debug, Default)]
pub struct CountingObserver {
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    cache_evictions: AtomicU64,
    matches: AtomicU64,
    errors: AtomicU64,
    sanitize_calls: AtomicU64,
    total_duration_ms: Mutex<f64>,
}

impl CountingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> EventCounts {
        EventCounts {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            cache_evictions: self.cache_evictions.load(Ordering::Relaxed),
            matches: self.matches.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            sanitize_calls: self.sanitize_calls.load(Ordering::Relaxed),
            total_duration_ms: *self.total_duration_ms.lock().unwrap_or_else(|e| e.into_inner()),
        }
    }
}

impl SanitizationObserver for CountingObserver {
    fn cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    fn cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    fn cache_eviction(&self) {
        self.cache_evictions.fetch_add(1, Ordering::Relaxed);
    }

    fn match_count(&self, count: usize) {
        self.matches.fetch_add(count as u64, Ordering::Relaxed);
    }

    fn duration_ms(&self, elapsed_ms: f64) {
        self.sanitize_calls.fetch_add(1, Ordering::Relaxed);
        *self.total_duration_ms.lock().unwrap_or_else(|e| e.into_inner()) += elapsed_ms;
    }

    fn error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_observer_accumulates() {
        let observer = CountingObserver::new();
        observer.cache_hit();
        observer.cache_hit();
        observer.cache_miss();
        observer.match_count(3);
        observer.match_count(2);
        observer.duration_ms(1.5);
        observer.error();

        let counts = observer.counts();
        assert_eq!(counts.cache_hits, 2);
        assert_eq!(counts.cache_misses, 1);
        assert_eq!(counts.cache_evictions, 0);
        assert_eq!(counts.matches, 5);
        assert_eq!(counts.sanitize_calls, 1);
        assert_eq!(counts.errors, 1);
        assert!((counts.total_duration_ms - 1.5).abs() < f64::EPSILON);
    }
}
