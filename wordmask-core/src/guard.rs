//! Cancellation and time budgets for a single scan.
//!
//! Scans are CPU bound and run without yielding, so both the cancel signal and
//! the deadline are polled cooperatively by the matchers.
//!
//! License: MIT OR Apache-2.0

use std::time::{Duration, Instant};
use tokio::sync::watch;

use crate::errors::WordmaskError;

/// Receiving half of a cancellation channel. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

/// Sending half of a cancellation channel.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

/// Creates a connected handle/signal pair.
pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelSignal { rx })
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn signal(&self) -> CancelSignal {
        CancelSignal { rx: self.tx.subscribe() }
    }
}

impl CancelSignal {
    /// A signal that can never fire.
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    pub fn check(&self) -> Result<(), WordmaskError> {
        if self.is_cancelled() {
            Err(WordmaskError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::never()
    }
}

/// Polled by the matchers while scanning.
#[derive(Debug, Clone)]
pub struct ScanGuard {
    started: Instant,
    deadline: Instant,
    cancel: CancelSignal,
}

impl ScanGuard {
    pub fn new(budget: Duration, cancel: CancelSignal) -> Self {
        let started = Instant::now();
        Self {
            started,
            deadline: started + budget,
            cancel,
        }
    }

    /// Cancellation wins over the deadline when both apply.
    pub fn check(&self) -> Result<(), WordmaskError> {
        self.cancel.check()?;
        let now = Instant::now();
        if now >= self.deadline {
            return Err(WordmaskError::MatchTimeout {
                elapsed_ms: now.duration_since(self.started).as_millis() as u64,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_signal_stays_clear() {
        let signal = CancelSignal::never();
        assert!(!signal.is_cancelled());
        assert!(signal.check().is_ok());
    }

    #[test]
    fn test_cancel_reaches_every_signal() {
        let (handle, signal) = cancel_pair();
        let late = handle.signal();
        handle.cancel();
        assert!(signal.is_cancelled());
        assert!(matches!(late.check(), Err(WordmaskError::Cancelled)));
    }

    #[test]
    fn test_zero_budget_times_out() {
        let guard = ScanGuard::new(Duration::ZERO, CancelSignal::never());
        assert!(matches!(guard.check(), Err(WordmaskError::MatchTimeout { .. })));
    }

    #[test]
    fn test_cancel_takes_precedence_over_deadline() {
        let (handle, signal) = cancel_pair();
        handle.cancel();
        let guard = ScanGuard::new(Duration::ZERO, signal);
        assert!(matches!(guard.check(), Err(WordmaskError::Cancelled)));
    }
}
