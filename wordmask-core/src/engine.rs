// wordmask-core/src/engine.rs
//! Defines the core SanitizationEngine trait.
//!
//! The trait is the surface exposed to callers such as an HTTP layer or the
//! command line tool: sanitize a text against the active word list, or just
//! report where the words occur. Implementations own their matcher cache and
//! are shared across concurrent requests.
//!
//! License: MIT OR APACHE 2.0

use async_trait::async_trait;

use crate::config::EngineConfig;
use crate::errors::WordmaskError;
use crate::guard::CancelSignal;
use crate::options::SanitizeOptions;
use crate::redaction_match::{MatchRecord, SanitizeResult};

#[async_trait]
pub trait SanitizationEngine: Send + Sync {
    /// Masks every occurrence of the active words in `content`.
    ///
    /// Either the whole text is sanitized or an error is returned; a caller
    /// never receives partially masked text.
    async fn sanitize(&self, content: &str, options: &SanitizeOptions) -> Result<SanitizeResult, WordmaskError> {
        self.sanitize_with_cancel(content, options, CancelSignal::never()).await
    }

    /// Same as [`SanitizationEngine::sanitize`], aborting with
    /// [`WordmaskError::Cancelled`] once `cancel` fires.
    async fn sanitize_with_cancel(
        &self,
        content: &str,
        options: &SanitizeOptions,
        cancel: CancelSignal,
    ) -> Result<SanitizeResult, WordmaskError>;

    /// Locates the active words without masking anything. Only the matching
    /// flags of `options` are consulted.
    async fn scan(&self, content: &str, options: &SanitizeOptions) -> Result<Vec<MatchRecord>, WordmaskError>;

    /// Drops every cached matcher. Must be called whenever the word list changes.
    fn invalidate(&self);

    fn config(&self) -> &EngineConfig;
}
