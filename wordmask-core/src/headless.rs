// wordmask-core/src/headless.rs
//! Convenience wrapper for one-shot sanitization without a long-lived engine.
//!
//! License: MIT OR APACHE 2.0

use std::sync::Arc;

use crate::engine::SanitizationEngine;
use crate::engines::word_engine::WordmaskEngine;
use crate::errors::WordmaskError;
use crate::options::SanitizeOptions;
use crate::redaction_match::SanitizeResult;
use crate::words::{StaticWordSource, WordEntry};

/// Sanitizes `content` against `words` using a throwaway engine with the
/// default configuration.
pub async fn headless_sanitize(
    words: Vec<WordEntry>,
    content: &str,
    options: &SanitizeOptions,
) -> Result<SanitizeResult, WordmaskError> {
    let engine = WordmaskEngine::new(Arc::new(StaticWordSource::new(words)));
    engine.sanitize(content, options).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::MaskStrategy;
    use anyhow::Result;

    #[tokio::test]
    async fn test_headless_sanitize_fixed_length() -> Result<()> {
        let options = SanitizeOptions::default().with_strategy(MaskStrategy::FixedLength);
        let result = headless_sanitize(vec![WordEntry::new("secret")], "a secret here", &options).await?;
        assert_eq!(result.sanitized_text, "a *** here");
        assert_eq!(result.matches.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_headless_sanitize_inactive_words_are_ignored() -> Result<()> {
        let words = vec![WordEntry::new("secret").inactive()];
        let result = headless_sanitize(words, "a secret here", &SanitizeOptions::default()).await?;
        assert_eq!(result.sanitized_text, "a secret here");
        assert!(result.matches.is_empty());
        Ok(())
    }
}
