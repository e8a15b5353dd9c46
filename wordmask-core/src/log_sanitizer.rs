//! Masks sensitive words in log lines before they are written.
//!
//! Log lines always use the default masking: every character of a whole,
//! case-insensitive match becomes `*`.
//!
//! License: MIT OR Apache-2.0

use std::sync::Arc;

use crate::engine::SanitizationEngine;
use crate::errors::WordmaskError;
use crate::options::SanitizeOptions;

#[derive(Clone)]
pub struct LogSanitizer {
    engine: Arc<dyn SanitizationEngine>,
    options: SanitizeOptions,
}

impl LogSanitizer {
    pub fn new(engine: Arc<dyn SanitizationEngine>) -> Self {
        Self {
            engine,
            options: SanitizeOptions::default(),
        }
    }

    pub async fn sanitize(&self, input: &str) -> Result<String, WordmaskError> {
        if input.is_empty() {
            return Ok(String::new());
        }
        let result = self.engine.sanitize(input, &self.options).await?;
        Ok(result.sanitized_text)
    }
}
