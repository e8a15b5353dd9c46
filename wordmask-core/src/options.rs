//! Per-request sanitize options and the matcher configuration derived from them.
//!
//! License: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::errors::WordmaskError;

pub const DEFAULT_MASK_CHARACTER: char = '*';
pub const DEFAULT_FIXED_LENGTH: usize = 3;
pub const MIN_FIXED_LENGTH: usize = 1;
pub const MAX_FIXED_LENGTH: usize = 1024;

/// How each located match is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MaskStrategy {
    /// Every character becomes the mask character.
    #[default]
    FullMask,
    /// First and last character survive; spans of two or fewer are fully masked.
    FirstLastOnly,
    /// The whole span becomes `fixed_length` mask characters.
    FixedLength,
    /// The whole span becomes the first 8 hex characters of its SHA-256.
    Hash,
}

impl MaskStrategy {
    /// Whether the strategy keeps the character count of the text unchanged.
    pub fn preserves_length(&self) -> bool {
        matches!(self, MaskStrategy::FullMask | MaskStrategy::FirstLastOnly)
    }
}

/// Matcher configuration. Each combination owns its own cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchSpec {
    pub whole_word_only: bool,
    pub case_sensitive: bool,
}

impl Default for MatchSpec {
    fn default() -> Self {
        Self {
            whole_word_only: true,
            case_sensitive: false,
        }
    }
}

impl MatchSpec {
    pub const ALL: [MatchSpec; 4] = [
        MatchSpec { whole_word_only: true, case_sensitive: false },
        MatchSpec { whole_word_only: true, case_sensitive: true },
        MatchSpec { whole_word_only: false, case_sensitive: false },
        MatchSpec { whole_word_only: false, case_sensitive: true },
    ];

    pub fn new(whole_word_only: bool, case_sensitive: bool) -> Self {
        Self { whole_word_only, case_sensitive }
    }
}

/// Options accepted by a sanitize request.
///
/// Field names deserialize from camelCase; `maskChar` is accepted as an alias
/// for `maskCharacter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SanitizeOptions {
    pub strategy: MaskStrategy,
    #[serde(alias = "maskChar")]
    pub mask_character: String,
    pub whole_word_only: bool,
    pub case_sensitive: bool,
    /// Only consulted by [`MaskStrategy::FixedLength`].
    pub fixed_length: usize,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self {
            strategy: MaskStrategy::FullMask,
            mask_character: DEFAULT_MASK_CHARACTER.to_string(),
            whole_word_only: true,
            case_sensitive: false,
            fixed_length: DEFAULT_FIXED_LENGTH,
        }
    }
}

impl SanitizeOptions {
    /// Rejects options that cannot be honoured. Runs before any matching.
    pub fn validate(&self) -> Result<(), WordmaskError> {
        if self.mask_character.chars().count() != 1 {
            return Err(WordmaskError::InvalidOption(format!(
                "maskChar must be a single character, got {:?}",
                self.mask_character
            )));
        }
        if self.strategy == MaskStrategy::FixedLength
            && !(MIN_FIXED_LENGTH..=MAX_FIXED_LENGTH).contains(&self.fixed_length)
        {
            return Err(WordmaskError::InvalidOption(format!(
                "fixedLength must be between {} and {}, got {}",
                MIN_FIXED_LENGTH, MAX_FIXED_LENGTH, self.fixed_length
            )));
        }
        Ok(())
    }

    pub fn mask_char(&self) -> char {
        self.mask_character.chars().next().unwrap_or(DEFAULT_MASK_CHARACTER)
    }

    pub fn match_spec(&self) -> MatchSpec {
        MatchSpec::new(self.whole_word_only, self.case_sensitive)
    }

    pub fn with_strategy(mut self, strategy: MaskStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_mask_character(mut self, mask: char) -> Self {
        self.mask_character = mask.to_string();
        self
    }

    pub fn with_whole_word_only(mut self, whole_word_only: bool) -> Self {
        self.whole_word_only = whole_word_only;
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_fixed_length(mut self, fixed_length: usize) -> Self {
        self.fixed_length = fixed_length;
        self
    }
}
