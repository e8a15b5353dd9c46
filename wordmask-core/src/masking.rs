//! Applies a masking strategy to resolved match spans.
//!
//! Output is rebuilt from the original text in a single pass: unmatched gaps
//! are copied verbatim and each span is replaced by its mask. Span offsets
//! always refer to the original text.
//!
//! License: MIT OR Apache-2.0

use sha2::{Digest, Sha256};

use crate::options::{MaskStrategy, SanitizeOptions};
use crate::redaction_match::{log_mask_action_debug, MatchRecord, MatchSpan};

/// Number of hex characters kept from the SHA-256 digest.
pub const HASH_PREFIX_LEN: usize = 8;

/// Replacement for one matched slice.
pub fn mask_word(original: &str, strategy: MaskStrategy, mask: char, fixed_length: usize) -> String {
    match strategy {
        MaskStrategy::FullMask => original.chars().map(|_| mask).collect(),
        MaskStrategy::FirstLastOnly => {
            let count = original.chars().count();
            if count <= 2 {
                return original.chars().map(|_| mask).collect();
            }
            let mut chars = original.chars();
            let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
                return String::new();
            };
            let mut masked = String::with_capacity(original.len());
            masked.push(first);
            masked.extend(std::iter::repeat(mask).take(count - 2));
            masked.push(last);
            masked
        }
        MaskStrategy::FixedLength => std::iter::repeat(mask).take(fixed_length).collect(),
        MaskStrategy::Hash => {
            let digest = Sha256::digest(original.as_bytes());
            let mut hex = hex::encode(digest);
            hex.truncate(HASH_PREFIX_LEN);
            hex
        }
    }
}

/// Masks `spans` (ascending, non-overlapping, on char boundaries) in `text`.
///
/// Returns the sanitized text and one record per span describing the
/// original slice.
pub fn mask(text: &str, spans: &[MatchSpan], options: &SanitizeOptions) -> (String, Vec<MatchRecord>) {
    let mask_char = options.mask_char();
    let mut sanitized = String::with_capacity(text.len());
    let mut records = Vec::with_capacity(spans.len());
    let mut cursor = 0;

    for &span in spans {
        let original = &text[span.start..span.end()];
        let replacement = mask_word(original, options.strategy, mask_char, options.fixed_length);
        log_mask_action_debug(module_path!(), original, &replacement, span);

        sanitized.push_str(&text[cursor..span.start]);
        sanitized.push_str(&replacement);
        records.push(MatchRecord::from_span(text, span));
        cursor = span.end();
    }
    sanitized.push_str(&text[cursor..]);

    (sanitized, records)
}
