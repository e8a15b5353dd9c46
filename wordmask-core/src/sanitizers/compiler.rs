//! compiler.rs - Builds the primary matcher for a word set.
//!
//! All words are escaped and joined into a single alternation, longest word
//! first, so that the leftmost-first semantics of the regex engine always
//! prefer the longest word at a given start position. Whole-word matching
//! adds a trailing boundary to the pattern; the leading boundary is checked
//! against the text because the regex crate has no look-behind.
//!
//! License: MIT OR APACHE 2.0

use chrono::{DateTime, Utc};
use log::debug;
use regex::{Regex, RegexBuilder};
use sha2::{Digest, Sha256};

use crate::config::CompilerConfig;
use crate::errors::{CompilationError, WordmaskError};
use crate::guard::ScanGuard;
use crate::options::MatchSpec;
use crate::redaction_match::MatchSpan;
use crate::resolver::is_word_char;
use crate::words::{select_words, WordEntry};

/// How many matches are produced between two guard checks.
const GUARD_INTERVAL: usize = 64;

/// Negated word-character class; `char::is_alphanumeric` describes the same set.
const NON_WORD_CLASS: &str = r"[^\p{Alphabetic}\p{N}]";

/// A compiled word matcher. Immutable once built and shared behind an `Arc`.
#[derive(Debug)]
pub struct CompiledMatcher {
    /// `None` when the word set is empty; such a matcher matches nothing.
    regex: Option<Regex>,
    spec: MatchSpec,
    fingerprint: String,
    word_count: usize,
    built_at: DateTime<Utc>,
}

impl CompiledMatcher {
    pub fn spec(&self) -> MatchSpec {
        self.spec
    }

    /// Content hash of the word set and flags this matcher was built from.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Non-overlapping matches in ascending order, longest word preferred at
    /// each start. With whole-word matching every span is bounded on both
    /// sides by a non-word character or the edge of the text.
    pub fn find_spans(&self, text: &str, guard: &ScanGuard) -> Result<Vec<MatchSpan>, WordmaskError> {
        guard.check()?;
        let Some(regex) = &self.regex else {
            return Ok(Vec::new());
        };

        if self.spec.whole_word_only {
            Self::find_whole_words(regex, text, guard)
        } else {
            let mut spans = Vec::new();
            for (i, m) in regex.find_iter(text).enumerate() {
                if i % GUARD_INTERVAL == 0 {
                    guard.check()?;
                }
                spans.push(MatchSpan::new(m.start(), m.len()));
            }
            Ok(spans)
        }
    }

    fn find_whole_words(regex: &Regex, text: &str, guard: &ScanGuard) -> Result<Vec<MatchSpan>, WordmaskError> {
        let mut spans = Vec::new();
        let mut at = 0;
        let mut iterations = 0usize;

        while at <= text.len() {
            if iterations % GUARD_INTERVAL == 0 {
                guard.check()?;
            }
            iterations += 1;

            let Some(word) = regex.captures_at(text, at).and_then(|caps| caps.name("w")) else {
                break;
            };

            let leading_ok = text[..word.start()]
                .chars()
                .next_back()
                .map_or(true, |c| !is_word_char(c));

            if leading_ok {
                spans.push(MatchSpan::new(word.start(), word.len()));
                at = word.end();
            } else {
                // No word can start here; retry from the next character.
                at = word.start()
                    + text[word.start()..].chars().next().map_or(1, char::len_utf8);
            }
        }
        Ok(spans)
    }
}

/// Content fingerprint of a word set under the given flags.
///
/// Each word is length-prefixed so that different sets can never serialize to
/// the same byte stream.
pub fn fingerprint(words: &[String], spec: MatchSpec) -> String {
    let mut sorted: Vec<&str> = words.iter().map(String::as_str).collect();
    sorted.sort_unstable();

    let mut hasher = Sha256::new();
    hasher.update([spec.whole_word_only as u8, spec.case_sensitive as u8]);
    for word in sorted {
        hasher.update((word.len() as u64).to_le_bytes());
        hasher.update(word.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Selects the matching words from a snapshot and compiles them.
pub fn compile(
    entries: &[WordEntry],
    spec: MatchSpec,
    limits: &CompilerConfig,
) -> Result<CompiledMatcher, CompilationError> {
    let words = select_words(entries, spec.case_sensitive);
    let fp = fingerprint(&words, spec);
    compile_words(&words, spec, fp, limits)
}

/// Compiles an already selected, longest-first word list.
pub fn compile_words(
    words: &[String],
    spec: MatchSpec,
    fingerprint: String,
    limits: &CompilerConfig,
) -> Result<CompiledMatcher, CompilationError> {
    debug!(
        "Compiling matcher for {} words (whole_word_only={}, case_sensitive={}).",
        words.len(),
        spec.whole_word_only,
        spec.case_sensitive
    );

    if words.len() > limits.max_words {
        return Err(CompilationError::TooManyWords(words.len(), limits.max_words));
    }

    if words.is_empty() {
        return Ok(CompiledMatcher {
            regex: None,
            spec,
            fingerprint,
            word_count: 0,
            built_at: Utc::now(),
        });
    }

    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<String>>()
        .join("|");

    if alternation.len() > limits.max_pattern_bytes {
        return Err(CompilationError::PatternTooLarge(alternation.len(), limits.max_pattern_bytes));
    }

    let pattern = if spec.whole_word_only {
        format!("(?P<w>{})(?:$|{})", alternation, NON_WORD_CLASS)
    } else {
        format!("(?:{})", alternation)
    };

    let regex = RegexBuilder::new(&pattern)
        .case_insensitive(!spec.case_sensitive)
        .size_limit(limits.size_limit_bytes)
        .dfa_size_limit(limits.size_limit_bytes)
        .build()?;

    debug!("Matcher compiled ({} pattern bytes).", pattern.len());
    Ok(CompiledMatcher {
        regex: Some(regex),
        spec,
        fingerprint,
        word_count: words.len(),
        built_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::CancelSignal;
    use std::time::Duration;

    fn guard() -> ScanGuard {
        ScanGuard::new(Duration::from_secs(5), CancelSignal::never())
    }

    fn words(list: &[&str]) -> Vec<WordEntry> {
        list.iter().map(|w| WordEntry::new(*w)).collect()
    }

    fn spans(text: &str, list: &[&str], spec: MatchSpec) -> Vec<(usize, usize)> {
        let matcher = compile(&words(list), spec, &CompilerConfig::default()).unwrap();
        matcher
            .find_spans(text, &guard())
            .unwrap()
            .into_iter()
            .map(|s| (s.start, s.length))
            .collect()
    }

    #[test]
    fn test_whole_word_skips_embedded_occurrences() {
        let found = spans("the category of cat", &["cat"], MatchSpec::new(true, false));
        assert_eq!(found, vec![(16, 3)]);
    }

    #[test]
    fn test_substring_mode_matches_inside_words() {
        let found = spans("the category of cat", &["cat"], MatchSpec::new(false, false));
        assert_eq!(found, vec![(4, 3), (16, 3)]);
    }

    #[test]
    fn test_longest_word_wins_at_same_start() {
        let found = spans("new york city", &["new", "new york"], MatchSpec::new(true, false));
        assert_eq!(found, vec![(0, 8)]);
    }

    #[test]
    fn test_longest_falls_back_to_shorter_when_not_whole_word() {
        let found = spans("cats cat", &["cat", "cats"], MatchSpec::new(true, false));
        assert_eq!(found, vec![(0, 4), (5, 3)]);

        let found = spans("catsup", &["cat", "cats"], MatchSpec::new(true, false));
        assert!(found.is_empty());
    }

    #[test]
    fn test_adjacent_matches_share_a_boundary() {
        let found = spans("bad,bad bad", &["bad"], MatchSpec::new(true, false));
        assert_eq!(found, vec![(0, 3), (4, 3), (8, 3)]);
    }

    #[test]
    fn test_words_with_punctuation_edges() {
        let found = spans("x!!y", &["x!", "!y"], MatchSpec::new(true, true));
        assert_eq!(found, vec![(0, 2), (2, 2)]);
    }

    #[test]
    fn test_case_sensitivity() {
        let found = spans("Secret secret", &["secret"], MatchSpec::new(true, true));
        assert_eq!(found, vec![(7, 6)]);

        let found = spans("Secret SECRET", &["secret"], MatchSpec::new(true, false));
        assert_eq!(found, vec![(0, 6), (7, 6)]);
    }

    #[test]
    fn test_unicode_boundaries_use_byte_offsets() {
        let found = spans("été café, cafés", &["café"], MatchSpec::new(true, false));
        assert_eq!(found, vec![(6, 5)]);
    }

    #[test]
    fn test_empty_word_set_matches_nothing() {
        let matcher = compile(&[], MatchSpec::default(), &CompilerConfig::default()).unwrap();
        assert_eq!(matcher.word_count(), 0);
        assert!(matcher.find_spans("anything", &guard()).unwrap().is_empty());
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let found = spans("a.b axb (x)", &["a.b", "(x)"], MatchSpec::new(false, true));
        assert_eq!(found, vec![(0, 3), (8, 3)]);
    }

    #[test]
    fn test_limits_are_enforced() {
        let limits = CompilerConfig { max_words: 1, ..Default::default() };
        let err = compile(&words(&["a", "b"]), MatchSpec::default(), &limits).unwrap_err();
        assert!(matches!(err, CompilationError::TooManyWords(2, 1)));

        let limits = CompilerConfig { max_pattern_bytes: 4, ..Default::default() };
        let err = compile(&words(&["alpha"]), MatchSpec::default(), &limits).unwrap_err();
        assert!(matches!(err, CompilationError::PatternTooLarge(5, 4)));
    }

    #[test]
    fn test_fingerprint_ignores_order_but_not_flags() {
        let a = vec!["one".to_string(), "two".to_string()];
        let b = vec!["two".to_string(), "one".to_string()];
        let spec = MatchSpec::default();
        assert_eq!(fingerprint(&a, spec), fingerprint(&b, spec));
        assert_ne!(fingerprint(&a, spec), fingerprint(&a, MatchSpec::new(false, false)));
        assert_ne!(
            fingerprint(&["ab".to_string(), "c".to_string()], spec),
            fingerprint(&["a".to_string(), "bc".to_string()], spec)
        );
    }

    #[test]
    fn test_cancelled_guard_aborts_scan() {
        let (handle, signal) = crate::guard::cancel_pair();
        handle.cancel();
        let guard = ScanGuard::new(Duration::from_secs(5), signal);
        let matcher = compile(&words(&["a"]), MatchSpec::default(), &CompilerConfig::default()).unwrap();
        assert!(matches!(matcher.find_spans("a a a", &guard), Err(WordmaskError::Cancelled)));
    }
}
