//! fallback.rs - Aho-Corasick matcher used when the primary compiler refuses
//! a word set.
//!
//! The automaton works on `char`s. Text is walked with `char_indices` so
//! every reported match is translated back to a byte span in the original
//! string. Case-insensitive matching folds words and text with the same
//! per-character fold; a character whose lowercase form is not a single
//! `char` is left as is, which keeps the folded text aligned with the
//! original one character for one.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use wordmask_automaton::AhoCorasick;

use crate::errors::WordmaskError;
use crate::guard::ScanGuard;
use crate::options::MatchSpec;
use crate::redaction_match::MatchSpan;
use crate::resolver;
use crate::words::{select_words, WordEntry};

/// How many characters are scanned between two guard checks.
const GUARD_INTERVAL: usize = 1024;

/// Lowercase forms that share a case-fold class with a different lowercase
/// letter, mapped to that letter.
const FOLD_VARIANTS: &[(char, char)] = &[
    ('ς', 'σ'),
    ('ſ', 's'),
    ('µ', 'μ'),
    ('ϐ', 'β'),
    ('ϑ', 'θ'),
    ('ϕ', 'φ'),
    ('ϖ', 'π'),
    ('ϰ', 'κ'),
    ('ϱ', 'ρ'),
    ('ϵ', 'ε'),
    ('\u{345}', 'ι'),
    ('\u{1fbe}', 'ι'),
    ('ẛ', 'ṡ'),
    ('ᲀ', 'в'),
    ('ᲁ', 'д'),
    ('ᲂ', 'о'),
    ('ᲃ', 'с'),
    ('ᲄ', 'т'),
    ('ᲅ', 'т'),
    ('ᲆ', 'ъ'),
    ('ᲇ', 'ѣ'),
    ('ᲈ', 'ꙋ'),
];

/// Canonical single-`char` case fold, applied to patterns and text alike.
/// Every member of a simple case-fold class maps to the same `char`.
pub fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    let lower = match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        _ => return c,
    };
    FOLD_VARIANTS
        .iter()
        .find(|(variant, _)| *variant == lower)
        .map_or(lower, |(_, canonical)| *canonical)
}

#[derive(Debug, Clone)]
pub struct FallbackMatcher {
    automaton: AhoCorasick,
    spec: MatchSpec,
}

impl FallbackMatcher {
    /// Builds the automaton over the matching forms of the active entries.
    pub fn build(entries: &[WordEntry], spec: MatchSpec) -> Self {
        let words = select_words(entries, spec.case_sensitive);
        Self::from_words(&words, spec)
    }

    pub fn from_words(words: &[String], spec: MatchSpec) -> Self {
        let automaton = if spec.case_sensitive {
            AhoCorasick::build(words.iter().map(|w| w.chars()))
        } else {
            AhoCorasick::build(words.iter().map(|w| w.chars().map(fold_char)))
        };
        debug!(
            "Built fallback automaton: {} patterns, {} states.",
            automaton.pattern_count(),
            automaton.state_count()
        );
        Self { automaton, spec }
    }

    pub fn spec(&self) -> MatchSpec {
        self.spec
    }

    pub fn pattern_count(&self) -> usize {
        self.automaton.pattern_count()
    }

    /// Every occurrence of every word as raw byte spans, in no particular
    /// order and possibly overlapping.
    pub fn find_all(&self, text: &str, guard: &ScanGuard) -> Result<Vec<MatchSpan>, WordmaskError> {
        guard.check()?;
        let mut spans = Vec::new();
        if self.automaton.is_empty() {
            return Ok(spans);
        }

        // Byte offset of every char seen so far.
        let mut offsets: Vec<usize> = Vec::with_capacity(text.len());
        let mut state = self.automaton.start();

        for (index, (offset, c)) in text.char_indices().enumerate() {
            if index % GUARD_INTERVAL == 0 {
                guard.check()?;
            }
            offsets.push(offset);

            let symbol = if self.spec.case_sensitive { c } else { fold_char(c) };
            state = self.automaton.next_state(state, symbol);

            let end = offset + c.len_utf8();
            for &length in self.automaton.outputs(state) {
                let start = offsets[index + 1 - length];
                spans.push(MatchSpan::new(start, end - start));
            }
        }
        Ok(spans)
    }

    /// Raw occurrences reduced to the ascending, non-overlapping set.
    pub fn find_spans(&self, text: &str, guard: &ScanGuard) -> Result<Vec<MatchSpan>, WordmaskError> {
        let raw = self.find_all(text, guard)?;
        Ok(resolver::resolve(text, raw, self.spec.whole_word_only))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompilerConfig;
    use crate::guard::CancelSignal;
    use crate::sanitizers::compiler;
    use std::time::Duration;

    fn guard() -> ScanGuard {
        ScanGuard::new(Duration::from_secs(5), CancelSignal::never())
    }

    fn entries(list: &[&str]) -> Vec<WordEntry> {
        list.iter().map(|w| WordEntry::new(*w)).collect()
    }

    #[test]
    fn test_fold_char_keeps_multi_char_lowercase_intact() {
        assert_eq!(fold_char('A'), 'a');
        assert_eq!(fold_char('É'), 'é');
        // 'İ' lowercases to two chars.
        assert_eq!(fold_char('İ'), 'İ');
    }

    #[test]
    fn test_fold_char_unifies_case_fold_classes() {
        assert_eq!(fold_char('Σ'), 'σ');
        assert_eq!(fold_char('σ'), 'σ');
        assert_eq!(fold_char('ς'), 'σ');
        assert_eq!(fold_char('ſ'), 's');
        assert_eq!(fold_char('S'), 's');
        assert_eq!(fold_char('\u{212a}'), 'k');
        assert_eq!(fold_char('µ'), 'μ');
    }

    #[test]
    fn test_final_sigma_word_matches_its_own_text() {
        // The normalized form of "ΟΔΟΣ" ends with a final sigma.
        let matcher = FallbackMatcher::build(&entries(&["ΟΔΟΣ"]), MatchSpec::default());
        let spans = matcher.find_spans("the ΟΔΟΣ road", &guard()).unwrap();
        assert_eq!(spans, vec![MatchSpan::new(4, 8)]);
    }

    #[test]
    fn test_find_all_reports_nested_and_overlapping() {
        let matcher = FallbackMatcher::build(&entries(&["he", "she", "hers"]), MatchSpec::new(false, true));
        let mut spans = matcher.find_all("ushers", &guard()).unwrap();
        spans.sort();
        assert_eq!(spans, vec![MatchSpan::new(1, 3), MatchSpan::new(2, 2), MatchSpan::new(2, 4)]);
    }

    #[test]
    fn test_byte_spans_for_multibyte_text() {
        let matcher = FallbackMatcher::build(&entries(&["café"]), MatchSpec::new(true, false));
        let spans = matcher.find_spans("Ça CAFÉ!", &guard()).unwrap();
        assert_eq!(spans, vec![MatchSpan::new(4, 5)]);
        assert_eq!(&"Ça CAFÉ!"[4..9], "CAFÉ");
    }

    #[test]
    fn test_empty_word_set_matches_nothing() {
        let matcher = FallbackMatcher::build(&[], MatchSpec::default());
        assert!(matcher.find_spans("anything at all", &guard()).unwrap().is_empty());
    }

    #[test]
    fn test_agrees_with_primary_matcher() {
        let words = entries(&["new", "new york", "york", "cat", "cats", "x!", "!y", "Straße", "ΟΔΟΣ"]);
        let texts = [
            "New York cats and a cat, new-york, category",
            "x!!y and x!y",
            "STRASSE vs Straße vs straße",
            "the ΟΔΟΣ road, οδος and οδοσ",
            "",
        ];
        for spec in MatchSpec::ALL {
            let primary = compiler::compile(&words, spec, &CompilerConfig::default()).unwrap();
            let fallback = FallbackMatcher::build(&words, spec);
            for text in texts {
                assert_eq!(
                    primary.find_spans(text, &guard()).unwrap(),
                    fallback.find_spans(text, &guard()).unwrap(),
                    "spec {:?}, text {:?}",
                    spec,
                    text
                );
            }
        }
    }
}
