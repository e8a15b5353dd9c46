//! Overlap resolution for raw match spans.
//!
//! The fallback automaton reports every occurrence of every word, including
//! nested and overlapping ones. This module reduces such a set to the same
//! ascending, non-overlapping, longest-first selection the primary matcher
//! produces natively.
//!
//! License: MIT OR Apache-2.0

use crate::redaction_match::MatchSpan;

/// Letters and digits in the Unicode sense.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Whether `span` is not glued to a word character on either side.
/// The edges of the text count as boundaries.
pub fn is_whole_word(text: &str, span: MatchSpan) -> bool {
    let before = text[..span.start].chars().next_back();
    let after = text[span.end()..].chars().next();
    before.map_or(true, |c| !is_word_char(c)) && after.map_or(true, |c| !is_word_char(c))
}

pub fn filter_whole_words(text: &str, spans: Vec<MatchSpan>) -> Vec<MatchSpan> {
    spans.into_iter().filter(|span| is_whole_word(text, *span)).collect()
}

/// Orders spans by ascending start, longest first among equal starts, and
/// keeps each span that begins at or after the end of the last kept one.
pub fn select_non_overlapping(mut spans: Vec<MatchSpan>) -> Vec<MatchSpan> {
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.length.cmp(&a.length)));

    let mut selected: Vec<MatchSpan> = Vec::with_capacity(spans.len());
    let mut last_end = 0;
    for span in spans {
        if span.start >= last_end {
            last_end = span.end();
            selected.push(span);
        }
    }
    selected
}

/// Boundary filter (when requested) followed by de-overlapping.
pub fn resolve(text: &str, spans: Vec<MatchSpan>, whole_word_only: bool) -> Vec<MatchSpan> {
    let spans = if whole_word_only {
        filter_whole_words(text, spans)
    } else {
        spans
    };
    select_non_overlapping(spans)
}
