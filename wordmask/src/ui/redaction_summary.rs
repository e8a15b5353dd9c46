// wordmask/src/ui/redaction_summary.rs
//! Per-word occurrence summary printed after a sanitize or scan run.
//! License: MIT OR APACHE 2.0

use comfy_table::{presets, Cell, CellAlignment, Table};
use owo_colors::OwoColorize;
use std::collections::BTreeMap;
use std::io::{self, Write};

use wordmask_core::MatchRecord;

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

/// Occurrences per matched text, in order of first appearance.
pub fn count_occurrences(matches: &[MatchRecord]) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in matches {
        let count = counts.entry(record.word.as_str()).or_insert(0);
        if *count == 0 {
            order.push(record.word.clone());
        }
        *count += 1;
    }
    order
        .into_iter()
        .map(|word| {
            let count = counts.get(word.as_str()).copied().unwrap_or(0);
            (word, count)
        })
        .collect()
}

pub fn print_summary<W: Write>(
    matches: &[MatchRecord],
    writer: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    let title = format!("Masking summary: {} match(es)", matches.len());
    if enable_colors {
        writeln!(writer, "{}", title.color(color_for(ThemeEntry::Header, theme_map)))?;
    } else {
        writeln!(writer, "{}", title)?;
    }

    if matches.is_empty() {
        return writeln!(writer, "No sensitive words found.");
    }

    let mut table = Table::new();
    table.load_preset(presets::ASCII_MARKDOWN);
    table.set_header(vec!["Word", "Occurrences"]);

    for (word, count) in count_occurrences(matches) {
        let (word, count) = if enable_colors {
            (
                word.color(color_for(ThemeEntry::SummaryWord, theme_map)).to_string(),
                count.color(color_for(ThemeEntry::SummaryOccurrences, theme_map)).to_string(),
            )
        } else {
            (word, count.to_string())
        };
        table.add_row(vec![Cell::new(word), Cell::new(count).set_alignment(CellAlignment::Right)]);
    }

    writeln!(writer, "{}", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;

    fn record(word: &str, start: usize) -> MatchRecord {
        MatchRecord { word: word.to_string(), start, length: word.len() }
    }

    #[test]
    fn occurrences_keep_first_appearance_order() {
        let matches = vec![record("token", 0), record("secret", 10), record("token", 20)];
        assert_eq!(
            count_occurrences(&matches),
            vec![("token".to_string(), 2), ("secret".to_string(), 1)]
        );
    }

    #[test]
    fn empty_summary_says_so() -> io::Result<()> {
        let theme = ThemeStyle::default_theme_map();
        let mut out = Vec::new();
        print_summary(&[], &mut out, &theme, false)?;
        let rendered = String::from_utf8_lossy(&out);
        assert!(rendered.contains("0 match(es)"));
        assert!(rendered.contains("No sensitive words found."));
        Ok(())
    }

    #[test]
    fn summary_lists_each_word() -> io::Result<()> {
        let theme = ThemeStyle::default_theme_map();
        let mut out = Vec::new();
        print_summary(&[record("token", 0), record("token", 9)], &mut out, &theme, false)?;
        let rendered = String::from_utf8_lossy(&out);
        assert!(rendered.contains("token"));
        assert!(rendered.contains(" 2 |"));
        Ok(())
    }
}
