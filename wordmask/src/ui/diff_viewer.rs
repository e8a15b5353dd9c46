// wordmask/src/ui/diff_viewer.rs
//! Renders a line-based unified diff between the original and sanitized text.
//! License: MIT OR APACHE 2.0

use diffy::{create_patch, Line};
use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

/// Writes the diff of `original` against `sanitized`. Unchanged input prints
/// a single notice line instead of an empty patch.
pub fn print_diff<W: Write>(
    original: &str,
    sanitized: &str,
    writer: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    let patch = create_patch(original, sanitized);
    if patch.hunks().is_empty() {
        return writeln!(writer, "No changes.");
    }

    let paint = |text: String, entry: ThemeEntry| -> String {
        if enable_colors {
            text.color(color_for(entry, theme_map)).to_string()
        } else {
            text
        }
    };

    writeln!(writer, "{}", paint("--- original".to_string(), ThemeEntry::DiffHeader))?;
    writeln!(writer, "{}", paint("+++ sanitized".to_string(), ThemeEntry::DiffHeader))?;

    for hunk in patch.hunks() {
        let header = format!(
            "@@ -{},{} +{},{} @@",
            hunk.old_range().start(),
            hunk.old_range().len(),
            hunk.new_range().start(),
            hunk.new_range().len()
        );
        writeln!(writer, "{}", paint(header, ThemeEntry::DiffHeader))?;

        for line in hunk.lines() {
            let (rendered, text) = match line {
                Line::Context(text) => (format!(" {}", text), *text),
                Line::Delete(text) => (paint(format!("-{}", text), ThemeEntry::DiffRemoved), *text),
                Line::Insert(text) => (paint(format!("+{}", text), ThemeEntry::DiffAdded), *text),
            };
            write!(writer, "{}", rendered)?;
            // diffy keeps the trailing newline on each line except the last
            if !text.ends_with('\n') {
                writeln!(writer)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;

    #[test]
    fn diff_marks_changed_lines() -> io::Result<()> {
        let theme = ThemeStyle::default_theme_map();
        let mut out = Vec::new();
        print_diff("keep\nmy secret\n", "keep\nmy ******\n", &mut out, &theme, false)?;
        let rendered = String::from_utf8_lossy(&out);
        assert!(rendered.contains("-my secret\n"));
        assert!(rendered.contains("+my ******\n"));
        assert!(rendered.contains(" keep\n"));
        Ok(())
    }

    #[test]
    fn identical_text_reports_no_changes() -> io::Result<()> {
        let theme = ThemeStyle::default_theme_map();
        let mut out = Vec::new();
        print_diff("same", "same", &mut out, &theme, false)?;
        assert_eq!(String::from_utf8_lossy(&out), "No changes.\n");
        Ok(())
    }
}
