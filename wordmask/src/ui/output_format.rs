//! Themed status messages written to stderr.

use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

fn print_message<W: Write>(
    writer: &mut W,
    prefix: &str,
    message: &str,
    entry: ThemeEntry,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    let line = format!("{} {}", prefix, message);
    if enable_colors {
        writeln!(writer, "{}", line.color(color_for(entry, theme_map)))
    } else {
        writeln!(writer, "{}", line)
    }
}

pub fn print_info_message<W: Write>(writer: &mut W, message: &str, theme_map: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, "[info]", message, ThemeEntry::Info, theme_map, enable_colors)
}

pub fn print_warn_message<W: Write>(writer: &mut W, message: &str, theme_map: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, "[warn]", message, ThemeEntry::Warn, theme_map, enable_colors)
}

pub fn print_error_message<W: Write>(writer: &mut W, message: &str, theme_map: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, "[error]", message, ThemeEntry::Error, theme_map, enable_colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;

    #[test]
    fn plain_messages_have_no_escape_codes() -> io::Result<()> {
        let theme = ThemeStyle::default_theme_map();
        let mut out = Vec::new();
        print_warn_message(&mut out, "degraded", &theme, false)?;
        assert_eq!(String::from_utf8_lossy(&out), "[warn] degraded\n");
        Ok(())
    }
}
