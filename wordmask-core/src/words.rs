//! Word entries and the contract with the external word store.
//!
//! The engine never owns the word list. It asks a [`WordSource`] for the full
//! active set whenever it builds a matcher and works on that snapshot.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// A single sensitive word as seen by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub word: String,
    /// Case-folded form used when matching is case-insensitive.
    /// Falls back to the lowercase of `word` when left empty.
    #[serde(default)]
    pub normalized_word: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl WordEntry {
    /// An active entry whose normalized form is the lowercase of `word`.
    pub fn new(word: impl Into<String>) -> Self {
        let word = word.into();
        Self {
            normalized_word: word.to_lowercase(),
            word,
            is_active: true,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// The form of the word that takes part in matching for the given mode.
    pub fn matching_form(&self, case_sensitive: bool) -> String {
        if case_sensitive {
            self.word.clone()
        } else if self.normalized_word.trim().is_empty() {
            self.word.to_lowercase()
        } else {
            self.normalized_word.clone()
        }
    }
}

/// Selects the words a matcher is built from: active entries only, in their
/// raw or normalized form, blanks dropped, exact duplicates removed, longest
/// (by `char` count) first. Ties keep snapshot order.
pub fn select_words(entries: &[WordEntry], case_sensitive: bool) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut words: Vec<String> = entries
        .iter()
        .filter(|e| e.is_active)
        .map(|e| e.matching_form(case_sensitive))
        .filter(|w| !w.trim().is_empty())
        .filter(|w| seen.insert(w.clone()))
        .collect();

    words.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    words
}

/// The word-store collaborator.
#[async_trait]
pub trait WordSource: Send + Sync {
    /// The complete set of active words. No paging.
    async fn list_active_words(&self) -> Result<Vec<WordEntry>>;
}

/// An in-memory word source holding a replaceable snapshot.
///
/// Replacing the snapshot does not touch any cache; whoever mutates the list
/// is responsible for calling the engine's `invalidate`.
#[derive(Debug, Default)]
pub struct StaticWordSource {
    words: RwLock<Arc<Vec<WordEntry>>>,
}

impl StaticWordSource {
    pub fn new(words: Vec<WordEntry>) -> Self {
        Self { words: RwLock::new(Arc::new(words)) }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(words.into_iter().map(WordEntry::new).collect())
    }

    pub fn replace(&self, words: Vec<WordEntry>) {
        let mut guard = self.words.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(words);
    }

    pub fn snapshot(&self) -> Arc<Vec<WordEntry>> {
        Arc::clone(&self.words.read().unwrap_or_else(PoisonError::into_inner))
    }
}

#[async_trait]
impl WordSource for StaticWordSource {
    async fn list_active_words(&self) -> Result<Vec<WordEntry>> {
        Ok(self.snapshot().iter().filter(|e| e.is_active).cloned().collect())
    }
}

/// One item of a word-list file: either a bare word or a full entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum WordListItem {
    Plain(String),
    Entry(WordEntry),
}

impl WordListItem {
    fn into_entry(self) -> WordEntry {
        match self {
            WordListItem::Plain(word) => WordEntry::new(word),
            WordListItem::Entry(mut entry) => {
                if entry.normalized_word.trim().is_empty() {
                    entry.normalized_word = entry.word.to_lowercase();
                }
                entry
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct WordListFile {
    #[serde(default)]
    words: Vec<WordListItem>,
}

/// A word list loaded from disk.
///
/// Supported formats, chosen by extension: `.txt` (one word per line, `#`
/// starts a comment), `.json` and YAML (a top-level `words:` list whose items
/// are strings or `{ word, normalizedWord, isActive }` maps).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    pub words: Vec<WordEntry>,
}

impl WordList {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading word list from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let words = match extension.as_deref() {
            Some("txt") => Self::parse_lines(&text),
            Some("json") => {
                let file: WordListFile = serde_json::from_str(&text)
                    .with_context(|| format!("Failed to parse word list {}", path.display()))?;
                file.words.into_iter().map(WordListItem::into_entry).collect()
            }
            _ => {
                let file: WordListFile = serde_yml::from_str(&text)
                    .with_context(|| format!("Failed to parse word list {}", path.display()))?;
                file.words.into_iter().map(WordListItem::into_entry).collect()
            }
        };

        let list = WordList { words };
        debug!("Loaded {} word entries ({} active).", list.words.len(), list.active_count());
        Ok(list)
    }

    fn parse_lines(text: &str) -> Vec<WordEntry> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(WordEntry::new)
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.words.iter().filter(|e| e.is_active).count()
    }

    pub fn into_source(self) -> StaticWordSource {
        StaticWordSource::new(self.words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_words_filters_dedups_and_orders() {
        let entries = vec![
            WordEntry::new("cat"),
            WordEntry::new("category"),
            WordEntry::new("   "),
            WordEntry::new("Cat"),
            WordEntry::new("dog").inactive(),
            WordEntry::new("cow"),
        ];

        let insensitive = select_words(&entries, false);
        assert_eq!(insensitive, vec!["category", "cat", "cow"]);

        let sensitive = select_words(&entries, true);
        assert_eq!(sensitive, vec!["category", "cat", "Cat", "cow"]);
    }

    #[test]
    fn test_matching_form_falls_back_to_lowercase() {
        let entry = WordEntry {
            word: "Secret".into(),
            normalized_word: String::new(),
            is_active: true,
        };
        assert_eq!(entry.matching_form(false), "secret");
        assert_eq!(entry.matching_form(true), "Secret");
    }

    #[test]
    fn test_parse_lines_skips_comments_and_blanks() {
        let words = WordList::parse_lines("# header\nalpha\n\n  beta  \n#gamma\n");
        let names: Vec<&str> = words.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[tokio::test]
    async fn test_static_source_lists_only_active_words() -> Result<()> {
        let source = StaticWordSource::new(vec![
            WordEntry::new("one"),
            WordEntry::new("two").inactive(),
        ]);
        let words = source.list_active_words().await?;
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "one");

        source.replace(vec![WordEntry::new("three")]);
        assert_eq!(source.list_active_words().await?[0].word, "three");
        Ok(())
    }
}
