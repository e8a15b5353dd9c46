// wordmask-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

use wordmask_core::config::{load_config_or_default, EngineConfig, DEFAULT_SCAN_TIMEOUT_MS};
use wordmask_core::{WordList, WordSource, WordmaskError};

#[test]
fn test_load_engine_config_from_yaml() -> Result<()> {
    let yaml_content = r#"
cache:
  ttl_minutes: 15
compiler:
  max_words: 1000
scan_timeout_ms: 500
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;

    let config = EngineConfig::load_from_file(file.path())?;
    assert_eq!(config.cache.ttl_minutes, 15);
    assert_eq!(config.compiler.max_words, 1000);
    assert_eq!(config.scan_timeout_ms, 500);
    Ok(())
}

#[test]
fn test_load_engine_config_from_json() -> Result<()> {
    let mut file = Builder::new().suffix(".json").tempfile()?;
    file.write_all(br#"{"cache": {"ttl_minutes": 60}}"#)?;

    let config = EngineConfig::load_from_file(file.path())?;
    assert_eq!(config.cache.ttl_minutes, 60);
    assert_eq!(config.scan_timeout_ms, DEFAULT_SCAN_TIMEOUT_MS);
    Ok(())
}

#[test]
fn test_invalid_ttl_is_rejected_on_load() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"cache:\n  ttl_minutes: 0\n")?;

    let err = EngineConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<WordmaskError>(),
        Some(WordmaskError::InvalidConfig(_))
    ));
    Ok(())
}

#[test]
fn test_explicit_config_path_wins() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"scan_timeout_ms: 42\n")?;
    let config = load_config_or_default(Some(file.path()))?;
    assert_eq!(config.scan_timeout_ms, 42);
    Ok(())
}

#[test]
fn test_missing_config_file_is_an_error() {
    let result = EngineConfig::load_from_file("/nonexistent/wordmask.yaml");
    assert!(result.is_err());
}

#[tokio::test]
async fn test_text_word_list() -> Result<()> {
    let mut file = Builder::new().suffix(".txt").tempfile()?;
    writeln!(file, "# sensitive words")?;
    writeln!(file, "Secret")?;
    writeln!(file)?;
    writeln!(file, "  token  ")?;

    let list = WordList::load_from_file(file.path())?;
    assert_eq!(list.active_count(), 2);
    assert_eq!(list.words[0].word, "Secret");
    assert_eq!(list.words[0].normalized_word, "secret");
    assert_eq!(list.words[1].word, "token");

    let source = list.into_source();
    assert_eq!(source.list_active_words().await?.len(), 2);
    Ok(())
}

#[test]
fn test_yaml_word_list_with_mixed_items() -> Result<()> {
    let yaml_content = r#"
words:
  - plain
  - word: Retired
    isActive: false
  - word: Straße
    normalizedWord: strasse
"#;
    let mut file = Builder::new().suffix(".yaml").tempfile()?;
    file.write_all(yaml_content.as_bytes())?;

    let list = WordList::load_from_file(file.path())?;
    assert_eq!(list.words.len(), 3);
    assert_eq!(list.active_count(), 2);
    assert!(!list.words[1].is_active);
    assert_eq!(list.words[1].normalized_word, "retired");
    assert_eq!(list.words[2].normalized_word, "strasse");
    Ok(())
}

#[test]
fn test_json_word_list() -> Result<()> {
    let mut file = Builder::new().suffix(".json").tempfile()?;
    file.write_all(br#"{"words": ["one", {"word": "Two", "isActive": true}]}"#)?;

    let list = WordList::load_from_file(file.path())?;
    let names: Vec<&str> = list.words.iter().map(|e| e.word.as_str()).collect();
    assert_eq!(names, vec!["one", "Two"]);
    assert_eq!(list.words[1].normalized_word, "two");
    Ok(())
}
