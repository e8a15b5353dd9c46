//! Configuration management for `wordmask-core`.
//!
//! This module defines the engine configuration: cache lifetime, compiler
//! limits and the per-scan time budget. Configuration is read from YAML (or
//! JSON, chosen by file extension) and validated before an engine is built.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::WordmaskError;

pub const DEFAULT_CACHE_TTL_MINUTES: u64 = 5;
pub const MAX_CACHE_TTL_MINUTES: u64 = 1440;
pub const DEFAULT_MAX_WORDS: usize = 50_000;
/// Maximum combined length of the escaped alternation handed to the regex builder.
pub const DEFAULT_MAX_PATTERN_BYTES: usize = 4 * (1 << 20);
/// Compiled program and lazy DFA size limit for the regex builder.
pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);
pub const DEFAULT_SCAN_TIMEOUT_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Lifetime of an installed matcher, in minutes (1..=1440).
    pub ttl_minutes: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_minutes: DEFAULT_CACHE_TTL_MINUTES }
    }
}

/// Limits past which the primary compiler refuses a word set and the engine
/// degrades to the automaton.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub max_words: usize,
    pub max_pattern_bytes: usize,
    pub size_limit_bytes: usize,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            max_words: DEFAULT_MAX_WORDS,
            max_pattern_bytes: DEFAULT_MAX_PATTERN_BYTES,
            size_limit_bytes: DEFAULT_REGEX_SIZE_LIMIT,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    pub cache: CacheConfig,
    pub compiler: CompilerConfig,
    /// Time budget for scanning one text, in milliseconds.
    pub scan_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            compiler: CompilerConfig::default(),
            scan_timeout_ms: DEFAULT_SCAN_TIMEOUT_MS,
        }
    }
}

impl EngineConfig {
    /// Loads and validates a configuration file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading engine configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config: EngineConfig = if is_json {
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        } else {
            serde_yml::from_str(&text)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        };

        config.validate()?;
        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), WordmaskError> {
        let mut errors = Vec::new();

        if self.cache.ttl_minutes == 0 || self.cache.ttl_minutes > MAX_CACHE_TTL_MINUTES {
            errors.push(format!(
                "cache.ttl_minutes must be between 1 and {} minutes.",
                MAX_CACHE_TTL_MINUTES
            ));
        }
        if self.compiler.max_words == 0 {
            errors.push("compiler.max_words must be greater than 0.".to_string());
        }
        if self.compiler.max_pattern_bytes == 0 {
            errors.push("compiler.max_pattern_bytes must be greater than 0.".to_string());
        }
        if self.compiler.size_limit_bytes == 0 {
            errors.push("compiler.size_limit_bytes must be greater than 0.".to_string());
        }
        if self.scan_timeout_ms == 0 {
            errors.push("scan_timeout_ms must be greater than 0.".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(WordmaskError::InvalidConfig(errors.join(" ")))
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_minutes * 60)
    }

    pub fn scan_timeout(&self) -> Duration {
        Duration::from_millis(self.scan_timeout_ms)
    }
}

/// Locations searched for a configuration file when none is given explicitly.
pub fn config_candidate_paths() -> Vec<PathBuf> {
    let base_dirs = vec![
        dirs::config_dir().map(|p| p.join("wordmask")),
        dirs::home_dir().map(|p| p.join(".wordmask")),
        Some(PathBuf::from("./config")),
    ];

    base_dirs
        .into_iter()
        .flatten()
        .map(|dir| dir.join("wordmask.yaml"))
        .collect()
}

/// Loads `explicit` if given, otherwise the first existing candidate path,
/// otherwise the defaults.
pub fn load_config_or_default(explicit: Option<&Path>) -> Result<EngineConfig> {
    if let Some(path) = explicit {
        return EngineConfig::load_from_file(path);
    }
    match config_candidate_paths().into_iter().find(|p| p.is_file()) {
        Some(path) => EngineConfig::load_from_file(path),
        None => {
            debug!("No configuration file found; using defaults.");
            Ok(EngineConfig::default())
        }
    }
}
