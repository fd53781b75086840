// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rules file parsing and validation.
//!
//! Handles acstream.toml parsing with version validation and unknown key
//! warnings, and turns the configured rules into a finalized [`Trie`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::pattern::{Pattern, PatternId, parse_pattern_list};
use crate::replace::{DEFAULT_BUFFER_CAPACITY, Mode};
use crate::trie::Trie;

/// The only rules file version this build understands.
pub const SUPPORTED_VERSION: i64 = 1;

/// Default number of bytes read per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Default word delimiter for `[[list]]` entries.
pub const DEFAULT_DELIMITER: &str = "|";

/// Parsed rules file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub version: i64,

    #[serde(default)]
    pub replace: ReplaceConfig,

    #[serde(default)]
    pub input: InputConfig,

    /// Individual `[[pattern]]` entries.
    #[serde(default)]
    pub pattern: Vec<PatternEntry>,

    /// Delimited `[[list]]` entries.
    #[serde(default)]
    pub list: Vec<ListEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            replace: ReplaceConfig::default(),
            input: InputConfig::default(),
            pattern: Vec::new(),
            list: Vec::new(),
        }
    }
}

/// `[replace]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplaceConfig {
    #[serde(default)]
    pub mode: Mode,

    /// Largest slice handed to the output at once.
    #[serde(default = "ReplaceConfig::default_buffer_size")]
    pub buffer_size: usize,
}

impl Default for ReplaceConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            buffer_size: Self::default_buffer_size(),
        }
    }
}

impl ReplaceConfig {
    pub(crate) fn default_buffer_size() -> usize {
        DEFAULT_BUFFER_CAPACITY
    }
}

/// `[input]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    #[serde(default = "InputConfig::default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            chunk_size: Self::default_chunk_size(),
        }
    }
}

impl InputConfig {
    pub(crate) fn default_chunk_size() -> usize {
        DEFAULT_CHUNK_SIZE
    }
}

/// One `[[pattern]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternEntry {
    pub search: String,

    /// Replacement text; an empty string deletes the match.
    #[serde(default)]
    pub replace: Option<String>,

    #[serde(default)]
    pub id: Option<PatternId>,
}

impl PatternEntry {
    pub fn to_pattern(&self) -> Pattern {
        let mut pattern = Pattern::new(self.search.as_str());
        if let Some(replace) = &self.replace {
            pattern = pattern.with_replacement(replace.as_str());
        }
        if let Some(id) = &self.id {
            pattern = pattern.with_id(id.clone());
        }
        pattern
    }
}

/// One `[[list]]` entry: several search words sharing one replacement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListEntry {
    pub words: String,

    #[serde(default = "ListEntry::default_delimiter")]
    pub delimiter: String,

    #[serde(default)]
    pub replace: Option<String>,
}

impl ListEntry {
    fn default_delimiter() -> String {
        DEFAULT_DELIMITER.to_string()
    }

    pub fn to_patterns(&self) -> Vec<Pattern> {
        parse_pattern_list(&self.words, &self.delimiter)
            .into_iter()
            .map(|word| match &self.replace {
                Some(replace) => Pattern::new(word).with_replacement(replace.as_str()),
                None => Pattern::new(word),
            })
            .collect()
    }
}

impl Config {
    /// All configured patterns: `[[pattern]]` entries first, then each
    /// `[[list]]` in file order.
    pub fn patterns(&self) -> Vec<Pattern> {
        self.pattern
            .iter()
            .map(PatternEntry::to_pattern)
            .chain(self.list.iter().flat_map(ListEntry::to_patterns))
            .collect()
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.input.chunk_size == 0 {
            return Err(config_error("input.chunk_size must be at least 1", path));
        }
        Ok(())
    }
}

/// Add `patterns` to a new trie and finalize it.
///
/// Rejections are reported with the 1-based position of the offending
/// pattern.
pub fn build_trie(patterns: Vec<Pattern>) -> Result<Trie> {
    if patterns.is_empty() {
        return Err(Error::Argument(
            "no patterns given (use -e, --list or a rules file)".to_string(),
        ));
    }

    let mut trie = Trie::new();
    for (i, pattern) in patterns.into_iter().enumerate() {
        trie.add(pattern).map_err(|source| Error::Pattern {
            index: i + 1,
            source,
        })?;
    }
    trie.finalize();
    Ok(trie)
}

/// Load the rules file, if any, and build the trie from its patterns
/// followed by `extra`.
pub fn load_rules(path: Option<&Path>, extra: Vec<Pattern>) -> Result<(Config, Trie)> {
    let config = match path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            load_with_warnings(path)?
        }
        None => {
            tracing::debug!("no config given, using defaults");
            Config::default()
        }
    };

    let mut patterns = config.patterns();
    patterns.extend(extra);
    let trie = build_trie(patterns)?;
    Ok((config, trie))
}

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: i64,

    #[serde(default)]
    replace: Option<toml::Table>,

    #[serde(default)]
    input: Option<toml::Table>,

    #[serde(default)]
    pattern: Vec<toml::Table>,

    #[serde(default)]
    list: Vec<toml::Table>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

const KNOWN_REPLACE_KEYS: &[&str] = &["mode", "buffer_size"];
const KNOWN_INPUT_KEYS: &[&str] = &["chunk_size"];
const KNOWN_PATTERN_KEYS: &[&str] = &["search", "replace", "id"];
const KNOWN_LIST_KEYS: &[&str] = &["words", "delimiter", "replace"];

/// Load and validate config from a file path.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Load config with warnings for unknown keys.
pub fn load_with_warnings(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_with_warnings(&content, path)
}

/// Parse config from string content (strict mode).
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let version_check: VersionOnly =
        toml::from_str(content).map_err(|e| config_error(e, path))?;

    let version = version_check
        .version
        .ok_or_else(|| config_error("missing required field: version", path))?;
    check_version(version, path)?;

    let config: Config = toml::from_str(content).map_err(|e| config_error(e, path))?;
    config.validate(path)?;
    Ok(config)
}

/// Parse config, warning on unknown keys instead of rejecting them.
pub fn parse_with_warnings(content: &str, path: &Path) -> Result<Config> {
    let flexible: FlexibleConfig = toml::from_str(content).map_err(|e| config_error(e, path))?;
    check_version(flexible.version, path)?;

    for key in flexible.unknown.keys() {
        warn_unknown_key(path, key);
    }

    let replace = match flexible.replace {
        Some(table) => section(table, KNOWN_REPLACE_KEYS, "replace", path)?,
        None => ReplaceConfig::default(),
    };
    let input = match flexible.input {
        Some(table) => section(table, KNOWN_INPUT_KEYS, "input", path)?,
        None => InputConfig::default(),
    };
    let pattern = flexible
        .pattern
        .into_iter()
        .map(|table| section(table, KNOWN_PATTERN_KEYS, "pattern", path))
        .collect::<Result<Vec<PatternEntry>>>()?;
    let list = flexible
        .list
        .into_iter()
        .map(|table| section(table, KNOWN_LIST_KEYS, "list", path))
        .collect::<Result<Vec<ListEntry>>>()?;

    let config = Config {
        version: flexible.version,
        replace,
        input,
        pattern,
        list,
    };
    config.validate(path)?;
    Ok(config)
}

fn check_version(version: i64, path: &Path) -> Result<()> {
    if version != SUPPORTED_VERSION {
        return Err(config_error(
            format!(
                "unsupported config version {} (supported: {})",
                version, SUPPORTED_VERSION
            ),
            path,
        ));
    }
    Ok(())
}

/// Drop unknown keys from `table` with a warning, then deserialize the rest.
fn section<T: DeserializeOwned>(
    table: toml::Table,
    known: &[&str],
    prefix: &str,
    path: &Path,
) -> Result<T> {
    let table: toml::Table = table
        .into_iter()
        .filter(|(key, _)| {
            let is_known = known.contains(&key.as_str());
            if !is_known {
                warn_unknown_key(path, &format!("{}.{}", prefix, key));
            }
            is_known
        })
        .collect();

    toml::Value::Table(table)
        .try_into()
        .map_err(|e| config_error(format!("{}: {}", prefix, e), path))
}

/// Warn about unknown configuration key.
fn warn_unknown_key(path: &Path, key: &str) {
    tracing::debug!(key, "ignoring unknown config key");
    eprintln!(
        "acstream: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

fn config_error(message: impl ToString, path: &Path) -> Error {
    Error::Config {
        message: message.to_string(),
        path: Some(path.to_path_buf()),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
