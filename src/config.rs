// src/config.rs

//! Runtime configuration for the terminal engine.
//!
//! The `Config` is owned by whoever constructs the `Terminal` and passed down
//! by reference; there is deliberately no process-wide configuration static.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunable behavior of the terminal core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial grid width in columns.
    pub columns: usize,
    /// Initial grid height in rows.
    pub rows: usize,
    /// Maximum number of rows retained in the scrollback ring.
    pub scrollback_lines: usize,
    /// Interval between default tab stops.
    pub tabspaces: usize,
    /// Characters (besides space and empty cells) treated as word
    /// boundaries by word-snap selection.
    pub word_delimiters: String,
    /// Whether entering or leaving the alternate screen clears an active
    /// selection. The reference behavior keeps the selection.
    pub clear_selection_on_alt_screen: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            columns: 80,
            rows: 24,
            scrollback_lines: 1000,
            tabspaces: 8,
            word_delimiters: " \t'\"`()[]{}<>,;:|".to_string(),
            clear_selection_on_alt_screen: false,
        }
    }
}

impl Config {
    /// Loads a configuration from a JSON file, falling back to defaults for
    /// absent fields.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&data)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    /// True if `ch` delimits words for snap selection. Spaces and empty
    /// cells always do.
    #[must_use]
    pub fn is_word_delimiter(&self, ch: char) -> bool {
        ch == ' ' || ch == '\0' || self.word_delimiters.contains(ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let config = Config::default();
        assert_eq!(config.columns, 80);
        assert_eq!(config.rows, 24);
        assert!(config.scrollback_lines > 0);
        assert!(config.is_word_delimiter(' '));
        assert!(config.is_word_delimiter('\0'));
        assert!(!config.is_word_delimiter('a'));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"scrollback_lines": 50}"#).unwrap();
        assert_eq!(config.scrollback_lines, 50);
        assert_eq!(config.tabspaces, 8);
    }
}
