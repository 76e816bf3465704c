//! Configuration file support
//!
//! Loads settings from ~/.deshak.toml (or %USERPROFILE%\.deshak.toml on Windows)
//!
//! Example:
//! ```toml
//! [search]
//! case_sensitive = true
//! wrap = true
//!
//! [highlight]
//! enabled = true
//!
//! [[language]]
//! name = "Conf"
//! extensions = ["conf"]
//! keywords = ["on", "off"]
//! patterns = [{ name = "number", pattern = '\b\d+\b', style = "Number" }]
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{EditorError, Result};
use crate::search::SearchOptions;
use crate::syntax::{LanguageDefinition, StyleTag};

/// Configuration settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Find/replace behavior
    pub search: SearchOptions,
    /// Highlighting switches
    pub highlight: HighlightSettings,
    /// User-defined languages
    #[serde(rename = "language")]
    pub languages: Vec<LanguageConfig>,
}

/// Highlighting switches
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HighlightSettings {
    pub enabled: bool,
}

impl Default for HighlightSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// A language declared in the config file
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageConfig {
    pub name: String,
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub patterns: Vec<PatternConfig>,
}

/// An extra highlighting pattern declared in the config file
#[derive(Debug, Clone, Deserialize)]
pub struct PatternConfig {
    pub name: String,
    pub pattern: String,
    pub style: String,
}

impl LanguageConfig {
    /// Convert into a definition the registry can compile
    pub fn to_definition(&self) -> Result<LanguageDefinition> {
        let mut lang = LanguageDefinition::new(&self.name)
            .with_keywords(self.keywords.iter().cloned());
        for ext in &self.extensions {
            lang = lang.with_extension(ext.trim_start_matches('.'));
        }
        for pattern in &self.patterns {
            let style = StyleTag::from_name(&pattern.style)
                .ok_or_else(|| EditorError::UnknownStyle(pattern.style.clone()))?;
            lang = lang.with_pattern(&pattern.name, &pattern.pattern, style);
        }
        Ok(lang)
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".deshak.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".deshak.toml"))
        }
    }

    /// Load configuration from the default path
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(err.into()),
        };
        Self::parse(&contents).map_err(|source| EditorError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
[search]
case_sensitive = true

[highlight]
enabled = false

[[language]]
name = "Conf"
extensions = [".conf", "cfg"]
keywords = ["on", "off"]
patterns = [{ name = "number", pattern = '\b\d+\b', style = "Number" }]
        "#;

        let config = Config::parse(contents).unwrap();
        assert!(config.search.case_sensitive);
        assert!(config.search.wrap);
        assert!(!config.highlight.enabled);
        assert_eq!(config.languages.len(), 1);

        let lang = config.languages[0].to_definition().unwrap();
        assert_eq!(lang.extensions, vec!["conf", "cfg"]);
        assert_eq!(lang.keywords, vec!["on", "off"]);
        assert_eq!(lang.patterns[0].style, StyleTag::Number);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::parse("").unwrap();
        assert!(!config.search.case_sensitive);
        assert!(config.search.wrap);
        assert!(config.highlight.enabled);
        assert!(config.languages.is_empty());
    }

    #[test]
    fn test_malformed_config() {
        assert!(Config::parse("[search]\nwrap = \"sometimes\"").is_err());
        assert!(Config::parse("[[language]]\nkeywords = []").is_err());
    }

    #[test]
    fn test_unknown_style() {
        let config = Config::parse(
            "[[language]]\nname = \"X\"\npatterns = [{ name = \"n\", pattern = \"x\", style = \"Bold\" }]",
        )
        .unwrap();
        assert!(matches!(
            config.languages[0].to_definition(),
            Err(EditorError::UnknownStyle(style)) if style == "Bold"
        ));
    }

    #[test]
    fn test_missing_file() {
        let config = Config::load_from(Path::new("/nonexistent/deshak.toml")).unwrap();
        assert!(config.highlight.enabled);
    }
}
