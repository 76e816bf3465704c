//! Language registry and per-document highlight cache
//!
//! The registry maps file extensions to languages and holds one compiled
//! rule table per language. A [`HighlightCache`] keeps the spans of each
//! block of one document and recomputes only blocks whose text changed.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use super::highlighter::highlight;
use super::language::{builtin_languages, LanguageDefinition};
use super::rules::RuleSet;
use super::style::StyleSpan;
use crate::config::Config;
use crate::document::{BlockChange, Document};
use crate::error::{EditorError, Result};

/// Known languages and their compiled rule tables
pub struct LanguageRegistry {
    /// Language name -> compiled rules
    languages: HashMap<String, Arc<RuleSet>>,
    /// Extension to language name mapping
    extension_map: HashMap<String, String>,
    /// Whether syntax highlighting is enabled
    pub enabled: bool,
}

impl LanguageRegistry {
    /// Create a registry with built-in languages
    pub fn new() -> Self {
        let mut registry = Self {
            languages: HashMap::new(),
            extension_map: HashMap::new(),
            enabled: true,
        };
        for lang in builtin_languages() {
            registry.add_or_warn(lang);
        }
        registry
    }

    /// Built-in languages plus the ones declared in `config`
    ///
    /// A language whose rules do not compile is skipped with a warning.
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::new();
        registry.enabled = config.highlight.enabled;
        for lang in &config.languages {
            match lang.to_definition() {
                Ok(def) => registry.add_or_warn(def),
                Err(err) => warn!(language = %lang.name, %err, "highlighting disabled"),
            }
        }
        registry
    }

    fn add_or_warn(&mut self, lang: LanguageDefinition) {
        let name = lang.name.clone();
        if let Err(err) = self.add_language(lang) {
            warn!(language = %name, %err, "highlighting disabled");
        }
    }

    /// Compile and add a language definition
    ///
    /// A language with the same name is replaced.
    pub fn add_language(&mut self, lang: LanguageDefinition) -> Result<()> {
        let rules = lang.rule_set()?;
        for ext in &lang.extensions {
            self.extension_map.insert(ext.to_lowercase(), lang.name.clone());
        }
        debug!(language = %lang.name, rules = rules.len(), "language registered");
        self.languages.insert(lang.name, Arc::new(rules));
        Ok(())
    }

    /// Detect language from filename
    pub fn detect_language(&self, filename: &Path) -> Option<&str> {
        let ext = filename.extension()?.to_str()?.to_lowercase();
        self.extension_map.get(&ext).map(|s| s.as_str())
    }

    /// Get a language's rules by name
    pub fn rules(&self, name: &str) -> Result<Arc<RuleSet>> {
        self.languages
            .get(name)
            .cloned()
            .ok_or_else(|| EditorError::UnknownLanguage(name.to_string()))
    }

    /// Rules for a file, if highlighting is enabled and the language is known
    pub fn rules_for_path(&self, filename: &Path) -> Option<Arc<RuleSet>> {
        if !self.enabled {
            return None;
        }
        let name = self.detect_language(filename)?;
        self.languages.get(name).cloned()
    }

    /// List available languages
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.languages.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Cached spans for every block of one document
#[derive(Debug, Default)]
pub struct HighlightCache {
    /// Rules for the document's language (None if no highlighting)
    rules: Option<Arc<RuleSet>>,
    /// Spans per block (None = needs recomputation)
    blocks: Vec<Option<Vec<StyleSpan>>>,
}

impl HighlightCache {
    /// Create a cache for a document using `rules`
    pub fn new(rules: Option<Arc<RuleSet>>) -> Self {
        Self {
            rules,
            blocks: Vec::new(),
        }
    }

    /// Switch rules; everything is recomputed on the next refresh
    pub fn set_rules(&mut self, rules: Option<Arc<RuleSet>>) {
        self.rules = rules;
        self.invalidate_all();
    }

    /// Forget every cached block
    pub fn invalidate_all(&mut self) {
        self.blocks.clear();
    }

    /// Mark the blocks touched by an edit
    ///
    /// Blocks outside the change keep their spans; highlighting never
    /// looks at neighbouring blocks.
    pub fn apply(&mut self, change: BlockChange) {
        let start = change.first.min(self.blocks.len());
        let end = (change.first + change.removed).min(self.blocks.len());
        self.blocks
            .splice(start..end, std::iter::repeat(None).take(change.inserted));
    }

    /// Recompute stale blocks; returns how many were highlighted
    pub fn refresh(&mut self, doc: &Document) -> usize {
        if self.blocks.len() != doc.block_count() {
            debug!(
                cached = self.blocks.len(),
                blocks = doc.block_count(),
                "block count mismatch, rebuilding cache"
            );
            self.blocks = vec![None; doc.block_count()];
        }
        let Some(rules) = self.rules.as_deref() else {
            return 0;
        };
        let mut refreshed = 0;
        for (slot, text) in self.blocks.iter_mut().zip(doc.blocks()) {
            if slot.is_none() {
                *slot = Some(highlight(text, rules));
                refreshed += 1;
            }
        }
        debug!(refreshed, "highlight cache refreshed");
        refreshed
    }

    /// Cached spans of a block; empty if stale or unhighlighted
    pub fn spans(&self, block: usize) -> &[StyleSpan] {
        self.blocks
            .get(block)
            .and_then(|spans| spans.as_deref())
            .unwrap_or(&[])
    }

    /// Number of blocks awaiting recomputation
    pub fn stale_blocks(&self) -> usize {
        self.blocks.iter().filter(|spans| spans.is_none()).count()
    }
}
