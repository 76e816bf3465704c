//! Pattern rules for syntax highlighting
//!
//! A [`RuleSet`] is an ordered list of [`StyleRule`]s. Order is an
//! overwrite priority: when two rules match the same bytes, the rule that
//! comes later wins.

use std::collections::BTreeSet;

use regex::Regex;
use tracing::debug;

use super::tags::StyleTag;
use crate::error::{EditorError, Result};

/// Line comment marker used by [`RuleSet::build`]
pub const COMMENT_MARKER: &str = "#";

/// A compiled matcher for one rule
#[derive(Debug, Clone)]
pub struct TextPattern {
    regex: Regex,
}

impl TextPattern {
    /// Match `literal` as a whole word
    ///
    /// Word boundaries are ASCII: a letter such as `é` next to the literal
    /// does not stop it from matching.
    pub fn word(literal: &str) -> Result<Self> {
        Self::compile(literal, &format!(r"(?-u:\b){}(?-u:\b)", regex::escape(literal)))
    }

    /// Match from `open` to the nearest following `close` on the same block
    ///
    /// Escaped delimiters are not recognised.
    pub fn delimited(open: &str, close: &str) -> Result<Self> {
        let pattern = format!("{}.*?{}", regex::escape(open), regex::escape(close));
        Self::compile(open, &pattern)
    }

    /// Match from `marker` to the end of the block
    pub fn to_end_of_block(marker: &str) -> Result<Self> {
        Self::compile(marker, &format!("{}.*", regex::escape(marker)))
    }

    fn compile(rule: &str, pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(|regex| Self { regex })
            .map_err(|source| EditorError::MalformedRule {
                rule: rule.to_string(),
                source,
            })
    }

    /// Iterate all non-overlapping matches, left to right, as byte ranges
    pub fn find_iter<'a>(&'a self, text: &'a str) -> impl Iterator<Item = (usize, usize)> + 'a {
        self.regex.find_iter(text).map(|m| (m.start(), m.end()))
    }
}

/// A single pattern rule
#[derive(Debug, Clone)]
pub struct StyleRule {
    /// Name for debugging
    pub name: String,
    /// Compiled pattern
    pub pattern: TextPattern,
    /// Tag assigned to matches
    pub style: StyleTag,
}

impl StyleRule {
    /// Create a new rule
    pub fn new(name: &str, pattern: TextPattern, style: StyleTag) -> Self {
        Self {
            name: name.to_string(),
            pattern,
            style,
        }
    }
}

/// An ordered, immutable rule table
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<StyleRule>,
}

impl RuleSet {
    /// Build the standard table for a keyword set
    ///
    /// Order: one rule per keyword, double-quoted strings, single-quoted
    /// strings, line comments. Keywords are applied in sorted order so the
    /// same set always yields the same table.
    pub fn build<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = RuleSetBuilder::new().keywords(keywords)?.literals_and_comments()?.finish();
        debug!(rules = rules.len(), "built rule table");
        Ok(rules)
    }

    /// Start an empty table
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::new()
    }

    /// Rules in application order
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check for an empty table
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Assembles a [`RuleSet`] rule by rule
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    rules: Vec<StyleRule>,
}

impl RuleSetBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule
    pub fn rule(mut self, rule: StyleRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append one word-boundary keyword rule per distinct keyword
    pub fn keywords<I, S>(mut self, keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unique: BTreeSet<String> = keywords
            .into_iter()
            .map(|kw| kw.as_ref().to_string())
            .filter(|kw| !kw.is_empty())
            .collect();
        for kw in unique {
            let pattern = TextPattern::word(&kw)?;
            self.rules.push(StyleRule::new(&kw, pattern, StyleTag::Keyword));
        }
        Ok(self)
    }

    /// Append a rule from a raw regular expression
    pub fn pattern(self, name: &str, pattern: &str, style: StyleTag) -> Result<Self> {
        let pattern = TextPattern::compile(name, pattern)?;
        Ok(self.rule(StyleRule::new(name, pattern, style)))
    }

    /// Append the string and comment rules, in that order
    pub fn literals_and_comments(self) -> Result<Self> {
        let double = TextPattern::delimited("\"", "\"")?;
        let single = TextPattern::delimited("'", "'")?;
        let comment = TextPattern::to_end_of_block(COMMENT_MARKER)?;
        Ok(self
            .rule(StyleRule::new("double_string", double, StyleTag::String))
            .rule(StyleRule::new("single_string", single, StyleTag::String))
            .rule(StyleRule::new("comment", comment, StyleTag::Comment)))
    }

    /// Freeze the table
    pub fn finish(self) -> RuleSet {
        RuleSet { rules: self.rules }
    }
}
