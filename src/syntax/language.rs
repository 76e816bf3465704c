//! Language definitions for syntax highlighting
//!
//! A language is a keyword set plus optional extra patterns. Its rule
//! table is compiled once and shared by every document in that language.

use super::rules::{RuleSet, RuleSetBuilder};
use super::tags::StyleTag;
use crate::error::Result;

/// An extra pattern rule placed between the keywords and the
/// string/comment rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraPattern {
    pub name: String,
    pub pattern: String,
    pub style: StyleTag,
}

/// A complete language definition for syntax highlighting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageDefinition {
    /// Language name (e.g., "Python")
    pub name: String,
    /// File extensions without the dot
    pub extensions: Vec<String>,
    /// Reserved words
    pub keywords: Vec<String>,
    /// Additional patterns
    pub patterns: Vec<ExtraPattern>,
}

impl LanguageDefinition {
    /// Create a new empty language definition
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            extensions: Vec::new(),
            keywords: Vec::new(),
            patterns: Vec::new(),
        }
    }

    /// Builder: add a file extension
    pub fn with_extension(mut self, ext: &str) -> Self {
        self.extensions.push(ext.to_string());
        self
    }

    /// Builder: add keywords
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Builder: add an extra pattern
    pub fn with_pattern(mut self, name: &str, pattern: &str, style: StyleTag) -> Self {
        self.patterns.push(ExtraPattern {
            name: name.to_string(),
            pattern: pattern.to_string(),
            style,
        });
        self
    }

    /// Compile this language's rule table
    ///
    /// Without extra patterns this is exactly [`RuleSet::build`] over the
    /// keywords.
    pub fn rule_set(&self) -> Result<RuleSet> {
        if self.patterns.is_empty() {
            return RuleSet::build(&self.keywords);
        }
        let mut builder = RuleSetBuilder::new().keywords(&self.keywords)?;
        for extra in &self.patterns {
            builder = builder.pattern(&extra.name, &extra.pattern, extra.style)?;
        }
        Ok(builder.literals_and_comments()?.finish())
    }
}

/// Python reserved words
pub const PYTHON_KEYWORDS: &[&str] = &[
    "and", "as", "assert", "break", "class", "continue", "def", "del", "elif", "else", "except",
    "False", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda", "None",
    "nonlocal", "not", "or", "pass", "raise", "return", "True", "try", "while", "with", "yield",
];

/// Create Python language definition
pub fn python_language() -> LanguageDefinition {
    LanguageDefinition::new("Python")
        .with_extension("py")
        .with_extension("pyw")
        .with_extension("pyi")
        .with_keywords(PYTHON_KEYWORDS.iter().copied())
}

/// Get all built-in language definitions
pub fn builtin_languages() -> Vec<LanguageDefinition> {
    vec![python_language()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditorError;
    use crate::syntax::highlighter::style_at;

    #[test]
    fn test_python_rule_set() {
        let rules = python_language().rule_set().unwrap();
        assert_eq!(rules.len(), PYTHON_KEYWORDS.len() + 3);
        assert_eq!(style_at("return None", &rules, 8), Some(StyleTag::Keyword));
    }

    #[test]
    fn test_extra_pattern_precedes_literals() {
        let lang = LanguageDefinition::new("Conf")
            .with_keywords(["on"])
            .with_pattern("number", r"\b\d+\b", StyleTag::Number);
        let rules = lang.rule_set().unwrap();
        assert_eq!(style_at("port = 80", &rules, 7), Some(StyleTag::Number));
        assert_eq!(style_at("x = '80'", &rules, 5), Some(StyleTag::String));
        assert_eq!(style_at("# 80", &rules, 2), Some(StyleTag::Comment));
    }

    #[test]
    fn test_malformed_extra_pattern() {
        let lang = LanguageDefinition::new("Bad").with_pattern("oops", "[", StyleTag::Number);
        assert!(matches!(lang.rule_set(), Err(EditorError::MalformedRule { rule, .. }) if rule == "oops"));
    }
}
