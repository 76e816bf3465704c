//! Style tags for syntax highlighting
//!
//! A tag names a lexical category. The highlighter never interprets it;
//! the rendering layer maps it to a [`Style`].

use super::style::Style;

/// Lexical categories a rule can assign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    /// Reserved words
    Keyword,
    /// Quoted literals
    String,
    /// Line comments
    Comment,
    /// Numeric literals
    Number,
    /// Plain text (no special treatment)
    Plain,
}

impl StyleTag {
    /// Get the default style for this tag
    pub fn default_style(&self) -> Style {
        match self {
            StyleTag::Keyword => Style::rgb(0x56, 0x9C, 0xD6).bold(),
            StyleTag::String => Style::rgb(0xD6, 0x9D, 0x85),
            StyleTag::Comment => Style::rgb(0x6A, 0x99, 0x55).italic(),
            StyleTag::Number => Style::rgb(0xB5, 0xCE, 0xA8),
            StyleTag::Plain => Style::default(),
        }
    }

    /// Get a human-readable name for this tag
    pub fn name(&self) -> &'static str {
        match self {
            StyleTag::Keyword => "Keyword",
            StyleTag::String => "String",
            StyleTag::Comment => "Comment",
            StyleTag::Number => "Number",
            StyleTag::Plain => "Plain",
        }
    }

    /// Parse a tag from its name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Keyword" => Some(StyleTag::Keyword),
            "String" => Some(StyleTag::String),
            "Comment" => Some(StyleTag::Comment),
            "Number" => Some(StyleTag::Number),
            "Plain" => Some(StyleTag::Plain),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_styles() {
        assert!(StyleTag::Keyword.default_style().bold);
        assert!(StyleTag::Comment.default_style().italic);
        assert!(!StyleTag::String.default_style().is_plain());
        assert!(StyleTag::Plain.default_style().is_plain());
    }

    #[test]
    fn test_from_name() {
        for tag in [StyleTag::Keyword, StyleTag::String, StyleTag::Comment, StyleTag::Plain] {
            assert_eq!(StyleTag::from_name(tag.name()), Some(tag));
        }
        assert_eq!(StyleTag::from_name("keyword"), None);
        assert_eq!(StyleTag::from_name(""), None);
    }
}
