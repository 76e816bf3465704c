//! Syntax highlighting
//!
//! Rule tables, block highlighting, and the per-document cache that
//! re-highlights blocks as they change.

mod highlighter;
mod language;
mod manager;
mod rules;
mod style;
mod tags;

pub use highlighter::{collapse, highlight, resolve, style_at, visible_runs};
pub use language::{builtin_languages, python_language, ExtraPattern, LanguageDefinition, PYTHON_KEYWORDS};
pub use manager::{HighlightCache, LanguageRegistry};
pub use rules::{RuleSet, RuleSetBuilder, StyleRule, TextPattern, COMMENT_MARKER};
pub use style::{Color, Style, StyleSpan};
pub use tags::StyleTag;
