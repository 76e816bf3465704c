//! deshak - text editor core
//!
//! Two pieces do the real work:
//! - [`syntax`]: rule-based highlighting of a document block by block
//! - [`search`]: literal find with wraparound, replace, and replace-all
//!
//! A [`Document`] holds the text. Window chrome, dialogs and key handling
//! belong to whatever embeds this crate.
//!
//! ```
//! use deshak::{configure_rules, find_next, highlight_block, replace_all, StyleTag};
//!
//! let rules = configure_rules(["def", "return"]).unwrap();
//! let spans = highlight_block("def f(): # todo", &rules);
//! assert_eq!(spans[0].style, StyleTag::Keyword);
//!
//! assert_eq!(find_next("alpha beta alpha", "alpha", 12).map(|m| m.start), Some(0));
//! assert_eq!(replace_all("foo bar foo", "foo", "baz"), "baz bar baz");
//! ```

pub mod block;
pub mod config;
pub mod document;
pub mod error;
pub mod render;
pub mod search;
pub mod syntax;

pub use config::Config;
pub use document::{BlockChange, Document};
pub use error::{EditorError, Result};
pub use search::{
    find_next, find_previous, replace_all, replace_one, FindReplace, Finder, Match, Replaced,
    SearchOptions, SearchOutcome, SearchState,
};
pub use syntax::{HighlightCache, LanguageRegistry, RuleSet, StyleSpan, StyleTag};

/// Build the standard rule table for a keyword set
pub fn configure_rules<I, S>(keywords: I) -> Result<RuleSet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    RuleSet::build(keywords)
}

/// Highlight one block with `rules`
pub fn highlight_block(text: &str, rules: &RuleSet) -> Vec<StyleSpan> {
    syntax::highlight(text, rules)
}
