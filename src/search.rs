//! Search and replace
//!
//! All searches are literal. Finding ignores case unless asked not to;
//! replace-all always matches case exactly. A forward search that finds
//! nothing after the starting offset retries once from the start of the
//! text; a backward search retries once from the end. Neither loops
//! further.
//!
//! "Not found" and "empty query" are ordinary outcomes, never errors.

use std::ops::Range;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::block::ceil_char_boundary;
use crate::document::{BlockChange, Document};
use crate::error::{EditorError, Result};

/// Search behavior switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Exact case matching when finding; replace-all is always exact
    pub case_sensitive: bool,
    /// Retry from the other end of the text when nothing is found
    pub wrap: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            wrap: true,
        }
    }
}

/// Search direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

/// A match as a byte range of the searched text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub start: usize,
    pub end: usize,
}

impl Match {
    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check for a zero-length match
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// As a range, e.g. for selecting it
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

enum Matcher {
    Exact,
    IgnoreCase(Regex),
}

/// A compiled query
pub struct Finder {
    query: String,
    matcher: Matcher,
    options: SearchOptions,
}

impl Finder {
    /// Compile `query` with the given options
    pub fn new(query: &str, options: SearchOptions) -> Result<Self> {
        let matcher = if options.case_sensitive || query.is_empty() {
            Matcher::Exact
        } else {
            let regex = RegexBuilder::new(&regex::escape(query))
                .case_insensitive(true)
                .build()
                .map_err(EditorError::MalformedQuery)?;
            Matcher::IgnoreCase(regex)
        };
        Ok(Self {
            query: query.to_string(),
            matcher,
            options,
        })
    }

    /// Finder with default options
    ///
    /// A query too large to compile case-insensitively is matched exactly.
    pub fn with_defaults(query: &str) -> Self {
        let options = SearchOptions::default();
        Self::new(query, options).unwrap_or_else(|err| {
            warn!(%err, "falling back to case-sensitive search");
            Self {
                query: query.to_string(),
                matcher: Matcher::Exact,
                options,
            }
        })
    }

    /// The query text
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The options this finder was built with
    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// First match starting at or after `from`
    fn first_from(&self, text: &str, from: usize) -> Option<Match> {
        match &self.matcher {
            Matcher::Exact => text[from..].find(&self.query).map(|pos| Match {
                start: from + pos,
                end: from + pos + self.query.len(),
            }),
            Matcher::IgnoreCase(regex) => regex.find_at(text, from).map(|m| Match {
                start: m.start(),
                end: m.end(),
            }),
        }
    }

    /// All non-overlapping matches, left to right
    pub fn matches<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = Match> + 'a> {
        if self.query.is_empty() {
            return Box::new(std::iter::empty());
        }
        match &self.matcher {
            Matcher::Exact => Box::new(text.match_indices(self.query.as_str()).map(|(pos, m)| Match {
                start: pos,
                end: pos + m.len(),
            })),
            Matcher::IgnoreCase(regex) => Box::new(regex.find_iter(text).map(|m| Match {
                start: m.start(),
                end: m.end(),
            })),
        }
    }

    /// Number of non-overlapping matches
    pub fn count(&self, text: &str) -> usize {
        self.matches(text).count()
    }

    /// Number of non-overlapping exact-case matches, as replaced by
    /// [`Finder::replace_all`]
    pub fn count_exact(&self, text: &str) -> usize {
        if self.query.is_empty() {
            return 0;
        }
        text.matches(self.query.as_str()).count()
    }

    /// Next match at or after `from`, wrapping to the start of the text
    pub fn find_next(&self, text: &str, from: usize) -> Option<Match> {
        if self.query.is_empty() {
            return None;
        }
        let from = ceil_char_boundary(text, from);
        if let Some(found) = self.first_from(text, from) {
            return Some(found);
        }
        if !self.options.wrap || from == 0 {
            return None;
        }
        // everything at or after `from` was already scanned, so any hit
        // here starts before it
        self.first_from(text, 0)
    }

    /// Last match starting before `from`, wrapping to the end of the text
    pub fn find_previous(&self, text: &str, from: usize) -> Option<Match> {
        let from = ceil_char_boundary(text, from);
        let mut before = None;
        let mut last = None;
        for found in self.matches(text) {
            if found.start < from {
                before = Some(found);
            }
            last = Some(found);
        }
        before.or(if self.options.wrap { last } else { None })
    }

    /// Replace every non-overlapping exact occurrence, left to right
    ///
    /// Case is never ignored here, whatever the options say. An empty
    /// query leaves the text unchanged.
    pub fn replace_all(&self, text: &str, replacement: &str) -> String {
        if self.query.is_empty() {
            return text.to_string();
        }
        text.replace(&self.query, replacement)
    }

    /// Replace the selection, then find the next match after the insertion
    ///
    /// `selection` is taken as is: it is not checked against the query.
    /// An absent or empty selection skips the replacement and searches
    /// from its start (or from the start of the text when absent). An
    /// invalid selection is treated as absent.
    pub fn replace_one(
        &self,
        text: &str,
        selection: Option<Range<usize>>,
        replacement: &str,
    ) -> Replaced {
        let selection = selection.filter(|range| {
            let valid = is_valid_range(text, range);
            if !valid {
                warn!(?range, "ignoring invalid selection");
            }
            valid
        });
        match selection {
            Some(range) if !range.is_empty() => {
                let mut new_text = String::with_capacity(text.len() + replacement.len());
                new_text.push_str(&text[..range.start]);
                new_text.push_str(replacement);
                new_text.push_str(&text[range.end..]);
                let resume = range.start + replacement.len();
                let next = self.find_next(&new_text, resume);
                Replaced {
                    text: new_text,
                    replaced: Some(range.start..resume),
                    next,
                }
            }
            other => {
                let from = other.map_or(0, |range| range.start);
                Replaced {
                    text: text.to_string(),
                    replaced: None,
                    next: self.find_next(text, from),
                }
            }
        }
    }
}

fn is_valid_range(text: &str, range: &Range<usize>) -> bool {
    range.start <= range.end
        && range.end <= text.len()
        && text.is_char_boundary(range.start)
        && text.is_char_boundary(range.end)
}

/// Result of [`Finder::replace_one`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replaced {
    /// The text after replacement
    pub text: String,
    /// Where the replacement landed in the new text, if one was made
    pub replaced: Option<Range<usize>>,
    /// The next match in the new text
    pub next: Option<Match>,
}

/// Next occurrence of `query` at or after `from`, with wraparound
pub fn find_next(text: &str, query: &str, from: usize) -> Option<Match> {
    Finder::with_defaults(query).find_next(text, from)
}

/// Previous occurrence of `query` before `from`, with wraparound
pub fn find_previous(text: &str, query: &str, from: usize) -> Option<Match> {
    Finder::with_defaults(query).find_previous(text, from)
}

/// Replace the selection and advance to the next occurrence of `query`
pub fn replace_one(
    text: &str,
    selection: Option<Range<usize>>,
    replacement: &str,
    query: &str,
) -> Replaced {
    Finder::with_defaults(query).replace_one(text, selection, replacement)
}

/// Literal, case-sensitive replacement of every occurrence of `query`
pub fn replace_all(text: &str, query: &str, replacement: &str) -> String {
    Finder::with_defaults(query).replace_all(text, replacement)
}

/// Query and replacement for one find/replace session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub replacement: String,
}

impl SearchState {
    pub fn new(query: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            replacement: replacement.into(),
        }
    }
}

/// Outcome of a find step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The match is now the document's selection
    Found(Match),
    /// No occurrence anywhere in the searched range
    NotFound,
    /// Nothing to search for
    EmptyQuery,
}

/// Outcome of a replace step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceStep {
    /// Blocks touched by the replacement, if one was made
    pub change: Option<BlockChange>,
    /// The find that followed
    pub outcome: SearchOutcome,
}

/// Outcome of a replace-all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceAllResult {
    pub count: usize,
    pub change: Option<BlockChange>,
}

/// Find/replace session driving a [`Document`]
///
/// Found matches become the document selection, so a following
/// [`FindReplace::replace_one`] replaces exactly what was found unless the
/// caller changed the selection in between.
pub struct FindReplace {
    state: SearchState,
    finder: Finder,
}

impl FindReplace {
    /// Start a session
    pub fn new(state: SearchState, options: SearchOptions) -> Result<Self> {
        let finder = Finder::new(&state.query, options)?;
        Ok(Self { state, finder })
    }

    /// Current query and replacement
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Change the query
    pub fn set_query(&mut self, query: &str) -> Result<()> {
        self.finder = Finder::new(query, self.finder.options())?;
        self.state.query = query.to_string();
        Ok(())
    }

    /// Change the replacement
    pub fn set_replacement(&mut self, replacement: &str) {
        self.state.replacement = replacement.to_string();
    }

    fn select(&self, doc: &mut Document, found: Option<Match>) -> SearchOutcome {
        match found {
            Some(m) => {
                doc.select(m.range());
                debug!(start = m.start, end = m.end, "match selected");
                SearchOutcome::Found(m)
            }
            None => {
                info!(query = %self.state.query, "nothing found");
                SearchOutcome::NotFound
            }
        }
    }

    /// Select the next match after the cursor
    pub fn find_next(&self, doc: &mut Document) -> SearchOutcome {
        if self.state.query.is_empty() {
            return SearchOutcome::EmptyQuery;
        }
        let found = self.finder.find_next(&doc.text(), doc.cursor());
        self.select(doc, found)
    }

    /// Select the previous match before the selection or cursor
    pub fn find_previous(&self, doc: &mut Document) -> SearchOutcome {
        if self.state.query.is_empty() {
            return SearchOutcome::EmptyQuery;
        }
        let from = doc.selection().map_or(doc.cursor(), |range| range.start);
        let found = self.finder.find_previous(&doc.text(), from);
        self.select(doc, found)
    }

    /// Find in either direction
    pub fn find(&self, doc: &mut Document, direction: SearchDirection) -> SearchOutcome {
        match direction {
            SearchDirection::Forward => self.find_next(doc),
            SearchDirection::Backward => self.find_previous(doc),
        }
    }

    /// Replace the current selection, then select the next match
    pub fn replace_one(&self, doc: &mut Document) -> ReplaceStep {
        let change = doc
            .selection()
            .and_then(|range| doc.replace_range(range, &self.state.replacement));
        ReplaceStep {
            change,
            outcome: self.find_next(doc),
        }
    }

    /// Replace every match in the document
    pub fn replace_all(&self, doc: &mut Document) -> ReplaceAllResult {
        let text = doc.text();
        let count = self.finder.count_exact(&text);
        if count == 0 {
            return ReplaceAllResult { count, change: None };
        }
        let new_text = self.finder.replace_all(&text, &self.state.replacement);
        let change = doc.set_text(&new_text);
        info!(count, "replaced all occurrences");
        ReplaceAllResult {
            count,
            change: Some(change),
        }
    }
}
