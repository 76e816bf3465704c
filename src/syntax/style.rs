//! Style types for highlighted text
//!
//! The core only assigns [`StyleTag`]s; a [`Style`] is what a rendering
//! layer looks up for a tag.

use super::tags::StyleTag;

/// Foreground color of a style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Whatever the terminal or widget uses for plain text
    #[default]
    Default,
    Rgb(u8, u8, u8),
}

/// What a tag looks like on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Color,
    pub bold: bool,
    pub italic: bool,
}

impl Style {
    /// Plain-weight text in `r`, `g`, `b`
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            fg: Color::Rgb(r, g, b),
            bold: false,
            italic: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// True when nothing distinguishes this from unstyled text
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// A tagged range of bytes within one block
///
/// Spans borrow nothing from the block; they are recomputed whenever
/// the block's text changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSpan {
    /// Byte offset where this span starts
    pub start: usize,
    /// Length in bytes
    pub len: usize,
    /// Tag assigned by the rule that produced the span
    pub style: StyleTag,
}

impl StyleSpan {
    pub fn new(start: usize, len: usize, style: StyleTag) -> Self {
        Self { start, len, style }
    }

    /// Exclusive end offset
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Whether byte `pos` falls inside the span
    pub fn contains(&self, pos: usize) -> bool {
        (self.start..self.end()).contains(&pos)
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_default() {
        let style = Style::default();
        assert!(style.is_plain());
        assert_eq!(style.fg, Color::Default);
        assert!(!style.bold && !style.italic);
    }

    #[test]
    fn test_style_builders() {
        let style = Style::rgb(1, 2, 3).bold().italic();
        assert_eq!(style.fg, Color::Rgb(1, 2, 3));
        assert!(style.bold && style.italic);
        assert!(!style.is_plain());
    }

    #[test]
    fn test_span_contains() {
        let span = StyleSpan::new(5, 5, StyleTag::Keyword);
        assert_eq!(span.end(), 10);
        assert!(!span.contains(4));
        assert!(span.contains(5));
        assert!(span.contains(9));
        assert!(!span.contains(10));
        assert!(StyleSpan::new(3, 0, StyleTag::Plain).is_empty());
    }
}
