//! Document representation - blocks of text plus cursor and selection
//!
//! Offsets are absolute byte offsets into the text formed by joining the
//! blocks with `\n`. Every edit returns a [`BlockChange`] describing which
//! blocks were replaced, so a highlight cache can refresh just those.

use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::block::{ceil_char_boundary, split_blocks, Block};

/// Blocks `first..first + removed` were replaced by `inserted` new blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockChange {
    pub first: usize,
    pub removed: usize,
    pub inserted: usize,
}

/// An editable document
#[derive(Debug)]
pub struct Document {
    /// Blocks of text, never empty
    blocks: Vec<Block>,
    /// Document name (e.g., "main.py", "untitled")
    name: String,
    /// Associated file path
    path: Option<PathBuf>,
    /// Whether document has unsaved changes
    modified: bool,
    /// Cursor offset
    cursor: usize,
    /// Active selection, never empty
    selection: Option<Range<usize>>,
}

impl Document {
    /// Create a new empty document with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            blocks: vec![Block::new()],
            name: name.into(),
            path: None,
            modified: false,
            cursor: 0,
            selection: None,
        }
    }

    /// Create a document holding `text`
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        let mut doc = Self::new(name);
        doc.blocks = split_blocks(text);
        doc
    }

    /// Create a document from file contents
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string());
        let mut doc = Self::from_text(name, &content);
        doc.path = Some(path.to_path_buf());
        Ok(doc)
    }

    /// Get document name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get file path if set
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Check if document is modified
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Get number of blocks
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Get a block's text by index
    pub fn block(&self, idx: usize) -> Option<&str> {
        self.blocks.get(idx).map(Block::text)
    }

    /// Iterate block texts in order
    pub fn blocks(&self) -> impl Iterator<Item = &str> + '_ {
        self.blocks.iter().map(Block::text)
    }

    /// The full text, blocks joined with `\n`
    pub fn text(&self) -> String {
        self.blocks().collect::<Vec<_>>().join("\n")
    }

    /// Length of the full text in bytes
    pub fn len(&self) -> usize {
        self.blocks.iter().map(Block::len).sum::<usize>() + self.blocks.len() - 1
    }

    /// Check for an empty document
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the whole text; cursor returns to the start
    pub fn set_text(&mut self, text: &str) -> BlockChange {
        let removed = self.blocks.len();
        self.blocks = split_blocks(text);
        self.cursor = 0;
        self.selection = None;
        self.modified = true;
        BlockChange {
            first: 0,
            removed,
            inserted: self.blocks.len(),
        }
    }

    /// Map an offset to (block index, byte offset within block)
    fn locate(&self, offset: usize) -> Option<(usize, usize)> {
        let mut remaining = offset;
        for (idx, block) in self.blocks.iter().enumerate() {
            if remaining <= block.len() {
                return block.text().is_char_boundary(remaining).then_some((idx, remaining));
            }
            remaining -= block.len() + 1;
        }
        None
    }

    /// Check that `range` is ordered, in bounds and on char boundaries
    pub fn is_valid_range(&self, range: &Range<usize>) -> bool {
        range.start <= range.end && self.locate(range.start).is_some() && self.locate(range.end).is_some()
    }

    /// Replace `range` with `with`, leaving the cursor after the inserted text
    ///
    /// Returns `None` without editing if the range is invalid.
    pub fn replace_range(&mut self, range: Range<usize>, with: &str) -> Option<BlockChange> {
        if range.start > range.end {
            return None;
        }
        let (first, start_col) = self.locate(range.start)?;
        let (last, end_col) = self.locate(range.end)?;

        let mut joined = self.blocks[first].text()[..start_col].to_string();
        joined.push_str(with);
        joined.push_str(&self.blocks[last].text()[end_col..]);
        let replacement = split_blocks(&joined);
        let inserted = replacement.len();
        self.blocks.splice(first..=last, replacement);

        self.cursor = range.start + with.len();
        self.selection = None;
        self.modified = true;
        Some(BlockChange {
            first,
            removed: last - first + 1,
            inserted,
        })
    }

    /// Insert text at an offset
    pub fn insert_str(&mut self, offset: usize, text: &str) -> Option<BlockChange> {
        self.replace_range(offset..offset, text)
    }

    /// Cursor offset (the end of the selection when one is active)
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clearing any selection
    ///
    /// The offset is clamped to the text and moved forward off any
    /// partial character.
    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = ceil_char_boundary(&self.text(), offset);
        self.selection = None;
    }

    /// Active selection
    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    /// Select a range; the cursor moves to its end
    ///
    /// An empty range just places the cursor. Returns false without
    /// changing anything if the range is invalid.
    pub fn select(&mut self, range: Range<usize>) -> bool {
        if !self.is_valid_range(&range) {
            return false;
        }
        self.cursor = range.end;
        self.selection = (!range.is_empty()).then_some(range);
        true
    }

    /// Text under the selection
    pub fn selected_text(&self) -> Option<String> {
        let range = self.selection.clone()?;
        self.text().get(range).map(str::to_string)
    }

    /// 1-based (line, column) of the cursor, column counted in characters
    pub fn cursor_position(&self) -> (usize, usize) {
        self.position_of(self.cursor)
    }

    /// 1-based (line, column) of an offset
    pub fn position_of(&self, offset: usize) -> (usize, usize) {
        let mut remaining = offset;
        for (idx, block) in self.blocks.iter().enumerate() {
            if remaining <= block.len() {
                return (idx + 1, block.byte_to_char(remaining) + 1);
            }
            remaining -= block.len() + 1;
        }
        let last = self.blocks.len() - 1;
        (last + 1, self.blocks[last].byte_to_char(usize::MAX) + 1)
    }

    /// Whitespace-separated word count
    pub fn word_count(&self) -> usize {
        self.blocks().map(|b| b.split_whitespace().count()).sum()
    }

    /// Write document to its file path
    pub fn save(&mut self) -> std::io::Result<()> {
        let Some(path) = self.path.clone() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No filename set",
            ));
        };
        self.write_to(&path)?;
        self.modified = false;
        Ok(())
    }

    /// Write document to a specific path
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.text())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_round_trip() {
        let doc = Document::from_text("t", "one\ntwo\n\nfour");
        assert_eq!(doc.block_count(), 4);
        assert_eq!(doc.block(1), Some("two"));
        assert_eq!(doc.text(), "one\ntwo\n\nfour");
        assert_eq!(doc.len(), 13);
        assert!(Document::default().is_empty());
    }

    #[test]
    fn test_replace_within_block() {
        let mut doc = Document::from_text("t", "alpha\nbeta\ngamma");
        let change = doc.replace_range(6..10, "BETA!").unwrap();
        assert_eq!(change, BlockChange { first: 1, removed: 1, inserted: 1 });
        assert_eq!(doc.text(), "alpha\nBETA!\ngamma");
        assert_eq!(doc.cursor(), 11);
        assert!(doc.is_modified());
    }

    #[test]
    fn test_replace_across_blocks() {
        let mut doc = Document::from_text("t", "alpha\nbeta\ngamma");
        let change = doc.replace_range(3..13, "").unwrap();
        assert_eq!(change, BlockChange { first: 0, removed: 3, inserted: 1 });
        assert_eq!(doc.text(), "alpmma");
        assert_eq!(doc.block_count(), 1);
    }

    #[test]
    fn test_insert_newline_splits_block() {
        let mut doc = Document::from_text("t", "ab");
        let change = doc.insert_str(1, "\n").unwrap();
        assert_eq!(change, BlockChange { first: 0, removed: 1, inserted: 2 });
        assert_eq!(doc.block(0), Some("a"));
        assert_eq!(doc.block(1), Some("b"));
    }

    #[test]
    fn test_invalid_ranges_are_rejected() {
        let mut doc = Document::from_text("t", "héllo");
        assert!(doc.replace_range(2..3, "x").is_none()); // inside 'é'
        assert!(doc.replace_range(4..2, "x").is_none());
        assert!(doc.replace_range(0..99, "x").is_none());
        assert!(!doc.select(0..99));
        assert_eq!(doc.text(), "héllo");
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_selection() {
        let mut doc = Document::from_text("t", "foo bar");
        assert!(doc.select(4..7));
        assert_eq!(doc.selection(), Some(4..7));
        assert_eq!(doc.cursor(), 7);
        assert_eq!(doc.selected_text().as_deref(), Some("bar"));

        assert!(doc.select(2..2));
        assert_eq!(doc.selection(), None);
        assert_eq!(doc.cursor(), 2);
    }

    #[test]
    fn test_set_cursor_clamps() {
        let mut doc = Document::from_text("t", "a😀");
        doc.set_cursor(2);
        assert_eq!(doc.cursor(), 5);
        doc.set_cursor(100);
        assert_eq!(doc.cursor(), 5);
    }

    #[test]
    fn test_set_text_resets_cursor() {
        let mut doc = Document::from_text("t", "x\ny");
        doc.set_cursor(3);
        let change = doc.set_text("a\nb\nc");
        assert_eq!(change, BlockChange { first: 0, removed: 2, inserted: 3 });
        assert_eq!(doc.cursor(), 0);
    }

    #[test]
    fn test_status() {
        let mut doc = Document::from_text("t", "def f():\n    return 1 # done");
        doc.set_cursor(13);
        assert_eq!(doc.cursor_position(), (2, 5));
        assert_eq!(doc.position_of(0), (1, 1));
        assert_eq!(doc.word_count(), 6);
    }
}
