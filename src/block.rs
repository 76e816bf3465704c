//! Block representation and UTF-8 offset helpers

/// A single block (line) of text in a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    /// The text content (without trailing newline)
    text: String,
}

impl Block {
    /// Create a new empty block
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the block is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get the character index for a given byte position
    pub fn byte_to_char(&self, byte_pos: usize) -> usize {
        let end = floor_char_boundary(&self.text, byte_pos);
        self.text[..end].chars().count()
    }
}

impl From<&str> for Block {
    fn from(s: &str) -> Self {
        Self { text: s.to_string() }
    }
}

impl From<String> for Block {
    fn from(text: String) -> Self {
        Self { text }
    }
}

/// Find the nearest valid UTF-8 char boundary at or before `pos`
pub fn floor_char_boundary(text: &str, pos: usize) -> usize {
    if pos >= text.len() {
        return text.len();
    }
    let mut p = pos;
    while p > 0 && !text.is_char_boundary(p) {
        p -= 1;
    }
    p
}

/// Find the nearest valid UTF-8 char boundary at or after `pos`
///
/// Positions past the end clamp to the text length.
pub fn ceil_char_boundary(text: &str, pos: usize) -> usize {
    if pos >= text.len() {
        return text.len();
    }
    let mut p = pos;
    while p < text.len() && !text.is_char_boundary(p) {
        p += 1;
    }
    p
}

/// Split text into blocks at `\n`
///
/// Always yields at least one block; a trailing newline yields a final
/// empty block.
pub fn split_blocks(text: &str) -> Vec<Block> {
    text.split('\n').map(Block::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_block() {
        let block = Block::from("Hello");
        assert_eq!(block.text(), "Hello");
        assert_eq!(block.len(), 5);
        assert!(!block.is_empty());
        assert!(Block::new().is_empty());
    }

    #[test]
    fn test_byte_to_char() {
        let block = Block::from("café!");
        assert_eq!(block.byte_to_char(3), 3);
        assert_eq!(block.byte_to_char(5), 4);
        // inside 'é' rounds down
        assert_eq!(block.byte_to_char(4), 3);
        assert_eq!(block.byte_to_char(100), 5);
    }

    #[test]
    fn test_char_boundaries() {
        let text = "a😀b"; // emoji is 4 bytes
        assert_eq!(ceil_char_boundary(text, 2), 5);
        assert_eq!(floor_char_boundary(text, 2), 1);
        assert_eq!(ceil_char_boundary(text, 1), 1);
        assert_eq!(ceil_char_boundary(text, 99), 6);
        assert_eq!(floor_char_boundary(text, 99), 6);
    }

    #[test]
    fn test_split_blocks() {
        let blocks = split_blocks("one\ntwo\n");
        assert_eq!(blocks, vec![Block::from("one"), Block::from("two"), Block::new()]);
        assert_eq!(split_blocks(""), vec![Block::new()]);
    }
}
