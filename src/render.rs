//! Terminal output of highlighted documents using crossterm

use std::io::Write;

use crossterm::{
    queue,
    style::{Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetForegroundColor},
};

use crate::document::Document;
use crate::error::Result;
use crate::syntax::{collapse, Color, HighlightCache, Style, StyleSpan};

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Default => TermColor::Reset,
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
    }
}

/// Apply a style to subsequent output
fn apply_style(out: &mut impl Write, style: &Style) -> Result<()> {
    queue!(out, SetForegroundColor(term_color(style.fg)))?;
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    Ok(())
}

/// Reset all attributes
fn reset_attributes(out: &mut impl Write) -> Result<()> {
    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    Ok(())
}

/// Write one block, styling the visible runs of `spans`
pub fn render_block(out: &mut impl Write, text: &str, spans: &[StyleSpan]) -> Result<()> {
    let mut pos = 0;
    for run in collapse(text, spans) {
        // runs always start and end on char boundaries of `text`
        if run.start > pos {
            queue!(out, Print(&text[pos..run.start]))?;
        }
        apply_style(out, &run.style.default_style())?;
        queue!(out, Print(&text[run.start..run.end()]))?;
        reset_attributes(out)?;
        pos = run.end();
    }
    if pos < text.len() {
        queue!(out, Print(&text[pos..]))?;
    }
    Ok(())
}

/// Write a whole document, one block per line
pub fn render_document(out: &mut impl Write, doc: &Document, cache: &HighlightCache) -> Result<()> {
    for (idx, text) in doc.blocks().enumerate() {
        if idx > 0 {
            queue!(out, Print('\n'))?;
        }
        render_block(out, text, cache.spans(idx))?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{RuleSet, StyleTag};
    use std::sync::Arc;

    #[test]
    fn test_plain_block() {
        let mut out = Vec::new();
        render_block(&mut out, "plain text", &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "plain text");
    }

    #[test]
    fn test_styled_block_keeps_text() {
        let mut out = Vec::new();
        let spans = [StyleSpan::new(0, 3, StyleTag::Keyword)];
        render_block(&mut out, "def f", &spans).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("def"));
        assert!(rendered.ends_with(" f"));
        assert!(rendered.contains('\u{1b}'));
    }

    #[test]
    fn test_render_document() {
        let doc = Document::from_text("t.py", "x = 1\n# done");
        let mut cache = HighlightCache::new(Some(Arc::new(RuleSet::build(["x"]).unwrap())));
        cache.refresh(&doc);
        let mut out = Vec::new();
        render_document(&mut out, &doc, &cache).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains(" = 1\n"));
        assert!(rendered.contains("# done"));
    }
}
