//! Block highlighting
//!
//! Each rule is run over the whole block and every match becomes a span.
//! Spans are returned in emission order; applying them in that order onto
//! the block gives the visible styling, with later rules overwriting
//! earlier ones.
//!
//! A block is highlighted in isolation. Strings or comments that would
//! continue into the next block are not matched at all.

use super::rules::RuleSet;
use super::style::StyleSpan;
use super::tags::StyleTag;

/// Highlight one block of text
pub fn highlight(block: &str, rules: &RuleSet) -> Vec<StyleSpan> {
    let mut spans = Vec::new();
    for rule in rules.rules() {
        for (start, end) in rule.pattern.find_iter(block) {
            if end > start {
                spans.push(StyleSpan::new(start, end - start, rule.style));
            }
        }
    }
    spans
}

/// Apply spans in order onto a per-byte style map
///
/// Spans reaching past the block are clipped to it.
pub fn resolve(block: &str, spans: &[StyleSpan]) -> Vec<Option<StyleTag>> {
    let mut styles = vec![None; block.len()];
    for span in spans {
        let start = span.start.min(styles.len());
        let end = span.end().min(styles.len());
        for slot in &mut styles[start..end] {
            *slot = Some(span.style);
        }
    }
    styles
}

/// The visible styling of a block as non-overlapping runs
///
/// Unstyled bytes are left out, so the runs may have gaps.
pub fn visible_runs(block: &str, rules: &RuleSet) -> Vec<StyleSpan> {
    collapse(block, &highlight(block, rules))
}

/// Resolve emitted spans and merge the result into runs
pub fn collapse(block: &str, spans: &[StyleSpan]) -> Vec<StyleSpan> {
    let styles = resolve(block, spans);
    let mut runs: Vec<StyleSpan> = Vec::new();
    for (pos, style) in styles.into_iter().enumerate() {
        let Some(style) = style else { continue };
        match runs.last_mut() {
            Some(run) if run.end() == pos && run.style == style => run.len += 1,
            _ => runs.push(StyleSpan::new(pos, 1, style)),
        }
    }
    runs
}

/// The tag visible at a byte offset, if any
pub fn style_at(block: &str, rules: &RuleSet, offset: usize) -> Option<StyleTag> {
    highlight(block, rules)
        .iter()
        .rev()
        .find(|span| span.contains(offset))
        .map(|span| span.style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::rules::{StyleRule, TextPattern};
    use pretty_assertions::assert_eq;

    fn python_rules() -> RuleSet {
        RuleSet::build(["def", "return", "if"]).unwrap()
    }

    #[test]
    fn test_keyword_and_comment() {
        let rules = RuleSet::builder()
            .rule(StyleRule::new("def", TextPattern::word("def").unwrap(), StyleTag::Keyword))
            .rule(StyleRule::new(
                "comment",
                TextPattern::to_end_of_block("#").unwrap(),
                StyleTag::Comment,
            ))
            .finish();
        let spans = highlight("def foo(): # start", &rules);
        assert_eq!(
            spans,
            vec![
                StyleSpan::new(0, 3, StyleTag::Keyword),
                StyleSpan::new(11, 7, StyleTag::Comment),
            ]
        );
    }

    #[test]
    fn test_comment_overwrites_string() {
        let rules = python_rules();
        let block = r#"# x = "y""#;
        let spans = highlight(block, &rules);
        // string span is emitted first, comment covers it afterwards
        assert_eq!(
            spans,
            vec![
                StyleSpan::new(6, 3, StyleTag::String),
                StyleSpan::new(0, 9, StyleTag::Comment),
            ]
        );
        let styles = resolve(block, &spans);
        assert!(styles.iter().all(|s| *s == Some(StyleTag::Comment)));
        assert_eq!(visible_runs(block, &rules), vec![StyleSpan::new(0, 9, StyleTag::Comment)]);
    }

    #[test]
    fn test_string_overwrites_keyword() {
        let rules = python_rules();
        let block = r#"x = "if" if y"#;
        assert_eq!(style_at(block, &rules, 5), Some(StyleTag::String));
        assert_eq!(style_at(block, &rules, 9), Some(StyleTag::Keyword));
        assert_eq!(style_at(block, &rules, 0), None);
    }

    #[test]
    fn test_later_rule_wins_regardless_of_table_contents() {
        // same two rules, opposite order
        let string = || TextPattern::delimited("\"", "\"").unwrap();
        let comment = || TextPattern::to_end_of_block("#").unwrap();
        let rules = RuleSet::builder()
            .rule(StyleRule::new("comment", comment(), StyleTag::Comment))
            .rule(StyleRule::new("string", string(), StyleTag::String))
            .finish();
        let block = r#"# x = "y""#;
        assert_eq!(style_at(block, &rules, 7), Some(StyleTag::String));
        assert_eq!(style_at(block, &rules, 2), Some(StyleTag::Comment));
    }

    #[test]
    fn test_every_match_is_found() {
        let rules = python_rules();
        let spans = highlight("if a: return 'x' if 'y' else 'z'", &rules);
        let keywords = spans.iter().filter(|s| s.style == StyleTag::Keyword).count();
        let strings = spans.iter().filter(|s| s.style == StyleTag::String).count();
        assert_eq!(keywords, 3);
        assert_eq!(strings, 3);
    }

    #[test]
    fn test_unterminated_constructs() {
        let rules = python_rules();
        let spans = highlight(r#"x = "open"#, &rules);
        assert!(spans.is_empty());
        assert!(highlight("", &rules).is_empty());
    }

    #[test]
    fn test_spans_stay_in_block() {
        let rules = python_rules();
        let blocks = ["def f(): return 'a' # tail", "'''", "\"\"", "#", "naïve 'é' # ü"];
        for block in blocks {
            for span in highlight(block, &rules) {
                assert!(span.end() <= block.len(), "{span:?} in {block:?}");
                assert!(block.is_char_boundary(span.start));
                assert!(block.is_char_boundary(span.end()));
            }
        }
    }

    #[test]
    fn test_highlight_is_deterministic() {
        let rules = python_rules();
        let block = "def f(x): return x # 'q'";
        assert_eq!(highlight(block, &rules), highlight(block, &rules));
    }

    #[test]
    fn test_resolve_clips() {
        let styles = resolve("abc", &[StyleSpan::new(1, 10, StyleTag::Number)]);
        assert_eq!(styles, vec![None, Some(StyleTag::Number), Some(StyleTag::Number)]);
    }
}
