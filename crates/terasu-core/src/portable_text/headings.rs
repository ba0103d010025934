//! Heading anchors and table-of-contents extraction.

use std::sync::LazyLock;

use regex::Regex;

use super::{Block, TextBlock};

static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s]").expect("non-word regex should compile"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex should compile"));

/// One table-of-contents entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Anchor id, shared with the rendered heading element.
    pub id: String,
    pub text: String,
    /// 1 through 4.
    pub level: u8,
}

/// Lowercases `text`, drops everything but ASCII word characters and
/// whitespace, and joins the remaining words with hyphens.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_WORD_RE.replace_all(&lowered, "");
    let ascii_ws: String = stripped
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    WHITESPACE_RE
        .replace_all(ascii_ws.trim(), "-")
        .into_owned()
}

/// Anchor id for a heading block: `heading-<key>-<slug>`.
///
/// `key` falls back to the style name when the block has no `_key`.
pub fn heading_id(block: &TextBlock) -> String {
    let key = block
        .key
        .as_deref()
        .filter(|k| !k.is_empty())
        .unwrap_or_else(|| block.style());
    let key: String = key
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    format!("heading-{key}-{}", slugify(&block.plain_text()))
}

/// Headings `h1`..`h4` in document order. Headings without text are skipped.
pub fn extract_headings(blocks: &[Block]) -> Vec<Heading> {
    blocks
        .iter()
        .filter_map(|block| {
            let Block::Text(text_block) = block else {
                return None;
            };
            let level = text_block.heading_level()?;
            let text = text_block.plain_text();
            if text.trim().is_empty() {
                return None;
            }
            Some(Heading {
                id: heading_id(text_block),
                text,
                level,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portable_text::Span;

    fn heading(key: Option<&str>, style: &str, text: &str) -> TextBlock {
        TextBlock {
            key: key.map(String::from),
            style: Some(style.to_string()),
            children: vec![Span {
                text: text.to_string(),
                marks: vec![],
            }],
            ..Default::default()
        }
    }

    fn is_anchor_safe(id: &str) -> bool {
        id.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }

    #[test]
    fn slugify_basics() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Rust   2024 edition "), "rust-2024-edition");
        assert_eq!(slugify("snake_case stays"), "snake_case-stays");
        assert_eq!(slugify("日本語の見出し"), "");
        assert_eq!(slugify("Rust と Go"), "rust-go");
    }

    #[test]
    fn heading_id_uses_key_and_slug() {
        let block = heading(Some("abc123"), "h2", "Getting Started");
        assert_eq!(heading_id(&block), "heading-abc123-getting-started");
    }

    #[test]
    fn heading_id_falls_back_to_style() {
        let block = heading(None, "h3", "Setup");
        assert_eq!(heading_id(&block), "heading-h3-setup");
    }

    #[test]
    fn heading_ids_differ_by_key() {
        let a = heading(Some("k1"), "h2", "まとめ");
        let b = heading(Some("k2"), "h2", "まとめ");
        assert_ne!(heading_id(&a), heading_id(&b));
    }

    #[test]
    fn heading_ids_are_deterministic_and_anchor_safe() {
        let block = heading(Some("k.1/x"), "h2", "Ünïcode — «quotes» & symbols");
        let first = heading_id(&block);
        assert_eq!(first, heading_id(&block));
        assert!(is_anchor_safe(&first), "unsafe id: {first}");
    }

    #[test]
    fn extract_skips_empty_and_non_headings() {
        let blocks = vec![
            Block::Text(heading(Some("a"), "h1", "Title")),
            Block::Text(heading(Some("b"), "normal", "Paragraph")),
            Block::Text(heading(Some("c"), "h2", "   ")),
            Block::Unknown,
            Block::Text(heading(Some("d"), "h4", "Deep")),
            Block::Text(heading(Some("e"), "h5", "Too deep")),
        ];
        let headings = extract_headings(&blocks);
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].level, 1);
        assert_eq!(headings[0].id, "heading-a-title");
        assert_eq!(headings[1].level, 4);
        assert_eq!(headings[1].text, "Deep");
    }
}
