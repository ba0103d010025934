//! Portable Text: the block-structured rich-text format post bodies use.
//!
//! Only the block types the site renders are modeled. Anything else decodes
//! to [`Block::Unknown`], and a block whose fields don't fit its type is
//! dropped while decoding, so one malformed block never fails a whole post.

pub mod embed;
pub mod headings;
pub mod table;

use serde::{Deserialize, Deserializer};

use crate::model::ImageRef;

pub use embed::{Embed, Provider, classify_embed};
pub use headings::{Heading, extract_headings, heading_id};
pub use table::{Delimiter, Table, parse_table};

/// One top-level body block, keyed on `_type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "_type")]
pub enum Block {
    /// Paragraphs, headings, quotes and list items.
    #[serde(rename = "block")]
    Text(TextBlock),
    #[serde(rename = "image")]
    Image(ImageRef),
    #[serde(rename = "table")]
    Table(TableBlock),
    /// External media. Older documents use `embed` as the type name.
    #[serde(rename = "iframe", alias = "embed")]
    Embed(EmbedBlock),
    #[serde(other)]
    Unknown,
}

/// A text block: one paragraph, heading, quote or list item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default, deserialize_with = "null_vec")]
    pub children: Vec<Span>,
    #[serde(default, deserialize_with = "null_vec")]
    pub mark_defs: Vec<MarkDef>,
    #[serde(default)]
    pub list_item: Option<ListKind>,
    #[serde(default)]
    pub level: Option<u32>,
}

impl TextBlock {
    /// Style name, `normal` when unset.
    pub fn style(&self) -> &str {
        self.style.as_deref().unwrap_or("normal")
    }

    /// Heading level for `h1`..`h4`.
    pub fn heading_level(&self) -> Option<u8> {
        match self.style() {
            "h1" => Some(1),
            "h2" => Some(2),
            "h3" => Some(3),
            "h4" => Some(4),
            _ => None,
        }
    }

    /// Concatenated text of all spans.
    pub fn plain_text(&self) -> String {
        self.children.iter().map(|s| s.text.as_str()).collect()
    }

    /// List nesting depth, at least 1 for list items.
    pub fn list_level(&self) -> u32 {
        self.level.unwrap_or(1).max(1)
    }

    pub fn mark_def(&self, key: &str) -> Option<&MarkDef> {
        self.mark_defs.iter().find(|d| d.key == key)
    }
}

/// A run of text with uniform marks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Span {
    #[serde(default, deserialize_with = "null_string")]
    pub text: String,
    /// Decorator names (`strong`, `em`, ...) or keys into `markDefs`.
    #[serde(default, deserialize_with = "null_vec")]
    pub marks: Vec<String>,
}

/// An annotation referenced from span marks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarkDef {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_type", default)]
    pub kind: String,
    #[serde(default)]
    pub href: Option<String>,
}

/// Kind of list a text block belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Bullet,
    Number,
    /// Custom list styles render as bullets.
    #[serde(other)]
    Other,
}

impl ListKind {
    pub fn is_ordered(self) -> bool {
        self == Self::Number
    }
}

/// A table authored as delimited text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableBlock {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub csv_input: Option<String>,
}

/// An external media embed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmbedBlock {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Decodes a body array block by block, dropping blocks that don't decode.
pub fn deserialize_blocks<'de, D>(deserializer: D) -> Result<Option<Vec<Block>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<Vec<serde_json::Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let blocks = raw
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value::<Block>(value) {
            Ok(block) => Some(block),
            Err(e) => {
                tracing::debug!("Skipping malformed body block {}: {}", i, e);
                None
            }
        })
        .collect();
    Ok(Some(blocks))
}

/// Plain text of every text block, one line per block. Snapshot search
/// matches against it.
pub fn plain_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .filter_map(|b| match b {
            Block::Text(t) => Some(t.plain_text()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn null_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Doc {
        #[serde(default, deserialize_with = "deserialize_blocks")]
        body: Option<Vec<Block>>,
    }

    fn decode(body: serde_json::Value) -> Vec<Block> {
        serde_json::from_value::<Doc>(json!({ "body": body }))
            .unwrap()
            .body
            .unwrap()
    }

    #[test]
    fn decodes_known_block_types() {
        let blocks = decode(json!([
            {
                "_type": "block", "_key": "a1", "style": "h2",
                "children": [{ "_type": "span", "text": "Intro", "marks": [] }],
                "markDefs": []
            },
            { "_type": "image", "_key": "i1", "asset": { "_ref": "image-x-10x10-png" }, "alt": "x" },
            { "_type": "table", "_key": "t1", "csvInput": "a,b\n1,2" },
            { "_type": "iframe", "_key": "e1", "url": "https://example.com" },
            { "_type": "embed", "_key": "e2", "url": "https://youtu.be/abc" },
            { "_type": "codeBlock", "_key": "c1", "code": "fn main() {}" }
        ]));

        assert_eq!(blocks.len(), 6);
        match &blocks[0] {
            Block::Text(t) => {
                assert_eq!(t.heading_level(), Some(2));
                assert_eq!(t.plain_text(), "Intro");
                assert_eq!(t.key.as_deref(), Some("a1"));
            }
            other => panic!("expected text block, got {other:?}"),
        }
        assert!(matches!(blocks[1], Block::Image(_)));
        assert!(matches!(blocks[2], Block::Table(_)));
        assert!(matches!(blocks[3], Block::Embed(_)));
        assert!(matches!(blocks[4], Block::Embed(_)));
        assert!(matches!(blocks[5], Block::Unknown));
    }

    #[test]
    fn malformed_blocks_are_dropped() {
        let blocks = decode(json!([
            { "_type": "block", "children": "not an array" },
            { "_type": "block", "children": [{ "_type": "span", "text": "ok" }] },
            42
        ]));
        assert_eq!(blocks.len(), 1);
        assert_eq!(plain_text(&blocks), "ok");
    }

    #[test]
    fn null_body_stays_none() {
        let doc: Doc = serde_json::from_value(json!({ "body": null })).unwrap();
        assert!(doc.body.is_none());
    }

    #[test]
    fn text_block_defaults() {
        let blocks = decode(json!([
            { "_type": "block", "children": [{ "text": null, "marks": null }], "listItem": "checkbox" }
        ]));
        let Block::Text(t) = &blocks[0] else {
            panic!("expected text block");
        };
        assert_eq!(t.style(), "normal");
        assert_eq!(t.heading_level(), None);
        assert_eq!(t.list_item, Some(ListKind::Other));
        assert_eq!(t.list_level(), 1);
        assert_eq!(t.plain_text(), "");
    }

    #[test]
    fn mark_def_lookup() {
        let blocks = decode(json!([{
            "_type": "block",
            "children": [{ "text": "here", "marks": ["lnk"] }],
            "markDefs": [{ "_key": "lnk", "_type": "link", "href": "https://example.com" }]
        }]));
        let Block::Text(t) = &blocks[0] else {
            panic!("expected text block");
        };
        let def = t.mark_def("lnk").unwrap();
        assert_eq!(def.kind, "link");
        assert_eq!(def.href.as_deref(), Some("https://example.com"));
        assert!(t.mark_def("missing").is_none());
    }
}
