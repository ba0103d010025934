//! A content store backed by a local dataset export.
//!
//! The file is NDJSON, one document per line, as written by
//! `sanity dataset export`. Queries are evaluated in Rust with the same
//! visibility rules as the remote API:
//!
//! - Published mode ignores `drafts.*` documents and posts with `draft: true`.
//! - Draft mode overlays each `drafts.<id>` document on `<id>`.
//! - Posts, categories and tags without a slug are never returned.
//!
//! Search is an approximation of GROQ `match`: every word of the term must be
//! a prefix of some word in the title, the excerpt or the body text.

use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use crate::draft::DraftMode;
use crate::error::{Error, Result};
use crate::model::{Category, Post, PreviewSecret, Profile, Tag};
use crate::portable_text;

const DRAFTS_PREFIX: &str = "drafts.";

/// In-memory dataset loaded from an export.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    documents: Vec<Value>,
}

impl SnapshotStore {
    /// Loads an NDJSON export. Blank lines are ignored.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut documents = Vec::new();
        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let doc: Value = serde_json::from_str(line).map_err(|e| Error::Snapshot {
                line: i + 1,
                reason: e.to_string(),
            })?;
            if !doc.is_object() || doc.get("_id").and_then(Value::as_str).is_none() {
                return Err(Error::Snapshot {
                    line: i + 1,
                    reason: "expected an object with an _id".to_string(),
                });
            }
            documents.push(doc);
        }
        tracing::info!(
            "Loaded {} documents from snapshot {}",
            documents.len(),
            path.display()
        );
        Ok(Self { documents })
    }

    pub fn from_documents(documents: Vec<Value>) -> Self {
        Self { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    // -- visibility --

    /// Documents visible in `mode`, keyed by published id.
    fn visible(&self, mode: DraftMode) -> HashMap<&str, &Value> {
        let mut docs = HashMap::new();
        let mut drafts = Vec::new();
        for doc in &self.documents {
            let Some(id) = doc_id(doc) else { continue };
            match id.strip_prefix(DRAFTS_PREFIX) {
                Some(base) => drafts.push((base, doc)),
                None => {
                    docs.insert(id, doc);
                }
            }
        }
        if mode.is_enabled() {
            docs.extend(drafts);
        }
        docs
    }

    fn of_type<'a>(
        visible: &HashMap<&'a str, &'a Value>,
        kind: &str,
    ) -> Vec<(&'a str, &'a Value)> {
        let mut docs: Vec<_> = visible
            .iter()
            .filter(|(_, doc)| doc.get("_type").and_then(Value::as_str) == Some(kind))
            .map(|(id, doc)| (*id, *doc))
            .collect();
        docs.sort_by(|a, b| a.0.cmp(b.0));
        docs
    }

    // -- posts --

    fn posts<F>(
        &self,
        mode: DraftMode,
        range: Range<usize>,
        with_body: bool,
        filter: F,
    ) -> Result<Vec<Post>>
    where
        F: Fn(&Value, &HashMap<&str, &Value>) -> bool,
    {
        let visible = self.visible(mode);
        let mut matching: Vec<(&str, &Value)> = Self::of_type(&visible, "post")
            .into_iter()
            .filter(|(_, doc)| has_slug(doc))
            .filter(|(_, doc)| mode.is_enabled() || !is_true(doc.get("draft")))
            .filter(|(_, doc)| filter(*doc, &visible))
            .collect();
        matching.sort_by_key(|(_, doc)| std::cmp::Reverse(published_at(doc)));

        matching
            .into_iter()
            .skip(range.start)
            .take(range.end.saturating_sub(range.start))
            .map(|(id, doc)| decode(project_post(id, doc, &visible, mode, with_body)))
            .collect()
    }

    pub fn list_posts(&self, mode: DraftMode, range: Range<usize>) -> Result<Vec<Post>> {
        self.posts(mode, range, false, |_, _| true)
    }

    pub fn featured_posts(&self, mode: DraftMode, limit: usize) -> Result<Vec<Post>> {
        self.posts(mode, 0..limit, false, |doc, _| is_true(doc.get("featured")))
    }

    pub fn get_post(&self, mode: DraftMode, slug: &str) -> Result<Option<Post>> {
        let mut posts = self.posts(mode, 0..1, true, |doc, _| slug_of(doc) == Some(slug))?;
        Ok(posts.pop())
    }

    pub fn posts_by_category(
        &self,
        mode: DraftMode,
        category_slug: &str,
        range: Range<usize>,
    ) -> Result<Vec<Post>> {
        self.posts(mode, range, false, |doc, visible| {
            references(doc, "categories", visible)
                .any(|cat| slug_of(cat) == Some(category_slug))
        })
    }

    pub fn posts_by_tag(
        &self,
        mode: DraftMode,
        tag_slug: &str,
        range: Range<usize>,
    ) -> Result<Vec<Post>> {
        self.posts(mode, range, false, |doc, visible| {
            references(doc, "tags", visible).any(|tag| slug_of(tag) == Some(tag_slug))
        })
    }

    pub fn search_posts(
        &self,
        mode: DraftMode,
        term: &str,
        range: Range<usize>,
    ) -> Result<Vec<Post>> {
        let needles = words(term);
        if needles.is_empty() {
            return Ok(Vec::new());
        }
        self.posts(mode, range, false, |doc, _| {
            let field = |name: &str| {
                doc.get(name)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            [field("title"), field("excerpt"), body_text(doc)]
                .iter()
                .any(|text| matches_prefixes(text, &needles))
        })
    }

    // -- other documents --

    fn sorted_by_title<T: DeserializeOwned>(&self, kind: &str) -> Result<Vec<T>> {
        let visible = self.visible(DraftMode::Disabled);
        let mut docs = Self::of_type(&visible, kind);
        docs.retain(|(_, doc)| has_slug(doc));
        docs.sort_by(|a, b| title_of(a.1).cmp(title_of(b.1)));
        docs.into_iter().map(|(_, doc)| decode(doc.clone())).collect()
    }

    pub fn categories(&self) -> Result<Vec<Category>> {
        self.sorted_by_title("category")
    }

    pub fn tags(&self) -> Result<Vec<Tag>> {
        self.sorted_by_title("tag")
    }

    pub fn profile(&self) -> Result<Option<Profile>> {
        let visible = self.visible(DraftMode::Disabled);
        Self::of_type(&visible, "profile")
            .into_iter()
            .next()
            .map(|(_, doc)| decode(doc.clone()))
            .transpose()
    }

    pub fn preview_secret(&self, secret: &str) -> Result<Option<PreviewSecret>> {
        let newest = self
            .documents
            .iter()
            .filter(|doc| {
                doc.get("_type").and_then(Value::as_str) == Some("sanity.previewUrlSecret")
            })
            .filter(|doc| doc.get("secret").and_then(Value::as_str) == Some(secret))
            .max_by_key(|doc| timestamp(doc.get("_updatedAt")));
        newest.map(|doc| decode(doc.clone())).transpose()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Document helpers
// ═══════════════════════════════════════════════════════════════════════════

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}

fn doc_id(doc: &Value) -> Option<&str> {
    doc.get("_id").and_then(Value::as_str)
}

fn is_true(value: Option<&Value>) -> bool {
    value.and_then(Value::as_bool).unwrap_or(false)
}

fn slug_of(doc: &Value) -> Option<&str> {
    match doc.get("slug")? {
        Value::String(s) => Some(s),
        slug => slug.get("current").and_then(Value::as_str),
    }
}

fn has_slug(doc: &Value) -> bool {
    slug_of(doc).is_some_and(|s| !s.is_empty())
}

fn title_of(doc: &Value) -> &str {
    doc.get("title").and_then(Value::as_str).unwrap_or_default()
}

fn timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    value
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<DateTime<Utc>>().ok())
}

fn published_at(doc: &Value) -> Option<DateTime<Utc>> {
    timestamp(doc.get("publishedAt"))
}

/// Dereferences an array of references, skipping dangling ones.
fn references<'a>(
    doc: &'a Value,
    field: &'static str,
    visible: &'a HashMap<&'a str, &'a Value>,
) -> impl Iterator<Item = &'a Value> + 'a {
    doc.get(field)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|r| r.get("_ref").and_then(Value::as_str))
        .filter_map(|id| visible.get(id).copied())
}

fn pick(doc: &Value, fields: &[&str]) -> Value {
    let map: Map<String, Value> = fields
        .iter()
        .map(|f| (f.to_string(), doc.get(*f).cloned().unwrap_or(Value::Null)))
        .collect();
    Value::Object(map)
}

fn project_post(
    id: &str,
    doc: &Value,
    visible: &HashMap<&str, &Value>,
    mode: DraftMode,
    with_body: bool,
) -> Value {
    let mut fields = vec![
        "title",
        "slug",
        "excerpt",
        "publishedAt",
        "updatedAt",
        "image",
        "featured",
    ];
    if with_body {
        fields.push("body");
    }
    if mode.is_enabled() {
        fields.push("draft");
    }
    let mut projected = pick(doc, &fields);
    let categories: Vec<Value> = references(doc, "categories", visible)
        .map(|c| pick(c, &["title", "slug", "color"]))
        .collect();
    let tags: Vec<Value> = references(doc, "tags", visible)
        .map(|t| pick(t, &["title", "slug"]))
        .collect();
    if let Value::Object(map) = &mut projected {
        map.insert("_id".to_string(), json!(id));
        map.insert("categories".to_string(), Value::Array(categories));
        map.insert("tags".to_string(), Value::Array(tags));
    }
    projected
}

/// Text of the body's text blocks, decoded the way the renderer decodes them.
fn body_text(doc: &Value) -> String {
    let blocks = doc
        .get("body")
        .cloned()
        .and_then(|body| portable_text::deserialize_blocks(body).ok().flatten())
        .unwrap_or_default();
    portable_text::plain_text(&blocks)
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn matches_prefixes(text: &str, needles: &[String]) -> bool {
    let haystack = words(text);
    needles
        .iter()
        .all(|needle| haystack.iter().any(|word| word.starts_with(needle.as_str())))
}
