//! Shared fixtures for unit and router tests.

use serde_json::{Value, json};
use terasu_core::{ContentStore, SanityConfig, SnapshotStore};

use crate::config::Config;
use crate::state::AppState;

pub const DRAFT_SECRET: &str = "let-me-in";

pub fn test_config() -> Config {
    Config {
        bind_addr: "127.0.0.1:0".to_string(),
        base_url: "https://blog.example.com".to_string(),
        site_name: "Test Blog".to_string(),
        site_short_name: "Test".to_string(),
        site_description: "A blog used in tests".to_string(),
        theme_color: "#3b82f6".to_string(),
        studio_origins: vec!["https://studio.example.com".to_string()],
        draft_mode_secret: Some(DRAFT_SECRET.to_string()),
        draft_cookie_key: Some("test-cookie-key".to_string()),
        sanity: SanityConfig {
            project_id: "proj".to_string(),
            dataset: "production".to_string(),
            api_version: "2025-02-19".to_string(),
            api_url: None,
            read_token: None,
            write_token: None,
        },
        content_snapshot: None,
        app_env: "test".to_string(),
    }
}

/// A small dataset: two published posts, one draft-only post, a new draft
/// with no slug yet, a draft edit of a published post, taxonomies, a profile
/// and preview secrets.
pub fn test_documents() -> Vec<Value> {
    let fresh = chrono::Utc::now().to_rfc3339();
    vec![
        json!({ "_id": "cat-tech", "_type": "category", "title": "Tech",
                "slug": { "current": "tech" }, "color": "#22c55e" }),
        json!({ "_id": "tag-rust", "_type": "tag", "title": "rust",
                "slug": { "current": "rust" } }),
        json!({
            "_id": "post-hello", "_type": "post", "title": "Hello World",
            "slug": { "current": "hello" }, "excerpt": "First post",
            "publishedAt": "2024-05-01T00:00:00Z", "featured": true, "draft": false,
            "categories": [{ "_type": "reference", "_ref": "cat-tech" }],
            "tags": [{ "_type": "reference", "_ref": "tag-rust" }],
            "body": [
                { "_type": "block", "_key": "a1", "style": "h2",
                  "children": [{ "_type": "span", "text": "Getting Started" }] },
                { "_type": "block", "_key": "a2", "style": "normal",
                  "children": [{ "_type": "span", "text": "Welcome aboard." }] },
                { "_type": "iframe", "_key": "a3", "url": "https://youtu.be/dQw4w9WgXcQ" }
            ]
        }),
        json!({
            "_id": "drafts.post-hello", "_type": "post", "title": "Hello World (edited)",
            "slug": { "current": "hello" }, "publishedAt": "2024-05-01T00:00:00Z",
            "featured": true, "draft": false
        }),
        json!({
            "_id": "post-second", "_type": "post", "title": "Second Post",
            "slug": { "current": "second" }, "publishedAt": "2024-04-01T00:00:00Z",
            "draft": false
        }),
        json!({
            "_id": "drafts.post-secret", "_type": "post", "title": "Unreleased",
            "slug": { "current": "unreleased" }, "publishedAt": "2024-06-01T00:00:00Z",
            "draft": true
        }),
        json!({ "_id": "drafts.post-wip", "_type": "post", "title": "Work in progress" }),
        json!({
            "_id": "profile", "_type": "profile", "name": "Aoi",
            "catchphrase": "心を照らす", "contactEmail": "aoi@example.com",
            "socialLinks": { "twitter": "https://twitter.com/aoi" }
        }),
        json!({
            "_id": "secret-1", "_type": "sanity.previewUrlSecret",
            "secret": "studio-secret", "_updatedAt": fresh
        }),
        json!({
            "_id": "secret-old", "_type": "sanity.previewUrlSecret",
            "secret": "stale-secret", "_updatedAt": "2020-01-01T00:00:00Z"
        }),
    ]
}

pub fn test_state() -> AppState {
    let store = ContentStore::Snapshot(SnapshotStore::from_documents(test_documents()));
    AppState::with_store(test_config(), store)
}
