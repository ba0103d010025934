//! Data-access operations, dispatched to the configured backend.
//!
//! Each operation takes the request's [`DraftMode`] explicitly. Remote reads
//! go through the GROQ templates in [`crate::groq`]; snapshot reads evaluate
//! the same selection in process.

use std::ops::Range;

use serde_json::{Map, Value, json};

use crate::draft::DraftMode;
use crate::error::{Error, Result};
use crate::groq;
use crate::model::{Category, Post, PreviewSecret, Profile, Tag};
use crate::sanity::{SanityClient, Tier};
use crate::snapshot::SnapshotStore;

/// Where content comes from.
#[derive(Debug, Clone)]
pub enum ContentStore {
    /// The live content API.
    Sanity(SanityClient),
    /// A local dataset export.
    Snapshot(SnapshotStore),
}

fn range_params(range: &Range<usize>) -> [(&'static str, Value); 2] {
    [("start", json!(range.start)), ("end", json!(range.end))]
}

impl ContentStore {
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Sanity(_) => "sanity",
            Self::Snapshot(_) => "snapshot",
        }
    }

    /// Posts, newest first, sliced by `range`.
    pub async fn list_posts(&self, mode: DraftMode, range: Range<usize>) -> Result<Vec<Post>> {
        match self {
            Self::Sanity(client) => {
                client
                    .fetch(&groq::list_posts(mode), &range_params(&range), mode)
                    .await
            }
            Self::Snapshot(store) => store.list_posts(mode, range),
        }
    }

    /// Up to [`crate::FEATURED_LIMIT`] featured posts.
    pub async fn featured_posts(&self, mode: DraftMode) -> Result<Vec<Post>> {
        let limit = crate::FEATURED_LIMIT;
        match self {
            Self::Sanity(client) => {
                client
                    .fetch(&groq::featured_posts(mode), &[("limit", json!(limit))], mode)
                    .await
            }
            Self::Snapshot(store) => store.featured_posts(mode, limit),
        }
    }

    /// One post with its body, or `None` if no visible post has `slug`.
    pub async fn get_post(&self, mode: DraftMode, slug: &str) -> Result<Option<Post>> {
        match self {
            Self::Sanity(client) => {
                client
                    .fetch(&groq::get_post(mode), &[("slug", json!(slug))], mode)
                    .await
            }
            Self::Snapshot(store) => store.get_post(mode, slug),
        }
    }

    pub async fn posts_by_category(
        &self,
        mode: DraftMode,
        category_slug: &str,
        range: Range<usize>,
    ) -> Result<Vec<Post>> {
        match self {
            Self::Sanity(client) => {
                let [start, end] = range_params(&range);
                client
                    .fetch(
                        &groq::posts_by_category(mode),
                        &[("categorySlug", json!(category_slug)), start, end],
                        mode,
                    )
                    .await
            }
            Self::Snapshot(store) => store.posts_by_category(mode, category_slug, range),
        }
    }

    pub async fn posts_by_tag(
        &self,
        mode: DraftMode,
        tag_slug: &str,
        range: Range<usize>,
    ) -> Result<Vec<Post>> {
        match self {
            Self::Sanity(client) => {
                let [start, end] = range_params(&range);
                client
                    .fetch(
                        &groq::posts_by_tag(mode),
                        &[("tagSlug", json!(tag_slug)), start, end],
                        mode,
                    )
                    .await
            }
            Self::Snapshot(store) => store.posts_by_tag(mode, tag_slug, range),
        }
    }

    /// Posts whose title, excerpt or body text match `term` as a prefix.
    pub async fn search_posts(
        &self,
        mode: DraftMode,
        term: &str,
        range: Range<usize>,
    ) -> Result<Vec<Post>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        match self {
            Self::Sanity(client) => {
                let [start, end] = range_params(&range);
                client
                    .fetch(
                        &groq::search_posts(mode),
                        &[("term", json!(term)), start, end],
                        mode,
                    )
                    .await
            }
            Self::Snapshot(store) => store.search_posts(mode, term, range),
        }
    }

    pub async fn categories(&self) -> Result<Vec<Category>> {
        match self {
            Self::Sanity(client) => {
                client
                    .fetch(groq::CATEGORIES, &[], DraftMode::Disabled)
                    .await
            }
            Self::Snapshot(store) => store.categories(),
        }
    }

    pub async fn tags(&self) -> Result<Vec<Tag>> {
        match self {
            Self::Sanity(client) => client.fetch(groq::TAGS, &[], DraftMode::Disabled).await,
            Self::Snapshot(store) => store.tags(),
        }
    }

    pub async fn profile(&self) -> Result<Option<Profile>> {
        match self {
            Self::Sanity(client) => client.fetch(groq::PROFILE, &[], DraftMode::Disabled).await,
            Self::Snapshot(store) => store.profile(),
        }
    }

    /// Looks up a preview URL secret. Needs the read token on the remote backend.
    pub async fn preview_secret(&self, secret: &str) -> Result<Option<PreviewSecret>> {
        match self {
            Self::Sanity(client) => {
                client
                    .fetch_as(
                        groq::PREVIEW_SECRET,
                        &[("secret", json!(secret))],
                        Tier::Preview,
                        "raw",
                    )
                    .await
            }
            Self::Snapshot(store) => store.preview_secret(secret),
        }
    }

    /// Creates the profile singleton, or patches the existing one with the
    /// fields of `profile`. Returns the document id.
    pub async fn upsert_profile(&self, profile: &Profile) -> Result<String> {
        let Self::Sanity(client) = self else {
            return Err(Error::Unsupported("writing to a snapshot"));
        };
        let fields = profile_fields(profile)?;
        let existing: Option<String> = client
            .fetch_as(groq::PROFILE_ID, &[], Tier::Write, "published")
            .await?;

        let (id, mutation) = match existing {
            Some(id) => {
                tracing::info!("Patching existing profile {}", id);
                let mutation = json!({ "patch": { "id": id, "set": fields } });
                (id, mutation)
            }
            None => {
                let id = "profile".to_string();
                tracing::info!("Creating profile {}", id);
                let mut document = fields;
                document.insert("_id".to_string(), json!(id));
                document.insert("_type".to_string(), json!("profile"));
                (id, json!({ "create": document }))
            }
        };
        client.mutate(vec![mutation]).await?;
        Ok(id)
    }
}

/// Serializes profile fields for a mutation, adding the `_type` and `_key`
/// attributes the store expects on images, references and array items.
pub fn profile_fields(profile: &Profile) -> Result<Map<String, Value>> {
    let Value::Object(mut fields) = serde_json::to_value(profile)? else {
        return Ok(Map::new());
    };

    if let Some(Value::Object(image)) = fields.get_mut("profileImage") {
        image.insert("_type".to_string(), json!("image"));
        if let Some(Value::Object(asset)) = image.get_mut("asset") {
            asset.insert("_type".to_string(), json!("reference"));
        }
    }
    if let Some(Value::Array(items)) = fields.get_mut("experience") {
        for (i, item) in items.iter_mut().enumerate() {
            if let Value::Object(entry) = item
                && !entry.contains_key("_key")
            {
                entry.insert("_key".to_string(), json!(format!("experience-{i}")));
            }
        }
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssetRef, Experience, ImageRef};

    fn snapshot() -> ContentStore {
        ContentStore::Snapshot(SnapshotStore::from_documents(vec![
            json!({
                "_id": "p1", "_type": "post", "title": "Published", "slug": { "current": "published" },
                "publishedAt": "2024-01-01T00:00:00Z", "draft": false, "featured": true
            }),
            json!({
                "_id": "p2", "_type": "post", "title": "Unpublished", "slug": { "current": "unpublished" },
                "publishedAt": "2024-02-01T00:00:00Z", "draft": true
            }),
        ]))
    }

    #[tokio::test]
    async fn draft_mode_controls_visibility() {
        let store = snapshot();
        let published = store.list_posts(DraftMode::Disabled, 0..20).await.unwrap();
        assert_eq!(published.len(), 1);

        let drafts = store.list_posts(DraftMode::Enabled, 0..20).await.unwrap();
        assert_eq!(drafts.len(), 2);

        // Turning draft mode back off returns to published-only results.
        let again = store.list_posts(DraftMode::Disabled, 0..20).await.unwrap();
        assert_eq!(again.len(), 1);
        assert_eq!(again[0].slug, "published");
    }

    #[tokio::test]
    async fn unpublished_slug_is_not_found() {
        let store = snapshot();
        assert!(
            store
                .get_post(DraftMode::Disabled, "unpublished")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            store
                .get_post(DraftMode::Enabled, "unpublished")
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn blank_search_returns_nothing() {
        let store = snapshot();
        assert!(
            store
                .search_posts(DraftMode::Disabled, "   ", 0..20)
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(
            store
                .search_posts(DraftMode::Disabled, "publ", 0..20)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn snapshot_rejects_writes() {
        let err = snapshot()
            .upsert_profile(&Profile::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }

    #[test]
    fn profile_fields_add_store_attributes() {
        let profile = Profile {
            name: "Yoshi".into(),
            profile_image: Some(ImageRef {
                asset: Some(AssetRef {
                    reference: "image-abc-10x10-png".into(),
                }),
                ..Default::default()
            }),
            experience: vec![
                Experience {
                    company: "A".into(),
                    ..Default::default()
                },
                Experience {
                    key: Some("kept".into()),
                    company: "B".into(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let fields = profile_fields(&profile).unwrap();
        assert_eq!(fields["name"], "Yoshi");
        assert!(!fields.contains_key("_id"));
        assert_eq!(fields["profileImage"]["_type"], "image");
        assert_eq!(fields["profileImage"]["asset"]["_type"], "reference");
        assert_eq!(fields["experience"][0]["_key"], "experience-0");
        assert_eq!(fields["experience"][1]["_key"], "kept");
        assert!(!fields.contains_key("bio"));
    }
}
