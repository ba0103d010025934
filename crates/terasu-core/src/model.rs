//! Content model: the documents the site reads from the content store.
//!
//! Shapes mirror the query projections in [`crate::groq`]. Referenced
//! categories and tags arrive denormalized inline. The store may return
//! `null` for any projected field that a document does not have, so most
//! fields tolerate both absence and `null`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::portable_text::{self, Block};

/// How long a preview URL secret stays valid after its last update.
pub const PREVIEW_SECRET_TTL_SECS: i64 = 3600;

/// A blog post.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Document ID.
    #[serde(rename = "_id")]
    pub id: String,
    /// Post title.
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    /// URL slug, unique per post. Empty until an editor sets one.
    #[serde(default, deserialize_with = "slug")]
    pub slug: String,
    /// Short summary shown in listings.
    #[serde(default)]
    pub excerpt: Option<String>,
    /// First publication time.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Last update time, if edited after publication.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Hero image.
    #[serde(default)]
    pub image: Option<ImageRef>,
    /// Rich-text body. Only projected by the single-post query.
    #[serde(default, deserialize_with = "portable_text::deserialize_blocks")]
    pub body: Option<Vec<Block>>,
    /// Categories, denormalized.
    #[serde(default, deserialize_with = "present_items")]
    pub categories: Vec<CategoryRef>,
    /// Tags, denormalized.
    #[serde(default, deserialize_with = "present_items")]
    pub tags: Vec<TagRef>,
    /// Shown on the home page.
    #[serde(default, deserialize_with = "null_default")]
    pub featured: bool,
    /// Unpublished; only ever `true` when fetched in draft mode.
    #[serde(default, deserialize_with = "null_default")]
    pub draft: bool,
}

impl Post {
    /// The date to show for "last modified": update time, else publication time.
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.published_at)
    }

    /// Whether the post was edited after it was first published.
    pub fn was_updated(&self) -> bool {
        matches!((self.updated_at, self.published_at), (Some(u), Some(p)) if u != p)
    }
}

/// A category as embedded in a post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryRef {
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    #[serde(default, deserialize_with = "slug")]
    pub slug: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// A tag as embedded in a post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagRef {
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    #[serde(default, deserialize_with = "slug")]
    pub slug: String,
}

/// A category document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    #[serde(default, deserialize_with = "slug")]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Display color (any CSS color, usually `#rrggbb`).
    #[serde(default)]
    pub color: Option<String>,
}

/// A tag document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tag {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    #[serde(default, deserialize_with = "slug")]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// The site owner's profile. There is at most one.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id", default, skip_serializing)]
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catchphrase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<ImageRef>,
    #[serde(default, deserialize_with = "present_items")]
    pub experience: Vec<Experience>,
    #[serde(default, deserialize_with = "present_items")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub social_links: SocialLinks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

/// One entry of the profile's work history.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Experience {
    /// Array item key assigned by the content store.
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub company: String,
    #[serde(default, alias = "role", deserialize_with = "null_default")]
    pub position: String,
    #[serde(default, deserialize_with = "null_default")]
    pub period: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Social profile URLs.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    /// Older documents store the X link under this key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

impl SocialLinks {
    /// The X (Twitter) profile URL under either key.
    pub fn x_url(&self) -> Option<&str> {
        self.x.as_deref().or(self.twitter.as_deref())
    }

    /// All configured links as `(label, url)` pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("X", self.x_url()),
            ("Instagram", self.instagram.as_deref()),
            ("YouTube", self.youtube.as_deref()),
            ("GitHub", self.github.as_deref()),
            ("LinkedIn", self.linkedin.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, url)| url.filter(|u| !u.is_empty()).map(|u| (label, u)))
        .collect()
    }
}

/// An image field: a reference to an uploaded asset plus alt text.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ImageRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<AssetRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl ImageRef {
    /// The asset reference string, if the image points at an asset.
    pub fn asset_ref(&self) -> Option<&str> {
        self.asset
            .as_ref()
            .map(|a| a.reference.as_str())
            .filter(|r| !r.is_empty())
    }
}

/// Reference to an image asset, e.g. `image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AssetRef {
    #[serde(rename = "_ref", default)]
    pub reference: String,
}

/// A preview URL secret created by the studio when it opens a preview.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewSecret {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub secret: String,
}

impl PreviewSecret {
    /// Whether `candidate` matches this secret and the secret has not expired.
    pub fn accepts(&self, candidate: &str, now: DateTime<Utc>) -> bool {
        let fresh = now.signed_duration_since(self.updated_at).num_seconds()
            <= PREVIEW_SECRET_TTL_SECS;
        fresh && crate::draft::secrets_match(&self.secret, candidate)
    }
}

// -- serde helpers --

/// Treat an explicit `null` like a missing field.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Array of items where dangling references dereference to `null`.
fn present_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items = Option::<Vec<Option<T>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items.into_iter().flatten().collect())
}

/// Slugs are stored as `{ "current": "..." }`; accept a bare string too.
/// A missing or `null` slug reads as empty.
fn slug<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Object {
            #[serde(default)]
            current: Option<String>,
        },
        Plain(String),
    }

    Ok(match Option::<Repr>::deserialize(deserializer)? {
        Some(Repr::Object { current }) => current.unwrap_or_default(),
        Some(Repr::Plain(s)) => s,
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    #[test]
    fn post_from_projection() {
        let post: Post = serde_json::from_value(json!({
            "_id": "post-1",
            "title": "Hello",
            "slug": { "current": "hello" },
            "excerpt": null,
            "publishedAt": "2024-05-01T09:00:00Z",
            "updatedAt": null,
            "image": { "asset": { "_ref": "image-abc-800x600-png" }, "alt": "hero" },
            "categories": [{ "title": "Tech", "slug": { "current": "tech" }, "color": "#3b82f6" }, null],
            "tags": null,
            "featured": null
        }))
        .unwrap();

        assert_eq!(post.slug, "hello");
        assert!(post.excerpt.is_none());
        assert_eq!(post.categories.len(), 1);
        assert_eq!(post.categories[0].slug, "tech");
        assert!(post.tags.is_empty());
        assert!(!post.featured);
        assert!(!post.draft);
        assert_eq!(
            post.image.as_ref().and_then(|i| i.asset_ref()),
            Some("image-abc-800x600-png")
        );
        assert!(post.body.is_none());
    }

    #[test]
    fn post_slug_accepts_plain_string() {
        let post: Post = serde_json::from_value(json!({ "_id": "p", "slug": "plain" })).unwrap();
        assert_eq!(post.slug, "plain");
        assert_eq!(post.title, "");
    }

    #[test]
    fn post_without_slug_decodes() {
        for value in [
            json!({ "_id": "drafts.new", "title": "WIP" }),
            json!({ "_id": "drafts.new", "title": "WIP", "slug": null }),
            json!({ "_id": "drafts.new", "title": "WIP", "slug": { "_type": "slug" } }),
            json!({ "_id": "drafts.new", "title": "WIP", "slug": { "current": null } }),
        ] {
            let post: Post = serde_json::from_value(value).unwrap();
            assert_eq!(post.slug, "");
            assert_eq!(post.title, "WIP");
        }
    }

    #[test]
    fn post_was_updated() {
        let published = "2024-05-01T09:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let mut post = Post {
            published_at: Some(published),
            ..Default::default()
        };
        assert!(!post.was_updated());
        assert_eq!(post.last_modified(), Some(published));

        post.updated_at = Some(published);
        assert!(!post.was_updated());

        post.updated_at = Some(published + Duration::days(1));
        assert!(post.was_updated());
        assert_eq!(post.last_modified(), post.updated_at);
    }

    #[test]
    fn profile_with_nulls() {
        let profile: Profile = serde_json::from_value(json!({
            "_id": "profile",
            "name": "Yoshi",
            "experience": [{ "company": "A", "role": "Engineer", "period": "2020-2023" }],
            "skills": ["Rust", "TypeScript"],
            "socialLinks": null
        }))
        .unwrap();

        assert_eq!(profile.name, "Yoshi");
        assert_eq!(profile.experience[0].position, "Engineer");
        assert_eq!(profile.skills, vec!["Rust", "TypeScript"]);
        assert!(profile.social_links.entries().is_empty());
    }

    #[test]
    fn social_links_prefer_x_over_legacy_twitter() {
        let links = SocialLinks {
            x: Some("https://x.com/new".into()),
            twitter: Some("https://twitter.com/old".into()),
            github: Some("https://github.com/me".into()),
            linkedin: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(links.x_url(), Some("https://x.com/new"));
        let labels: Vec<_> = links.entries().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["X", "GitHub"]);
    }

    #[test]
    fn preview_secret_accepts_matching_fresh_secret() {
        let now = Utc::now();
        let secret = PreviewSecret {
            id: "s1".into(),
            updated_at: now - Duration::minutes(5),
            secret: "abc123".into(),
        };
        assert!(secret.accepts("abc123", now));
        assert!(!secret.accepts("abc124", now));
        assert!(!secret.accepts("", now));
    }

    #[test]
    fn preview_secret_rejects_expired_secret() {
        let now = Utc::now();
        let secret = PreviewSecret {
            id: "s1".into(),
            updated_at: now - Duration::hours(2),
            secret: "abc123".into(),
        };
        assert!(!secret.accepts("abc123", now));
    }
}
