//! GROQ query templates.
//!
//! Documents without a slug cannot be linked to, so no template returns them.
//!
//! Every template has a published-only and a draft-visible variant. The
//! published variant filters with `!draft`; the draft variant drops the
//! filter and projects the `draft` flag so pages can mark unpublished posts.
//!
//! Parameters are bound by name (`$slug`, `$start`, ...) and sent separately,
//! never spliced into the query text.

use crate::draft::DraftMode;

const POST_CARD_FIELDS: &str = r#"_id,
  title,
  slug,
  excerpt,
  publishedAt,
  updatedAt,
  image,
  featured,
  "categories": categories[]->{title, slug, color},
  "tags": tags[]->{title, slug}"#;

const LINKABLE: &str = " && defined(slug.current)";

fn draft_filter(mode: DraftMode) -> &'static str {
    match mode {
        DraftMode::Disabled => " && !draft",
        DraftMode::Enabled => "",
    }
}

fn post_projection(mode: DraftMode, with_body: bool) -> String {
    let mut fields = POST_CARD_FIELDS.to_string();
    if with_body {
        fields.push_str(",\n  body");
    }
    if mode.is_enabled() {
        fields.push_str(",\n  draft");
    }
    format!("{{\n  {fields}\n}}")
}

fn post_query(mode: DraftMode, extra_filter: &str, slice: &str, with_body: bool) -> String {
    format!(
        "*[_type == \"post\"{LINKABLE}{extra_filter}{draft}] | order(publishedAt desc) {slice} {projection}",
        draft = draft_filter(mode),
        projection = post_projection(mode, with_body),
    )
}

/// Posts, newest first. Params: `$start`, `$end`.
pub fn list_posts(mode: DraftMode) -> String {
    post_query(mode, "", "[$start...$end]", false)
}

/// Featured posts, newest first. Params: `$limit`.
pub fn featured_posts(mode: DraftMode) -> String {
    post_query(mode, " && featured == true", "[0...$limit]", false)
}

/// One post with its body. Params: `$slug`.
pub fn get_post(mode: DraftMode) -> String {
    post_query(mode, " && slug.current == $slug", "[0]", true)
}

/// Posts in a category. Params: `$categorySlug`, `$start`, `$end`.
pub fn posts_by_category(mode: DraftMode) -> String {
    post_query(
        mode,
        " && $categorySlug in categories[]->slug.current",
        "[$start...$end]",
        false,
    )
}

/// Posts with a tag. Params: `$tagSlug`, `$start`, `$end`.
pub fn posts_by_tag(mode: DraftMode) -> String {
    post_query(
        mode,
        " && $tagSlug in tags[]->slug.current",
        "[$start...$end]",
        false,
    )
}

/// Prefix search over title, excerpt and body text. Params: `$term`, `$start`, `$end`.
pub fn search_posts(mode: DraftMode) -> String {
    post_query(
        mode,
        " && (title match $term + \"*\" || excerpt match $term + \"*\" || pt::text(body) match $term + \"*\")",
        "[$start...$end]",
        false,
    )
}

/// All categories by title.
pub const CATEGORIES: &str = r#"*[_type == "category" && defined(slug.current)] | order(title asc) {
  _id,
  title,
  slug,
  description,
  color
}"#;

/// All tags by title.
pub const TAGS: &str = r#"*[_type == "tag" && defined(slug.current)] | order(title asc) {
  _id,
  title,
  slug,
  description
}"#;

/// The profile singleton.
pub const PROFILE: &str = r#"*[_type == "profile"][0] {
  _id,
  name,
  bio,
  catchphrase,
  profileImage,
  experience,
  skills,
  socialLinks,
  contactEmail
}"#;

/// The `_id` of the profile singleton, if one exists.
pub const PROFILE_ID: &str = r#"*[_type == "profile"][0]._id"#;

/// A preview URL secret document. Params: `$secret`.
pub const PREVIEW_SECRET: &str = r#"*[_type == "sanity.previewUrlSecret" && secret == $secret] | order(_updatedAt desc)[0] {
  _id,
  _updatedAt,
  secret
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_queries_filter_drafts() {
        for query in [
            list_posts(DraftMode::Disabled),
            featured_posts(DraftMode::Disabled),
            get_post(DraftMode::Disabled),
            posts_by_category(DraftMode::Disabled),
            posts_by_tag(DraftMode::Disabled),
            search_posts(DraftMode::Disabled),
        ] {
            assert!(query.contains("&& !draft]"), "missing filter: {query}");
            assert!(!query.contains("  draft"), "draft projected: {query}");
        }
    }

    #[test]
    fn draft_queries_project_the_flag() {
        for query in [
            list_posts(DraftMode::Enabled),
            featured_posts(DraftMode::Enabled),
            get_post(DraftMode::Enabled),
            posts_by_category(DraftMode::Enabled),
            posts_by_tag(DraftMode::Enabled),
            search_posts(DraftMode::Enabled),
        ] {
            assert!(!query.contains("!draft"), "filter kept: {query}");
            assert!(query.contains(",\n  draft\n}"), "flag not projected: {query}");
        }
    }

    #[test]
    fn only_get_post_projects_body() {
        assert!(get_post(DraftMode::Disabled).contains("body"));
        assert!(!list_posts(DraftMode::Disabled).contains("body"));
        // Search matches on body text but doesn't return it.
        assert!(!search_posts(DraftMode::Disabled).contains(",\n  body"));
    }

    #[test]
    fn list_query_shape() {
        let query = list_posts(DraftMode::Disabled);
        assert!(query.starts_with(
            "*[_type == \"post\" && defined(slug.current) && !draft] | order(publishedAt desc) [$start...$end] {"
        ));
        assert!(query.contains("\"categories\": categories[]->{title, slug, color}"));
    }

    #[test]
    fn queries_skip_slugless_documents() {
        for query in [
            list_posts(DraftMode::Enabled),
            featured_posts(DraftMode::Disabled),
            search_posts(DraftMode::Enabled),
            CATEGORIES.to_string(),
            TAGS.to_string(),
        ] {
            assert!(query.contains(" && defined(slug.current)"), "{query}");
        }
    }

    #[test]
    fn get_post_takes_first_match() {
        let query = get_post(DraftMode::Enabled);
        assert!(query.contains("slug.current == $slug]"));
        assert!(query.contains("[0] {"));
    }
}
