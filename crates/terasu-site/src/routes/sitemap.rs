//! `GET /sitemap.xml`: static pages, published posts, categories and tags.

use std::io::Cursor;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use terasu_core::{DraftMode, SITEMAP_POST_LIMIT};

use crate::error::SiteError;
use crate::state::AppState;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// One `<url>` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub last_modified: Option<DateTime<Utc>>,
    pub change_frequency: &'static str,
    pub priority: f32,
}

impl SitemapEntry {
    fn new(loc: String, change_frequency: &'static str, priority: f32) -> Self {
        Self {
            loc,
            last_modified: None,
            change_frequency,
            priority,
        }
    }
}

/// Serialize entries as a sitemap `<urlset>` document.
pub fn render_sitemap(entries: &[SitemapEntry]) -> quick_xml::Result<Vec<u8>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NS));
    writer.write_event(Event::Start(urlset))?;

    for entry in entries {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        push_text(&mut writer, "loc", &entry.loc)?;
        if let Some(date) = entry.last_modified {
            push_text(&mut writer, "lastmod", &date.to_rfc3339())?;
        }
        push_text(&mut writer, "changefreq", entry.change_frequency)?;
        push_text(&mut writer, "priority", &format!("{:.1}", entry.priority))?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;
    Ok(writer.into_inner().into_inner())
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// `GET /sitemap.xml`. Only published content is listed.
pub async fn sitemap(State(state): State<AppState>) -> Result<Response, SiteError> {
    let (posts, categories, tags) = tokio::try_join!(
        state
            .store
            .list_posts(DraftMode::Disabled, 0..SITEMAP_POST_LIMIT),
        state.store.categories(),
        state.store.tags(),
    )?;

    let config = &state.config;
    let mut entries = vec![
        SitemapEntry::new(config.absolute_url("/"), "daily", 1.0),
        SitemapEntry::new(config.absolute_url("/blog"), "daily", 0.9),
        SitemapEntry::new(config.absolute_url("/profile"), "monthly", 0.8),
        SitemapEntry::new(config.absolute_url("/contact"), "yearly", 0.6),
    ];
    entries.extend(posts.iter().map(|post| SitemapEntry {
        last_modified: post.last_modified(),
        ..SitemapEntry::new(
            config.absolute_url(&format!("/blog/{}", urlencoding::encode(&post.slug))),
            "weekly",
            0.7,
        )
    }));
    entries.extend(categories.iter().map(|category| {
        SitemapEntry::new(
            config.absolute_url(&format!(
                "/blog/category/{}",
                urlencoding::encode(&category.slug)
            )),
            "weekly",
            0.6,
        )
    }));
    entries.extend(tags.iter().map(|tag| {
        SitemapEntry::new(
            config.absolute_url(&format!("/blog/tag/{}", urlencoding::encode(&tag.slug))),
            "weekly",
            0.5,
        )
    }));

    let xml = render_sitemap(&entries).map_err(|e| SiteError::Internal(e.into()))?;
    tracing::debug!(entries = entries.len(), "rendered sitemap");

    Ok((
        [
            (header::CONTENT_TYPE, "application/xml; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        xml,
    )
        .into_response())
}
