//! Blog handlers: index, post detail, category, tag and search listings.

use std::ops::Range;

use axum::extract::{OriginalUri, Path, Query, State};
use axum::response::Response;
use serde::Deserialize;
use terasu_core::{DEFAULT_PAGE_SIZE, Post};

use super::draft::Draft;
use super::response::html_response;
use crate::error::SiteError;
use crate::render::PageContext;
use crate::render::blog::{self as pages, Listing};
use crate::render::post::post_page;
use crate::state::AppState;

/// Deepest listing page served. Keeps store offsets well inside `usize`.
const MAX_PAGE: usize = 10_000;

#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    page: Option<String>,
    q: Option<String>,
}

impl ListingParams {
    /// 1-based page number; absent means the first page.
    fn page(&self) -> Result<usize, SiteError> {
        match self.page.as_deref().map(str::trim) {
            None | Some("") => Ok(1),
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|p| (1..=MAX_PAGE).contains(p))
                .ok_or_else(|| SiteError::BadRequest(format!("invalid page number: {raw}"))),
        }
    }
}

/// Store range for `page` (at most [`MAX_PAGE`]), one item past the page to
/// detect a next page.
fn fetch_range(page: usize) -> Range<usize> {
    let start = (page - 1) * DEFAULT_PAGE_SIZE;
    start..start + DEFAULT_PAGE_SIZE + 1
}

/// Trims the look-ahead item, returning whether there was one.
fn split_page(posts: &mut Vec<Post>) -> bool {
    let has_next = posts.len() > DEFAULT_PAGE_SIZE;
    posts.truncate(DEFAULT_PAGE_SIZE);
    has_next
}

/// `GET /blog`
pub async fn index(
    State(state): State<AppState>,
    Draft(draft): Draft,
    Query(params): Query<ListingParams>,
) -> Result<Response, SiteError> {
    let page = params.page()?;
    let (mut posts, categories, tags) = tokio::try_join!(
        state.store.list_posts(draft, fetch_range(page)),
        state.store.categories(),
        state.store.tags(),
    )?;
    let has_next = split_page(&mut posts);

    let ctx = PageContext::new(&state, draft, "/blog");
    let listing = Listing {
        posts: &posts,
        page,
        has_next,
    };
    let markup = pages::blog_index(&ctx, listing, &categories, &tags);
    Ok(html_response(&state, draft, markup))
}

/// `GET /blog/{slug}`
pub async fn post(
    State(state): State<AppState>,
    Draft(draft): Draft,
    Path(slug): Path<String>,
    OriginalUri(uri): OriginalUri,
) -> Result<Response, SiteError> {
    let post = state
        .store
        .get_post(draft, &slug)
        .await?
        .ok_or_else(|| SiteError::NotFound(format!("post {slug}")))?;

    tracing::debug!(slug = %slug, draft = post.draft, "rendering post");
    let ctx = PageContext::new(&state, draft, uri.path());
    Ok(html_response(&state, draft, post_page(&ctx, &post)))
}

/// `GET /blog/category/{slug}`
pub async fn category(
    State(state): State<AppState>,
    Draft(draft): Draft,
    Path(slug): Path<String>,
    Query(params): Query<ListingParams>,
    OriginalUri(uri): OriginalUri,
) -> Result<Response, SiteError> {
    let page = params.page()?;
    let (categories, mut posts) = tokio::try_join!(
        state.store.categories(),
        state.store.posts_by_category(draft, &slug, fetch_range(page)),
    )?;
    let category = categories
        .into_iter()
        .find(|c| c.slug == slug)
        .ok_or_else(|| SiteError::NotFound(format!("category {slug}")))?;
    let has_next = split_page(&mut posts);

    let ctx = PageContext::new(&state, draft, uri.path());
    let listing = Listing {
        posts: &posts,
        page,
        has_next,
    };
    let markup = pages::category_page(&ctx, &category, listing);
    Ok(html_response(&state, draft, markup))
}

/// `GET /blog/tag/{slug}`
pub async fn tag(
    State(state): State<AppState>,
    Draft(draft): Draft,
    Path(slug): Path<String>,
    Query(params): Query<ListingParams>,
    OriginalUri(uri): OriginalUri,
) -> Result<Response, SiteError> {
    let page = params.page()?;
    let (tags, mut posts) = tokio::try_join!(
        state.store.tags(),
        state.store.posts_by_tag(draft, &slug, fetch_range(page)),
    )?;
    let tag = tags
        .into_iter()
        .find(|t| t.slug == slug)
        .ok_or_else(|| SiteError::NotFound(format!("tag {slug}")))?;
    let has_next = split_page(&mut posts);

    let ctx = PageContext::new(&state, draft, uri.path());
    let listing = Listing {
        posts: &posts,
        page,
        has_next,
    };
    let markup = pages::tag_page(&ctx, &tag, listing);
    Ok(html_response(&state, draft, markup))
}

/// `GET /blog/search?q=`
pub async fn search(
    State(state): State<AppState>,
    Draft(draft): Draft,
    Query(params): Query<ListingParams>,
) -> Result<Response, SiteError> {
    let page = params.page()?;
    let query = params.q.as_deref().unwrap_or_default().trim();
    let mut posts = state
        .store
        .search_posts(draft, query, fetch_range(page))
        .await?;
    let has_next = split_page(&mut posts);
    tracing::debug!(query = %query, results = posts.len(), "search");

    let ctx = PageContext::new(&state, draft, "/blog/search");
    let listing = Listing {
        posts: &posts,
        page,
        has_next,
    };
    let markup = pages::search_page(&ctx, query, listing);
    Ok(html_response(&state, draft, markup))
}
