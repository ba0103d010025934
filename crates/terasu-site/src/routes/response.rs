//! HTML response building shared by page handlers.

use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use maud::Markup;
use terasu_core::DraftMode;

use crate::render::components::csp_header;
use crate::state::AppState;

/// Published pages may be cached briefly by the browser.
const PUBLIC_CACHE_CONTROL: &str = "public, max-age=60, stale-while-revalidate=300";
/// Draft pages must never be stored.
const DRAFT_CACHE_CONTROL: &str = "private, no-store";

/// Build an HTML response with security, cache and ETag headers.
pub fn html_response(state: &AppState, draft: DraftMode, markup: Markup) -> Response {
    let html = markup.into_string();
    let mut headers = HeaderMap::new();

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );

    // Security headers
    if let Ok(val) = HeaderValue::from_str(&csp_header(&state.config.studio_origins)) {
        headers.insert(header::CONTENT_SECURITY_POLICY, val);
    }
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::X_FRAME_OPTIONS,
        HeaderValue::from_static("SAMEORIGIN"),
    );
    headers.insert(
        "permissions-policy",
        HeaderValue::from_static("encrypted-media=*, autoplay=*, fullscreen=*"),
    );

    // ETag (xxHash of content)
    let hash = xxhash_rust::xxh3::xxh3_64(html.as_bytes());
    let etag = format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()));
    if let Ok(val) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, val);
    }

    let cache_control = if draft.is_enabled() {
        DRAFT_CACHE_CONTROL
    } else {
        PUBLIC_CACHE_CONTROL
    };
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_control),
    );

    (StatusCode::OK, headers, html).into_response()
}
