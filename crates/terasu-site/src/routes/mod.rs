//! Route definitions for the site.
//!
//! ## Routes
//!
//! - `GET /` - Home page
//! - `GET /blog` - Post index (`?page=N`)
//! - `GET /blog/search` - Search results (`?q=`)
//! - `GET /blog/{slug}` - Post detail
//! - `GET /blog/category/{slug}` - Posts in a category
//! - `GET /blog/tag/{slug}` - Posts with a tag
//! - `GET /profile` - Profile page
//! - `GET /contact` - Contact page
//! - `GET /api/preview` - Enable draft mode from a studio preview link
//! - `GET /api/draft` - Enable draft mode with the shared secret
//! - `GET /api/disable-preview` - Disable draft mode
//! - `GET /api/debug-env` - Credential presence flags (JSON)
//! - `GET /sitemap.xml` - Site map
//! - `GET /manifest.webmanifest` - Web-app manifest
//! - `GET /robots.txt` - Crawler instructions
//! - `GET /health` - Health check (JSON)

mod blog;
mod debug_env;
pub mod draft;
mod health;
mod manifest;
mod pages;
mod response;
mod sitemap;

use axum::Router;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;

use crate::state::AppState;

pub use sitemap::{SitemapEntry, render_sitemap};

/// Build the complete site router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/blog", get(blog::index))
        .route("/blog/search", get(blog::search))
        .route("/blog/{slug}", get(blog::post))
        .route("/blog/category/{slug}", get(blog::category))
        .route("/blog/tag/{slug}", get(blog::tag))
        .route("/profile", get(pages::profile))
        .route("/contact", get(pages::contact))
        .route("/api/preview", get(draft::preview))
        .route("/api/draft", get(draft::enable))
        .route("/api/disable-preview", get(draft::disable))
        .route("/api/debug-env", get(debug_env::debug_env))
        .route("/sitemap.xml", get(sitemap::sitemap))
        .route("/manifest.webmanifest", get(manifest::manifest))
        .route("/robots.txt", get(robots_txt))
        .route("/health", get(health::health_check))
        .with_state(state)
}

/// Serve robots.txt allowing all crawlers and pointing at the site map.
async fn robots_txt(State(state): State<AppState>) -> impl IntoResponse {
    (
        [("content-type", "text/plain; charset=utf-8")],
        format!(
            "User-agent: *\nAllow: /\n\nSitemap: {}\n",
            state.config.absolute_url("/sitemap.xml")
        ),
    )
}
