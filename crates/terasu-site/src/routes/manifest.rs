//! `GET /manifest.webmanifest`

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WebManifest<'a> {
    name: &'a str,
    short_name: &'a str,
    description: &'a str,
    start_url: &'static str,
    display: &'static str,
    background_color: &'static str,
    theme_color: &'a str,
    icons: [ManifestIcon; 2],
}

#[derive(Debug, Serialize)]
pub struct ManifestIcon {
    src: &'static str,
    sizes: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
}

const ICONS: [ManifestIcon; 2] = [
    ManifestIcon {
        src: "/icon-192x192.png",
        sizes: "192x192",
        kind: "image/png",
    },
    ManifestIcon {
        src: "/icon-512x512.png",
        sizes: "512x512",
        kind: "image/png",
    },
];

/// Serve the web-app manifest built from the site config.
pub async fn manifest(State(state): State<AppState>) -> Response {
    let config = &state.config;
    let manifest = WebManifest {
        name: &config.site_name,
        short_name: &config.site_short_name,
        description: &config.site_description,
        start_url: "/",
        display: "standalone",
        background_color: "#ffffff",
        theme_color: &config.theme_color,
        icons: ICONS,
    };
    (
        [
            (header::CONTENT_TYPE, "application/manifest+json"),
            (header::CACHE_CONTROL, "public, max-age=31536000, immutable"),
        ],
        Json(manifest),
    )
        .into_response()
}
