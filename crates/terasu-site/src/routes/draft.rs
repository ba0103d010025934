//! Draft-mode endpoints and the per-request draft-mode extractor.
//!
//! - `GET /api/preview`: validates a studio preview secret, then enables draft
//!   mode and redirects to the previewed path.
//! - `GET /api/draft`: enables draft mode with the configured shared secret.
//! - `GET /api/disable-preview`: clears draft mode.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query, State};
use axum::http::header;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use chrono::Utc;
use serde::Deserialize;
use terasu_core::DraftMode;
use terasu_core::draft::{disable_cookie, enable_cookie, secrets_match};

use crate::error::SiteError;
use crate::state::AppState;

/// Draft mode of the current request, read from the signed `draftMode` cookie.
#[derive(Debug, Clone, Copy, Default)]
pub struct Draft(pub DraftMode);

impl FromRequestParts<AppState> for Draft {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let now = Utc::now();
        let enabled = parts
            .headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .any(|cookies| {
                DraftMode::from_cookie_header(cookies, &state.draft_signer, now).is_enabled()
            });
        Ok(Self(if enabled {
            DraftMode::Enabled
        } else {
            DraftMode::Disabled
        }))
    }
}

/// Only same-site paths are valid redirect targets.
fn root_relative(path: &str) -> Option<&str> {
    let path = path.trim();
    (path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')).then_some(path)
}

/// Percent-encodes everything outside printable ASCII so the target is a
/// valid `Location` value. Existing escapes and URL delimiters are kept.
fn location(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut buf = [0u8; 4];
    for c in path.chars() {
        if c.is_ascii_graphic() {
            out.push(c);
        } else {
            out.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)));
        }
    }
    out
}

fn enable_and_redirect(state: &AppState, target: &str) -> Response {
    let value = state.draft_signer.issue(Utc::now());
    (
        [(header::SET_COOKIE, enable_cookie(&value))],
        Redirect::temporary(&location(target)),
    )
        .into_response()
}

#[derive(Debug, Deserialize)]
pub struct PreviewParams {
    #[serde(rename = "sanity-preview-secret")]
    secret: Option<String>,
    #[serde(rename = "sanity-preview-pathname")]
    pathname: Option<String>,
}

/// `GET /api/preview`
pub async fn preview(
    State(state): State<AppState>,
    Query(params): Query<PreviewParams>,
) -> Result<Response, SiteError> {
    let Some(candidate) = params.secret.as_deref().filter(|s| !s.is_empty()) else {
        return Err(SiteError::Unauthorized("missing preview secret".into()));
    };

    let found = match state.store.preview_secret(candidate).await {
        Ok(found) => found,
        Err(err @ terasu_core::Error::MissingToken(_)) => {
            tracing::error!(error = %err, "cannot validate preview secret");
            return Err(SiteError::Unauthorized("preview secret lookup unavailable".into()));
        }
        Err(err) => return Err(err.into()),
    };

    let valid = found.is_some_and(|s| s.accepts(candidate, Utc::now()));
    if !valid {
        return Err(SiteError::Unauthorized(
            "unknown or expired preview secret".into(),
        ));
    }

    let target = params
        .pathname
        .as_deref()
        .and_then(root_relative)
        .unwrap_or("/");
    tracing::info!(target = %target, "draft mode enabled via preview secret");
    Ok(enable_and_redirect(&state, target))
}

#[derive(Debug, Deserialize)]
pub struct EnableParams {
    slug: Option<String>,
    path: Option<String>,
    secret: Option<String>,
}

/// `GET /api/draft`
pub async fn enable(
    State(state): State<AppState>,
    Query(params): Query<EnableParams>,
) -> Result<Response, SiteError> {
    let Some(expected) = state.config.draft_mode_secret.as_deref() else {
        return Err(SiteError::Unauthorized(
            "DRAFT_MODE_SECRET is not configured".into(),
        ));
    };
    let candidate = params.secret.as_deref().unwrap_or_default();
    if !secrets_match(expected, candidate) {
        return Err(SiteError::Unauthorized("draft secret mismatch".into()));
    }

    let target = match (params.slug.as_deref(), params.path.as_deref()) {
        (Some(slug), _) if !slug.trim().is_empty() => {
            format!("/blog/{}", urlencoding::encode(slug.trim()))
        }
        (_, Some(path)) => root_relative(path).unwrap_or("/").to_string(),
        _ => "/".to_string(),
    };
    tracing::info!(target = %target, "draft mode enabled");
    Ok(enable_and_redirect(&state, &target))
}

/// `GET /api/disable-preview`
pub async fn disable() -> Response {
    tracing::info!("draft mode disabled");
    (
        [(header::SET_COOKIE, disable_cookie())],
        Redirect::temporary("/"),
    )
        .into_response()
}
