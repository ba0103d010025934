//! Error types for the site.
//!
//! Page errors are rendered as simple HTML error pages. `Unauthorized` is
//! only raised by the draft-mode API endpoints and answers in plain text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, PreEscaped, html};

/// Site error type.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// The requested post, category or tag does not exist (or is not visible).
    #[error("not found: {0}")]
    NotFound(String),

    /// A draft-mode endpoint was called without a valid secret.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Malformed request parameters.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Content store failure.
    #[error("content error: {0}")]
    Content(#[from] terasu_core::Error),

    /// Internal server error (rendering, serialization, etc.).
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            Self::Unauthorized(msg) => {
                tracing::warn!(reason = %msg, "rejected draft mode request");
                return (StatusCode::UNAUTHORIZED, "Invalid secret").into_response();
            }
            Self::NotFound(what) => {
                tracing::debug!(what = %what, "not found");
                (
                    StatusCode::NOT_FOUND,
                    "ページが見つかりません",
                    "お探しのページは存在しないか、移動した可能性があります。".to_string(),
                )
            }
            Self::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "不正なリクエスト",
                format!("リクエストを処理できませんでした: {msg}"),
            ),
            Self::Content(err) => {
                tracing::error!(error = %err, "content store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "エラーが発生しました",
                    "コンテンツを取得できませんでした。しばらくしてから再度お試しください。"
                        .to_string(),
                )
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "エラーが発生しました",
                    "内部エラーが発生しました。しばらくしてから再度お試しください。".to_string(),
                )
            }
        };

        let markup = html! {
            (DOCTYPE)
            html lang="ja" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (title) }
                    meta name="robots" content="noindex";
                    style { (PreEscaped(crate::render::components::ERROR_CSS)) }
                }
                body {
                    main class="error-page" {
                        p class="error-code" { (status.as_u16()) }
                        h1 { (title) }
                        p { (message) }
                        a href="/" { "ホームに戻る" }
                    }
                }
            }
        };

        (status, markup).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_not_found() {
        let err = SiteError::NotFound("post hello".to_string());
        assert_eq!(err.to_string(), "not found: post hello");
    }

    #[test]
    fn error_display_content() {
        let err = SiteError::Content(terasu_core::Error::MissingToken("SANITY_API_TOKEN"));
        assert_eq!(
            err.to_string(),
            "content error: missing credential: SANITY_API_TOKEN is not configured"
        );
    }

    #[test]
    fn error_into_response_not_found() {
        let response = SiteError::NotFound("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn error_into_response_unauthorized() {
        let response = SiteError::Unauthorized("bad secret".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get("set-cookie").is_none());
    }

    #[test]
    fn error_into_response_bad_request() {
        let response = SiteError::BadRequest("page".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn error_into_response_content() {
        let err = SiteError::Content(terasu_core::Error::Api {
            status: 500,
            message: "boom".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_into_response_internal() {
        let response = SiteError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
