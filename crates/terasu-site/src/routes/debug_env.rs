//! `GET /api/debug-env`: which credentials are configured, never their values.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::config::LOCAL_PROJECT_ID;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvFlags {
    has_read_token: bool,
    has_write_token: bool,
    has_project_id: bool,
    has_dataset: bool,
    has_draft_secret: bool,
    content_backend: &'static str,
    app_env: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DebugEnvResponse {
    message: &'static str,
    env: EnvFlags,
    timestamp: String,
}

pub async fn debug_env(State(state): State<AppState>) -> Json<DebugEnvResponse> {
    let config = &state.config;
    let sanity = &config.sanity;
    Json(DebugEnvResponse {
        message: "Environment debug info",
        env: EnvFlags {
            has_read_token: sanity.read_token.is_some(),
            has_write_token: sanity.write_token.is_some(),
            has_project_id: sanity.project_id != LOCAL_PROJECT_ID,
            has_dataset: !sanity.dataset.is_empty(),
            has_draft_secret: config.draft_mode_secret.is_some(),
            content_backend: state.store.backend_name(),
            app_env: config.app_env.clone(),
        },
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
