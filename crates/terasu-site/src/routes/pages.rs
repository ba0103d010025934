//! Home, profile and contact handlers.

use axum::extract::State;
use axum::response::Response;

use super::draft::Draft;
use super::response::html_response;
use crate::error::SiteError;
use crate::render::PageContext;
use crate::render::contact::contact_page;
use crate::render::home::home_page;
use crate::render::profile::profile_page;
use crate::state::AppState;

/// `GET /`
pub async fn home(
    State(state): State<AppState>,
    Draft(draft): Draft,
) -> Result<Response, SiteError> {
    let (featured, profile) = tokio::try_join!(
        state.store.featured_posts(draft),
        state.store.profile(),
    )?;

    let ctx = PageContext::new(&state, draft, "/");
    let markup = home_page(&ctx, &featured, profile.as_ref());
    Ok(html_response(&state, draft, markup))
}

/// `GET /profile`
pub async fn profile(
    State(state): State<AppState>,
    Draft(draft): Draft,
) -> Result<Response, SiteError> {
    let profile = state.store.profile().await?;
    if profile.is_none() {
        tracing::debug!("no profile document, rendering placeholder");
    }

    let ctx = PageContext::new(&state, draft, "/profile");
    let markup = profile_page(&ctx, profile.as_ref());
    Ok(html_response(&state, draft, markup))
}

/// `GET /contact`
pub async fn contact(
    State(state): State<AppState>,
    Draft(draft): Draft,
) -> Result<Response, SiteError> {
    let profile = state.store.profile().await?;

    let ctx = PageContext::new(&state, draft, "/contact");
    let markup = contact_page(&ctx, profile.as_ref());
    Ok(html_response(&state, draft, markup))
}
