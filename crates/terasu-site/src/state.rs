//! Application state shared across all request handlers.

use std::sync::Arc;

use terasu_core::{ContentStore, CookieSigner, ImageUrlBuilder, SanityClient, SnapshotStore};

use crate::config::Config;

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Where posts, taxonomies and the profile are read from.
    pub store: Arc<ContentStore>,

    /// Application configuration.
    pub config: Arc<Config>,

    /// Image CDN URL builder for the configured project.
    pub images: ImageUrlBuilder,

    /// Signs and checks draft-mode cookies.
    pub draft_signer: CookieSigner,
}

impl AppState {
    /// Create application state, opening the content store the config selects.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store = match &config.content_snapshot {
            Some(path) => ContentStore::Snapshot(SnapshotStore::open(path)?),
            None => ContentStore::Sanity(SanityClient::new(config.sanity.clone())?),
        };
        Ok(Self::with_store(config, store))
    }

    /// Create application state around an existing store.
    pub fn with_store(config: Config, store: ContentStore) -> Self {
        let images = ImageUrlBuilder::new(&config.sanity.project_id, &config.sanity.dataset);
        let draft_signer = match &config.draft_cookie_key {
            Some(key) => CookieSigner::new(key.as_bytes()),
            None => {
                tracing::warn!("DRAFT_COOKIE_KEY not set; draft sessions end on restart");
                CookieSigner::random()
            }
        };

        tracing::info!(
            backend = store.backend_name(),
            project_id = %config.sanity.project_id,
            dataset = %config.sanity.dataset,
            "application state initialized"
        );

        Self {
            store: Arc::new(store),
            config: Arc::new(config),
            images,
            draft_signer,
        }
    }
}
