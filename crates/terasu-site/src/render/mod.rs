//! HTML rendering.
//!
//! All templates are maud functions returning `Markup`; every dynamic string
//! is escaped by maud. Pages are composed from the shared shell in
//! [`components`] and the Portable Text renderer in [`body`].

pub mod blog;
pub mod body;
pub mod components;
pub mod contact;
pub mod home;
pub mod post;
pub mod profile;
pub mod toc;

use terasu_core::{DraftMode, ImageUrlBuilder};

use crate::config::Config;
use crate::state::AppState;

/// Per-request rendering context.
#[derive(Clone, Copy)]
pub struct PageContext<'a> {
    pub config: &'a Config,
    pub images: &'a ImageUrlBuilder,
    pub draft: DraftMode,
    /// Root-relative path of the page being rendered.
    pub path: &'a str,
}

impl<'a> PageContext<'a> {
    pub fn new(state: &'a AppState, draft: DraftMode, path: &'a str) -> Self {
        Self {
            config: &state.config,
            images: &state.images,
            draft,
            path,
        }
    }

    pub fn canonical_url(&self) -> String {
        self.config.absolute_url(self.path)
    }

    /// `<page> | <site name>`
    pub fn title(&self, page: &str) -> String {
        format!("{page} | {}", self.config.site_name)
    }
}
