//! Terasu site: a server-rendered blog over the Sanity content API.
//!
//! # Architecture
//!
//! - **Store**: posts, taxonomies and the profile come from
//!   [`terasu_core::ContentStore`], either the remote API or a local export
//! - **Render**: HTML is generated with maud (compile-time templates); Portable
//!   Text bodies are rendered block by block
//! - **Draft mode**: a signed `draftMode` cookie, read once per request, decides
//!   whether unpublished content is visible
//!
//! # Security
//!
//! - All dynamic content is HTML-escaped by maud
//! - Link and embed URLs are scheme-checked before use in attributes
//! - Content-Security-Policy forbids scripts; framing is limited to the site
//!   itself and the configured studio origins
//! - Draft mode can only be enabled with a valid preview or shared secret

pub mod config;
pub mod error;
pub mod render;
pub mod routes;
pub mod state;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
