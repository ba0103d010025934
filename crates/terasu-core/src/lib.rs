//! Core types and content access for the Terasu blog.
//!
//! This crate provides:
//! - The content model (posts, categories, tags, the profile singleton)
//! - Portable Text blocks plus the local transforms the site needs on them
//!   (heading ids, table parsing, embed classification)
//! - The content store: the remote Sanity query API, or a local NDJSON
//!   export snapshot for development and tests
//! - The fixed set of query templates used by the site
//! - Draft-mode state and image URL construction
//! - Shared error types

pub mod draft;
mod error;
pub mod groq;
pub mod image;
pub mod model;
pub mod portable_text;
pub mod queries;
pub mod sanity;
pub mod snapshot;

// ═══════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════

/// Page size used by listing pages.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Number of posts shown in the featured strip on the home page.
pub const FEATURED_LIMIT: usize = 5;

/// Upper bound on posts enumerated for the site map.
pub const SITEMAP_POST_LIMIT: usize = 1000;

pub use draft::{CookieSigner, DraftMode};
pub use error::{Error, Result};
pub use image::ImageUrlBuilder;
pub use model::{
    AssetRef, Category, CategoryRef, Experience, ImageRef, Post, PreviewSecret, Profile,
    SocialLinks, Tag, TagRef,
};
pub use portable_text::Block;
pub use queries::ContentStore;
pub use sanity::{SanityClient, SanityConfig};
pub use snapshot::SnapshotStore;
