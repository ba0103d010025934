//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use anyhow::bail;
use terasu_core::SanityConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:3000").
    pub bind_addr: String,

    /// Public base URL, used in canonical links, share links and the site map.
    pub base_url: String,

    /// Site name shown in page titles and the manifest.
    pub site_name: String,

    /// Short name for the manifest.
    pub site_short_name: String,

    /// Default meta description.
    pub site_description: String,

    /// Manifest theme color.
    pub theme_color: String,

    /// Origins allowed to frame the site (the studio's preview pane).
    pub studio_origins: Vec<String>,

    /// Shared secret for `/api/draft`. Draft mode cannot be enabled there without it.
    pub draft_mode_secret: Option<String>,

    /// Key that signs draft-mode cookies. Random per process when unset.
    pub draft_cookie_key: Option<String>,

    /// Content API connection.
    pub sanity: SanityConfig,

    /// Serve content from this NDJSON export instead of the API.
    pub content_snapshot: Option<PathBuf>,

    /// Deployment environment label ("development", "production", ...).
    pub app_env: String,
}

/// Placeholder project id when content comes only from a snapshot.
pub const LOCAL_PROJECT_ID: &str = "local";

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `SANITY_PROJECT_ID`, unless `CONTENT_SNAPSHOT` is set
    ///
    /// Optional:
    /// - `SITE_BIND_ADDR`: Server bind address (default: "0.0.0.0:3000")
    /// - `SITE_BASE_URL`: Public base URL (default: "http://localhost:3000")
    /// - `SITE_NAME`, `SITE_SHORT_NAME`, `SITE_DESCRIPTION`: Site identity
    /// - `SITE_THEME_COLOR`: Manifest theme color (default: "#3b82f6")
    /// - `STUDIO_ORIGINS`: Comma-separated origins allowed to frame pages
    /// - `DRAFT_MODE_SECRET`: Secret required by `/api/draft`
    /// - `DRAFT_COOKIE_KEY`: Signing key for the draft-mode cookie (default: random per process)
    /// - `SANITY_DATASET` (default: "production"), `SANITY_API_VERSION` (default: "2025-02-19")
    /// - `SANITY_API_URL`: Override the API host
    /// - `SANITY_API_READ_TOKEN`: Token for draft reads
    /// - `SANITY_API_TOKEN`: Token for writes (admin tool only)
    /// - `CONTENT_SNAPSHOT`: Path to an NDJSON dataset export
    /// - `APP_ENV`: Environment label (default: "development")
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = env_or("SITE_BIND_ADDR", "0.0.0.0:3000");

        let base_url = env_or("SITE_BASE_URL", "http://localhost:3000")
            .trim_end_matches('/')
            .to_string();

        let site_name = env_or("SITE_NAME", "KOKORO TERASU 破");
        let site_short_name = env_or("SITE_SHORT_NAME", "TERASU");
        let site_description = env_or(
            "SITE_DESCRIPTION",
            "最新のテクノロジーとライフスタイルについて発信するブログサイトです。",
        );
        let theme_color = env_or("SITE_THEME_COLOR", "#3b82f6");

        let studio_origins: Vec<String> = std::env::var("STUDIO_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| s.starts_with("https://") || s.starts_with("http://"))
            .collect();

        let content_snapshot = env_opt("CONTENT_SNAPSHOT").map(PathBuf::from);
        let project_id = env_opt("SANITY_PROJECT_ID");
        if project_id.is_none() && content_snapshot.is_none() {
            bail!("SANITY_PROJECT_ID must be set (or CONTENT_SNAPSHOT for local content)");
        }

        let sanity = SanityConfig {
            project_id: project_id.unwrap_or_else(|| LOCAL_PROJECT_ID.to_string()),
            dataset: env_or("SANITY_DATASET", "production"),
            api_version: env_or("SANITY_API_VERSION", "2025-02-19"),
            api_url: env_opt("SANITY_API_URL"),
            read_token: env_opt("SANITY_API_READ_TOKEN"),
            write_token: env_opt("SANITY_API_TOKEN"),
        };

        let draft_mode_secret = env_opt("DRAFT_MODE_SECRET");
        let draft_cookie_key = env_opt("DRAFT_COOKIE_KEY");
        let app_env = env_or("APP_ENV", "development");

        tracing::info!(
            bind_addr = %bind_addr,
            base_url = %base_url,
            site_name = %site_name,
            project_id = %sanity.project_id,
            dataset = %sanity.dataset,
            has_read_token = sanity.read_token.is_some(),
            has_draft_secret = draft_mode_secret.is_some(),
            has_cookie_key = draft_cookie_key.is_some(),
            studio_origins = studio_origins.len(),
            snapshot = ?content_snapshot,
            app_env = %app_env,
            "site configuration loaded"
        );

        Ok(Self {
            bind_addr,
            base_url,
            site_name,
            site_short_name,
            site_description,
            theme_color,
            studio_origins,
            draft_mode_secret,
            draft_cookie_key,
            sanity,
            content_snapshot,
            app_env,
        })
    }

    /// Absolute URL for a root-relative path.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
