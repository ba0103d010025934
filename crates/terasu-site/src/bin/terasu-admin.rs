//! Content maintenance tool.
//!
//! # Usage
//!
//! ```bash
//! # Create or patch the profile singleton (needs SANITY_API_TOKEN)
//! terasu-admin upsert-profile --file profile.json
//!
//! # Exercise every read path and report what fails
//! terasu-admin check
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use terasu_core::{ContentStore, DraftMode, Profile};
use terasu_site::{AppState, Config};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Content maintenance tool for the Terasu blog.
#[derive(Parser, Debug)]
#[command(name = "terasu-admin")]
#[command(about = "Maintain and diagnose Terasu blog content")]
#[command(version)]
struct Args {
    /// Path to .env file (optional).
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the profile document, or patch it if it exists.
    UpsertProfile {
        /// JSON file with profile fields (camelCase, as stored).
        #[arg(long)]
        file: PathBuf,
    },
    /// Fetch posts through both tiers plus taxonomies and the profile.
    Check,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    if Path::new(&args.dotenv).exists() {
        dotenvy::from_path(&args.dotenv)?;
    }

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::new(Config::from_env()?)?;

    match args.command {
        Command::UpsertProfile { file } => {
            upsert_profile(&state.store, &file).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check => Ok(check(&state.store).await),
    }
}

async fn upsert_profile(store: &ContentStore, file: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read profile file: {}", file.display()))?;
    let profile: Profile = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid profile JSON in {}", file.display()))?;

    let id = store
        .upsert_profile(&profile)
        .await
        .context("Failed to write profile")?;
    tracing::info!(id = %id, name = %profile.name, "profile saved");
    Ok(())
}

/// Runs every check, logging each outcome. Fails if any check failed.
async fn check(store: &ContentStore) -> ExitCode {
    tracing::info!(backend = store.backend_name(), "checking content store");
    let mut failures = 0usize;

    for mode in [DraftMode::Disabled, DraftMode::Enabled] {
        match store.list_posts(mode, 0..terasu_core::DEFAULT_PAGE_SIZE).await {
            Ok(posts) => {
                let drafts = posts.iter().filter(|p| p.draft).count();
                tracing::info!(
                    perspective = mode.perspective(),
                    count = posts.len(),
                    drafts,
                    "posts ok"
                );
                for post in &posts {
                    tracing::debug!(
                        slug = %post.slug,
                        title = %post.title,
                        draft = post.draft,
                        "post"
                    );
                }
            }
            Err(e) => {
                failures += 1;
                tracing::error!(perspective = mode.perspective(), error = %e, "posts failed");
            }
        }
    }

    match store.categories().await {
        Ok(categories) => tracing::info!(count = categories.len(), "categories ok"),
        Err(e) => {
            failures += 1;
            tracing::error!(error = %e, "categories failed");
        }
    }

    match store.tags().await {
        Ok(tags) => tracing::info!(count = tags.len(), "tags ok"),
        Err(e) => {
            failures += 1;
            tracing::error!(error = %e, "tags failed");
        }
    }

    match store.profile().await {
        Ok(Some(profile)) => tracing::info!(name = %profile.name, "profile ok"),
        Ok(None) => tracing::warn!("no profile document"),
        Err(e) => {
            failures += 1;
            tracing::error!(error = %e, "profile failed");
        }
    }

    if failures == 0 {
        tracing::info!("all checks passed");
        ExitCode::SUCCESS
    } else {
        tracing::error!(failures, "some checks failed");
        ExitCode::FAILURE
    }
}
