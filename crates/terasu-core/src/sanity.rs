//! HTTP client for the Sanity content API.
//!
//! Reads go to the live API host (`<project>.api.sanity.io`), never the CDN,
//! so edits show up on the next request. There are three credential tiers:
//!
//! - **Public**: no token, published documents only.
//! - **Preview**: the read token, which can see drafts.
//! - **Write**: the write token, used only by the admin tool for mutations.

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::draft::DraftMode;
use crate::error::{Error, Result};

/// Request timeout for every API call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("terasu/", env!("CARGO_PKG_VERSION"));

/// First API version that calls the draft overlay perspective `drafts`.
/// Earlier versions name it `previewDrafts`.
const DRAFTS_PERSPECTIVE_SINCE: &str = "2025-02-19";

/// Connection settings for one project/dataset.
#[derive(Debug, Clone)]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    /// Dated API version, e.g. `2025-02-19`.
    pub api_version: String,
    /// Overrides `https://<project>.api.sanity.io`.
    pub api_url: Option<String>,
    /// Token that can read drafts.
    pub read_token: Option<String>,
    /// Token that can write documents.
    pub write_token: Option<String>,
}

/// Which credentials a request is made with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Public,
    Preview,
    Write,
}

impl Tier {
    /// Environment variable holding this tier's token.
    pub fn token_var(self) -> &'static str {
        match self {
            Self::Public => "",
            Self::Preview => "SANITY_API_READ_TOKEN",
            Self::Write => "SANITY_API_TOKEN",
        }
    }
}

#[derive(Deserialize)]
struct QueryResponse<T> {
    result: T,
}

/// Client for the query and mutation endpoints.
#[derive(Debug, Clone)]
pub struct SanityClient {
    http: reqwest::Client,
    config: SanityConfig,
}

impl SanityClient {
    pub fn new(config: SanityConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &SanityConfig {
        &self.config
    }

    fn api_base(&self) -> String {
        let host = match &self.config.api_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.api.sanity.io", self.config.project_id),
        };
        format!(
            "{host}/v{}",
            self.config.api_version.trim_start_matches('v')
        )
    }

    pub fn query_url(&self) -> String {
        format!("{}/data/query/{}", self.api_base(), self.config.dataset)
    }

    pub fn mutate_url(&self) -> String {
        format!("{}/data/mutate/{}", self.api_base(), self.config.dataset)
    }

    /// Picks the read tier for a draft mode.
    ///
    /// Draft mode without a read token falls back to the public tier.
    pub fn tier_for(&self, mode: DraftMode) -> Tier {
        match mode {
            DraftMode::Disabled => Tier::Public,
            DraftMode::Enabled if self.config.read_token.is_some() => Tier::Preview,
            DraftMode::Enabled => {
                tracing::warn!(
                    "Draft mode requested but SANITY_API_READ_TOKEN is not set; serving published content"
                );
                Tier::Public
            }
        }
    }

    fn token(&self, tier: Tier) -> Result<Option<&str>> {
        let token = match tier {
            Tier::Public => return Ok(None),
            Tier::Preview => self.config.read_token.as_deref(),
            Tier::Write => self.config.write_token.as_deref(),
        };
        token
            .filter(|t| !t.is_empty())
            .map(Some)
            .ok_or(Error::MissingToken(tier.token_var()))
    }

    /// Runs a query in the given draft mode and decodes its `result`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        query: &str,
        params: &[(&str, Value)],
        mode: DraftMode,
    ) -> Result<T> {
        let tier = self.tier_for(mode);
        let perspective = self.perspective(tier, mode);
        self.fetch_as(query, params, tier, perspective).await
    }

    /// Perspective name for a read, as spelled by the configured API version.
    fn perspective(&self, tier: Tier, mode: DraftMode) -> &'static str {
        let version = self.config.api_version.trim_start_matches('v');
        match tier {
            Tier::Public => "published",
            _ if mode.is_enabled() && version < DRAFTS_PERSPECTIVE_SINCE => "previewDrafts",
            _ => mode.perspective(),
        }
    }

    /// Runs a query with explicit credentials and perspective.
    pub async fn fetch_as<T: DeserializeOwned>(
        &self,
        query: &str,
        params: &[(&str, Value)],
        tier: Tier,
        perspective: &str,
    ) -> Result<T> {
        let mut pairs = vec![
            ("query".to_string(), query.to_string()),
            ("perspective".to_string(), perspective.to_string()),
        ];
        pairs.extend(encode_params(params));

        let mut request = self.http.get(self.query_url()).query(&pairs);
        if let Some(token) = self.token(tier)? {
            request = request.bearer_auth(token);
        }

        tracing::debug!(tier = ?tier, perspective, "Querying content API");
        let response = check_response(request.send().await?).await?;
        let body = response.bytes().await?;
        let decoded: QueryResponse<T> = serde_json::from_slice(&body)?;
        Ok(decoded.result)
    }

    /// Applies a batch of mutations with the write token.
    pub async fn mutate(&self, mutations: Vec<Value>) -> Result<()> {
        let token = self.token(Tier::Write)?.unwrap_or_default();
        let count = mutations.len();
        let response = self
            .http
            .post(self.mutate_url())
            .bearer_auth(token)
            .query(&[("returnIds", "true")])
            .json(&serde_json::json!({ "mutations": mutations }))
            .send()
            .await?;
        check_response(response).await?;
        tracing::info!("Applied {} mutation(s)", count);
        Ok(())
    }
}

/// Query parameters are sent as `$name=<json>`.
fn encode_params(params: &[(&str, Value)]) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(name, value)| (format!("${name}"), value.to_string()))
        .collect()
}

/// Maps a non-success status to [`Error::Api`] with the response body.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
    if !response.status().is_success() {
        return Err(Error::Api {
            status: response.status().as_u16(),
            message: response.text().await.unwrap_or_default(),
        });
    }
    Ok(response)
}
