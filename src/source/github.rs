//! GitHub repository source strategy.
//!
//! Downloads a single file through the REST contents API using the raw media
//! type, so the response body is the file itself rather than base64 JSON.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::RetrievalError;

/// GitHub REST API base URL.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Configuration for GitHub downloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// API base URL (overridable for GitHub Enterprise).
    pub api_base: String,
    /// Personal access token, read from `GITHUB_TOKEN` when not set.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: GITHUB_API_BASE.to_string(),
            token: std::env::var("GITHUB_TOKEN").ok(),
            timeout_secs: 30,
        }
    }
}

/// Downloads bot sources from GitHub.
///
/// The HTTP client is built on first use, so a TLS backend that fails to
/// initialize surfaces as a `RetrievalError` from `download`.
#[derive(Debug, Clone)]
pub struct GithubSource {
    config: GithubConfig,
    client: OnceCell<Client>,
}

impl GithubSource {
    pub fn new(config: GithubConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> Result<&Client, RetrievalError> {
        self.client
            .get_or_try_init(|| async {
                Client::builder()
                    .timeout(Duration::from_secs(self.config.timeout_secs))
                    .build()
                    .map_err(RetrievalError::from)
            })
            .await
    }

    /// Builds the contents API URL for a file.
    pub fn contents_url(&self, owner: &str, repo: &str, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.config.api_base.trim_end_matches('/'),
            owner,
            repo,
            path.trim_matches('/')
        )
    }

    /// Fetches the raw bytes of `path` in `owner/repo` on the default branch.
    pub async fn download(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Vec<u8>, RetrievalError> {
        let url = self.contents_url(owner, repo, path);
        debug!(%url, "Downloading bot source from GitHub");

        let mut request = self
            .client()
            .await?
            .get(&url)
            .header("User-Agent", "botblitz-engine/0.1")
            .header("Accept", "application/vnd.github.raw+json")
            .header("X-GitHub-Api-Version", "2022-11-28");

        if let Some(token) = &self.config.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request.send().await?;
        let status = response.status();

        match status {
            s if s.is_success() => Ok(response.bytes().await?.to_vec()),
            StatusCode::NOT_FOUND => Err(RetrievalError::NotFound {
                owner: owner.to_string(),
                repo: repo.to_string(),
                path: path.to_string(),
            }),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(RetrievalError::Unauthorized {
                owner: owner.to_string(),
                repo: repo.to_string(),
                status: status.as_u16(),
            }),
            _ => Err(RetrievalError::HttpStatus {
                url,
                status: status.as_u16(),
            }),
        }
    }
}

impl Default for GithubSource {
    fn default() -> Self {
        Self::new(GithubConfig::default())
    }
}
