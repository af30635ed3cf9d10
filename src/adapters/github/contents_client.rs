//! GitHub Contents Client - Implementation of RepositoryContents over the
//! GitHub REST contents API.
//!
//! `GET {base}/repos/{owner}/{repo}/contents/{path}` returns the immediate
//! entries of a directory. A file path returns a single object instead of an
//! array; that is reported as a one-entry listing.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GitHubClientConfig::new(token)
//!     .with_base_url("https://github.example.com/api/v3");
//!
//! let client = GitHubContentsClient::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::config::GitHubConfig;
use crate::ports::{ContentEntry, ContentsError, RepositoryContents};

/// GitHub REST API version header value.
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Configuration for the GitHub contents client.
#[derive(Debug, Clone)]
pub struct GitHubClientConfig {
    /// API token; requests fail with `MissingCredential` without one.
    token: Option<Secret<String>>,
    /// Base URL for the API (default: https://api.github.com).
    pub base_url: String,
    /// User-Agent header value (GitHub rejects requests without one).
    pub user_agent: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GitHubClientConfig {
    /// Creates a new configuration with the given token.
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()).map(Secret::new),
            base_url: "https://api.github.com".to_string(),
            user_agent: format!("repo-dossier/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(15),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the token (for making requests).
    fn token(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.expose_secret().as_str())
    }
}

impl From<&GitHubConfig> for GitHubClientConfig {
    fn from(config: &GitHubConfig) -> Self {
        let mut client_config = Self::new(config.token.clone())
            .with_base_url(config.api_base_url.clone())
            .with_timeout(config.timeout());
        client_config.user_agent = config.user_agent.clone();
        client_config
    }
}

/// Listing response: an array for directories, an object for a file path.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentsResponse {
    Listing(Vec<ContentEntry>),
    Single(ContentEntry),
}

/// Error body returned by the GitHub API.
#[derive(Debug, Deserialize)]
struct GitHubErrorBody {
    message: String,
}

/// GitHub contents API client.
pub struct GitHubContentsClient {
    config: GitHubClientConfig,
    client: Client,
}

impl GitHubContentsClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: GitHubClientConfig) -> Result<Self, ContentsError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ContentsError::upstream(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the contents URL, percent-encoding every path segment.
    fn contents_url(&self, owner: &str, repo: &str, path: &str) -> Result<Url, ContentsError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| ContentsError::upstream(format!("Invalid API base URL: {}", e)))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ContentsError::upstream("Invalid API base URL: cannot be a base"))?;
            segments
                .pop_if_empty()
                .extend(["repos", owner, repo, "contents"])
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        Ok(url)
    }

    /// Maps a non-success status to a contents error.
    async fn handle_response_status(
        &self,
        response: Response,
        what: &str,
    ) -> Result<Response, ContentsError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<GitHubErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or_else(|_| body.trim().to_string());

        match status {
            StatusCode::UNAUTHORIZED => Err(ContentsError::Unauthorized(message)),
            StatusCode::NOT_FOUND => Err(ContentsError::not_found(what)),
            _ => Err(ContentsError::upstream(format!(
                "GitHub returned {}: {}",
                status, message
            ))),
        }
    }
}

#[async_trait]
impl RepositoryContents for GitHubContentsClient {
    async fn list_directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Vec<ContentEntry>, ContentsError> {
        let token = self.config.token().ok_or(ContentsError::MissingCredential)?;
        let url = self.contents_url(owner, repo, path)?;
        let what = if path.is_empty() {
            format!("{}/{}", owner, repo)
        } else {
            format!("{}/{}/{}", owner, repo, path)
        };

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ContentsError::upstream(format!("GitHub request timed out: {}", e))
                } else {
                    ContentsError::upstream(e.to_string())
                }
            })?;

        let response = self.handle_response_status(response, &what).await?;

        let listing: ContentsResponse = response
            .json()
            .await
            .map_err(|e| ContentsError::upstream(format!("Failed to parse listing: {}", e)))?;

        Ok(match listing {
            ContentsResponse::Listing(entries) => entries,
            ContentsResponse::Single(entry) => vec![entry],
        })
    }
}
