//! GitHub API configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Environment variable consulted when no token is configured.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// GitHub API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubConfig {
    /// API token (personal access or installation token)
    pub token: Option<String>,

    /// API base URL (GitHub Enterprise installs use their own)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Depth bound of repository tree walks
    #[serde(default = "default_max_tree_depth")]
    pub max_tree_depth: usize,
}

impl GitHubConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a token is configured
    pub fn has_token(&self) -> bool {
        self.token.as_ref().is_some_and(|t| !t.is_empty())
    }

    /// Validate GitHub configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.api_base_url.starts_with("https://") && !self.api_base_url.starts_with("http://")
        {
            return Err(ValidationError::InvalidApiUrl(self.api_base_url.clone()));
        }
        if self.max_tree_depth == 0 {
            return Err(ValidationError::InvalidTreeDepth);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base_url: default_api_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
            max_tree_depth: default_max_tree_depth(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    format!("repo-dossier/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout() -> u64 {
    15
}

fn default_max_tree_depth() -> usize {
    6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GitHubConfig::default();
        assert_eq!(config.api_base_url, "https://api.github.com");
        assert_eq!(config.max_tree_depth, 6);
        assert!(!config.has_token());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_token_is_not_a_token() {
        let config = GitHubConfig {
            token: Some(String::new()),
            ..Default::default()
        };
        assert!(!config.has_token());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config = GitHubConfig {
            api_base_url: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidApiUrl(_))
        ));
    }

    #[test]
    fn rejects_zero_depth() {
        let config = GitHubConfig {
            max_tree_depth: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTreeDepth)
        ));
    }
}
