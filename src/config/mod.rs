//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `REPO_DOSSIER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use repo_dossier::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.listen_addr);
//! ```

mod browser;
mod dossier;
mod error;
mod github;
mod server;

pub use browser::{BrowserConfig, CHROME_EXECUTABLE_ENV};
pub use dossier::DossierConfig;
pub use error::{ConfigError, ValidationError};
pub use github::{GitHubConfig, GITHUB_TOKEN_ENV};
pub use server::{LogFormat, ServerConfig};

use serde::Deserialize;

/// Port variable set by container platforms; used when no listen address is configured.
pub const PORT_ENV: &str = "PORT";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// (if unauthenticated) configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Listener, logging and request limits
    #[serde(default)]
    pub server: ServerConfig,

    /// GitHub API access and tree walk bound
    #[serde(default)]
    pub github: GitHubConfig,

    /// Headless browser used for PDF export
    #[serde(default)]
    pub browser: BrowserConfig,

    /// Dossier template overrides
    #[serde(default)]
    pub dossier: DossierConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `REPO_DOSSIER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Falls back to `GITHUB_TOKEN` and `CHROME_EXECUTABLE_PATH` for the
    ///    token and browser path when the prefixed keys are absent
    /// 5. Takes the listen port from `PORT` when no listen address is configured
    ///
    /// # Environment Variable Format
    ///
    /// - `REPO_DOSSIER__SERVER__LISTEN_ADDR=127.0.0.1:8080` -> `server.listen_addr`
    /// - `REPO_DOSSIER__GITHUB__MAX_TREE_DEPTH=4` -> `github.max_tree_depth = 4`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("REPO_DOSSIER")
                    .separator("__"),
            )
            .build()?;
        let listen_addr_set = settings.get_string("server.listen_addr").is_ok();
        let mut config: AppConfig = settings.try_deserialize()?;

        if !listen_addr_set {
            if let Some(port) = std::env::var(PORT_ENV).ok().and_then(|p| p.parse().ok()) {
                config.server = config.server.with_port(port);
            }
        }

        if config.github.token.is_none() {
            config.github.token = std::env::var(GITHUB_TOKEN_ENV).ok();
        }
        if config.browser.executable_path.is_none() {
            config.browser.executable_path = std::env::var_os(CHROME_EXECUTABLE_ENV).map(Into::into);
        }

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.github.validate()?;
        self.browser.validate()?;

        // The request timeout layer answers with a bare 408, so a render must give up first.
        if self.browser.render_timeout_secs >= self.server.request_timeout_secs {
            return Err(ValidationError::RenderTimeoutExceedsRequest {
                render_secs: self.browser.render_timeout_secs,
                request_secs: self.server.request_timeout_secs,
            });
        }
        Ok(())
    }
}
