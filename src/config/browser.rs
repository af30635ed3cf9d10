//! Headless browser configuration (PDF export)

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Environment variable consulted when no executable path is configured.
pub const CHROME_EXECUTABLE_ENV: &str = "CHROME_EXECUTABLE_PATH";

/// Headless browser configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    /// Explicit browser executable path
    pub executable_path: Option<PathBuf>,

    /// Extra locally installed executables to try first (comma-separated)
    pub local_candidates: Option<String>,

    /// Directory the cloud-packaged Chromium build is downloaded into
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Upper bound for launch + render + print, in seconds
    #[serde(default = "default_render_timeout")]
    pub render_timeout_secs: u64,

    /// Launch Chromium with `--no-sandbox` (needed in most containers)
    #[serde(default = "default_no_sandbox")]
    pub no_sandbox: bool,
}

impl BrowserConfig {
    /// Render timeout as Duration
    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }

    /// Extra local candidates as paths
    pub fn local_candidate_list(&self) -> Vec<PathBuf> {
        self.local_candidates
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Validate browser configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.render_timeout_secs == 0 || self.render_timeout_secs > 900 {
            return Err(ValidationError::InvalidRenderTimeout);
        }
        Ok(())
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            executable_path: None,
            local_candidates: None,
            download_dir: default_download_dir(),
            render_timeout_secs: default_render_timeout(),
            no_sandbox: default_no_sandbox(),
        }
    }
}

fn default_download_dir() -> PathBuf {
    std::env::temp_dir().join("repo-dossier-chromium")
}

fn default_render_timeout() -> u64 {
    60
}

fn default_no_sandbox() -> bool {
    true
}
