//! Browser executable resolvers.
//!
//! PDF export needs a Chromium executable. Resolution is an ordered chain of
//! independent strategies, stopping at the first one that yields a path that
//! exists on disk:
//!
//! 1. `LocalInstallResolver` - a browser already installed on the host
//! 2. `ExplicitPathResolver` - the configured / `CHROME_EXECUTABLE_PATH` path
//! 3. `CloudPackagedResolver` - on Linux inside a recognized serverless or
//!    cloud runtime, download a packaged Chromium build
//!
//! When nothing resolves, export fails with a configuration error instead of
//! attempting a launch.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};

use crate::config::BrowserConfig;
use crate::ports::{BrowserResolver, ExportError};

/// Absolute install locations checked on every host.
const WELL_KNOWN_EXECUTABLES: &[&str] = &[
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/snap/bin/chromium",
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
];

/// Executable names looked up on `PATH`.
const PATH_EXECUTABLE_NAMES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "chrome",
];

async fn is_executable_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

// ════════════════════════════════════════════════════════════════════════════════
// Local install
// ════════════════════════════════════════════════════════════════════════════════

/// Finds a browser installed on the host.
#[derive(Debug, Clone)]
pub struct LocalInstallResolver {
    candidates: Vec<PathBuf>,
    search_path: Option<OsString>,
}

impl LocalInstallResolver {
    /// Configured candidates first, then well-known locations, then `PATH`.
    pub fn system(extra_candidates: Vec<PathBuf>) -> Self {
        let mut candidates = extra_candidates;
        candidates.extend(WELL_KNOWN_EXECUTABLES.iter().map(PathBuf::from));
        Self {
            candidates,
            search_path: std::env::var_os("PATH"),
        }
    }

    /// Only the given candidates, no `PATH` search.
    pub fn from_candidates(candidates: Vec<PathBuf>) -> Self {
        Self {
            candidates,
            search_path: None,
        }
    }

    fn path_candidates(&self) -> Vec<PathBuf> {
        let Some(search_path) = &self.search_path else {
            return Vec::new();
        };
        std::env::split_paths(search_path)
            .flat_map(|dir| PATH_EXECUTABLE_NAMES.iter().map(move |name| dir.join(name)))
            .collect()
    }
}

#[async_trait]
impl BrowserResolver for LocalInstallResolver {
    fn name(&self) -> &'static str {
        "local-install"
    }

    async fn resolve(&self) -> Option<PathBuf> {
        for candidate in self.candidates.iter().cloned().chain(self.path_candidates()) {
            if is_executable_file(&candidate).await {
                return Some(candidate);
            }
        }
        None
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Explicit path
// ════════════════════════════════════════════════════════════════════════════════

/// Uses an explicitly configured executable path, if it exists.
#[derive(Debug, Clone)]
pub struct ExplicitPathResolver {
    path: Option<PathBuf>,
}

impl ExplicitPathResolver {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

#[async_trait]
impl BrowserResolver for ExplicitPathResolver {
    fn name(&self) -> &'static str {
        "explicit-path"
    }

    async fn resolve(&self) -> Option<PathBuf> {
        let path = self.path.as_ref()?;
        if is_executable_file(path).await {
            Some(path.clone())
        } else {
            tracing::warn!(path = %path.display(), "Configured browser executable does not exist");
            None
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Cloud-packaged Chromium
// ════════════════════════════════════════════════════════════════════════════════

/// Serverless / cloud runtimes recognized by their environment markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudPlatform {
    AwsLambda,
    Vercel,
    Netlify,
    GoogleCloudRun,
    GoogleCloudFunctions,
    AzureFunctions,
}

impl CloudPlatform {
    /// Environment variables whose presence identifies each platform.
    const MARKERS: &'static [(&'static str, CloudPlatform)] = &[
        ("AWS_LAMBDA_FUNCTION_NAME", CloudPlatform::AwsLambda),
        ("AWS_EXECUTION_ENV", CloudPlatform::AwsLambda),
        ("LAMBDA_TASK_ROOT", CloudPlatform::AwsLambda),
        ("VERCEL", CloudPlatform::Vercel),
        ("NETLIFY", CloudPlatform::Netlify),
        ("K_SERVICE", CloudPlatform::GoogleCloudRun),
        ("FUNCTION_TARGET", CloudPlatform::GoogleCloudFunctions),
        ("FUNCTIONS_WORKER_RUNTIME", CloudPlatform::AzureFunctions),
    ];

    /// Detects the platform using `is_set` to test variable presence.
    pub fn detect<F>(is_set: F) -> Option<Self>
    where
        F: Fn(&str) -> bool,
    {
        Self::MARKERS
            .iter()
            .find(|(var, _)| is_set(var))
            .map(|(_, platform)| *platform)
    }

    /// Detects the platform from the process environment.
    pub fn from_env() -> Option<Self> {
        Self::detect(|var| std::env::var_os(var).is_some())
    }
}

/// Downloads a packaged Chromium build when running in a cloud runtime.
#[derive(Debug, Clone)]
pub struct CloudPackagedResolver {
    download_dir: PathBuf,
    platform: Option<CloudPlatform>,
    is_linux: bool,
}

impl CloudPackagedResolver {
    pub fn new(download_dir: PathBuf, platform: Option<CloudPlatform>, is_linux: bool) -> Self {
        Self {
            download_dir,
            platform,
            is_linux,
        }
    }

    /// Resolver for the current host and process environment.
    pub fn from_env(download_dir: PathBuf) -> Self {
        Self::new(
            download_dir,
            CloudPlatform::from_env(),
            cfg!(target_os = "linux"),
        )
    }

    /// Whether this host qualifies for the packaged build.
    pub fn is_eligible(&self) -> bool {
        self.is_linux && self.platform.is_some()
    }

    async fn fetch(&self) -> Result<PathBuf, String> {
        tokio::fs::create_dir_all(&self.download_dir)
            .await
            .map_err(|e| format!("cannot create {}: {}", self.download_dir.display(), e))?;

        let options = BrowserFetcherOptions::builder()
            .with_path(&self.download_dir)
            .build()
            .map_err(|e| e.to_string())?;
        let installation = BrowserFetcher::new(options)
            .fetch()
            .await
            .map_err(|e| e.to_string())?;

        Ok(installation.executable_path)
    }
}

#[async_trait]
impl BrowserResolver for CloudPackagedResolver {
    fn name(&self) -> &'static str {
        "cloud-packaged"
    }

    async fn resolve(&self) -> Option<PathBuf> {
        if !self.is_eligible() {
            return None;
        }

        tracing::info!(
            platform = ?self.platform,
            dir = %self.download_dir.display(),
            "Fetching packaged Chromium build"
        );
        match self.fetch().await {
            Ok(path) if is_executable_file(&path).await => Some(path),
            Ok(path) => {
                tracing::warn!(path = %path.display(), "Fetched Chromium executable is missing");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch packaged Chromium");
                None
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Chain
// ════════════════════════════════════════════════════════════════════════════════

/// Ordered list of resolvers tried in sequence.
#[derive(Clone)]
pub struct BrowserResolverChain {
    resolvers: Vec<Arc<dyn BrowserResolver>>,
}

impl BrowserResolverChain {
    pub fn new(resolvers: Vec<Arc<dyn BrowserResolver>>) -> Self {
        Self { resolvers }
    }

    /// Local install, then explicit path, then cloud-packaged build.
    pub fn from_config(config: &BrowserConfig) -> Self {
        Self::new(vec![
            Arc::new(LocalInstallResolver::system(config.local_candidate_list())),
            Arc::new(ExplicitPathResolver::new(config.executable_path.clone())),
            Arc::new(CloudPackagedResolver::from_env(config.download_dir.clone())),
        ])
    }

    /// Resolver names in the order they are tried.
    pub fn names(&self) -> Vec<&'static str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    /// Returns the first resolved executable.
    ///
    /// # Errors
    ///
    /// `ExportError::ServiceUnavailable` naming every strategy tried when
    /// none of them resolves.
    pub async fn resolve(&self) -> Result<PathBuf, ExportError> {
        for resolver in &self.resolvers {
            if let Some(path) = resolver.resolve().await {
                tracing::debug!(
                    resolver = resolver.name(),
                    path = %path.display(),
                    "Resolved browser executable"
                );
                return Ok(path);
            }
        }

        Err(ExportError::service_unavailable(format!(
            "no browser executable found (tried: {}); install Chromium or set {}",
            self.names().join(", "),
            crate::config::CHROME_EXECUTABLE_ENV
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedResolver {
        name: &'static str,
        path: Option<PathBuf>,
        calls: AtomicUsize,
    }

    impl FixedResolver {
        fn new(name: &'static str, path: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                name,
                path: path.map(PathBuf::from),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BrowserResolver for FixedResolver {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn resolve(&self) -> Option<PathBuf> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.path.clone()
        }
    }

    #[tokio::test]
    async fn chain_stops_at_first_success() {
        let first = FixedResolver::new("first", None);
        let second = FixedResolver::new("second", Some("/opt/chrome"));
        let third = FixedResolver::new("third", Some("/never"));
        let chain = BrowserResolverChain::new(vec![first.clone(), second.clone(), third.clone()]);

        assert_eq!(chain.resolve().await.unwrap(), PathBuf::from("/opt/chrome"));
        assert_eq!((first.calls(), second.calls(), third.calls()), (1, 1, 0));
    }

    #[tokio::test]
    async fn chain_failure_names_every_strategy() {
        let chain = BrowserResolverChain::new(vec![
            FixedResolver::new("local-install", None),
            FixedResolver::new("explicit-path", None),
        ]);

        let err = chain.resolve().await.unwrap_err();
        assert!(matches!(err, ExportError::ServiceUnavailable(_)));
        let message = err.to_string();
        assert!(message.contains("local-install, explicit-path"));
        assert!(message.contains("CHROME_EXECUTABLE_PATH"));
    }

    #[tokio::test]
    async fn local_install_finds_existing_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let chrome = dir.path().join("chrome");
        std::fs::write(&chrome, b"").unwrap();

        let resolver = LocalInstallResolver::from_candidates(vec![
            dir.path().join("missing"),
            chrome.clone(),
        ]);
        assert_eq!(resolver.resolve().await, Some(chrome));
    }

    #[tokio::test]
    async fn local_install_ignores_directories() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = LocalInstallResolver::from_candidates(vec![dir.path().to_path_buf()]);
        assert_eq!(resolver.resolve().await, None);
    }

    #[tokio::test]
    async fn local_install_searches_path_entries() {
        let dir = tempfile::tempdir().unwrap();
        let chromium = dir.path().join("chromium");
        std::fs::write(&chromium, b"").unwrap();

        let resolver = LocalInstallResolver {
            candidates: vec![],
            search_path: Some(dir.path().as_os_str().to_os_string()),
        };
        assert_eq!(resolver.resolve().await, Some(chromium));
    }

    #[tokio::test]
    async fn explicit_path_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let chrome = dir.path().join("chrome");

        let resolver = ExplicitPathResolver::new(Some(chrome.clone()));
        assert_eq!(resolver.resolve().await, None);

        std::fs::write(&chrome, b"").unwrap();
        assert_eq!(resolver.resolve().await, Some(chrome));

        assert_eq!(ExplicitPathResolver::new(None).resolve().await, None);
    }

    #[test]
    fn cloud_platform_detection() {
        assert_eq!(
            CloudPlatform::detect(|v| v == "AWS_LAMBDA_FUNCTION_NAME"),
            Some(CloudPlatform::AwsLambda)
        );
        assert_eq!(
            CloudPlatform::detect(|v| v == "VERCEL"),
            Some(CloudPlatform::Vercel)
        );
        assert_eq!(
            CloudPlatform::detect(|v| v == "K_SERVICE"),
            Some(CloudPlatform::GoogleCloudRun)
        );
        assert_eq!(CloudPlatform::detect(|_| false), None);
    }

    #[tokio::test]
    async fn cloud_resolver_skips_ineligible_hosts() {
        let dir = tempfile::tempdir().unwrap();

        let not_cloud = CloudPackagedResolver::new(dir.path().to_path_buf(), None, true);
        assert!(!not_cloud.is_eligible());
        assert_eq!(not_cloud.resolve().await, None);

        let not_linux = CloudPackagedResolver::new(
            dir.path().to_path_buf(),
            Some(CloudPlatform::Vercel),
            false,
        );
        assert!(!not_linux.is_eligible());
        assert_eq!(not_linux.resolve().await, None);

        // Nothing was downloaded.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn from_config_orders_local_explicit_cloud() {
        let chain = BrowserResolverChain::from_config(&BrowserConfig::default());
        assert_eq!(chain.names(), vec!["local-install", "explicit-path", "cloud-packaged"]);
    }
}
