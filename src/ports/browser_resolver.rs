//! Browser Resolver Port - Locating a headless browser executable.
//!
//! PDF export tries an ordered list of resolvers and launches the first
//! executable one of them finds.

use std::path::PathBuf;

use async_trait::async_trait;

/// A single strategy for locating a browser executable.
///
/// Resolvers are independent: each one either yields a path that exists on
/// disk or `None`. Failures inside a resolver (e.g. a failed download) are
/// logged by the resolver and reported as `None`.
#[async_trait]
pub trait BrowserResolver: Send + Sync {
    /// Short name used in logs and configuration errors.
    fn name(&self) -> &'static str;

    /// Attempts to locate an executable.
    async fn resolve(&self) -> Option<PathBuf>;
}
