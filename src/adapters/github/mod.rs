//! GitHub adapters - Hosted repository access.

mod contents_client;

pub use contents_client::{GitHubClientConfig, GitHubContentsClient};
