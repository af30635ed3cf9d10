//! Repository Contents Port - Directory listings of a hosted repository.
//!
//! The tree walker depends on this trait; the GitHub adapter implements it.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Port for listing the immediate entries of a repository directory.
///
/// # Contract
///
/// Implementations must:
/// - Return the entries of exactly one directory (no recursion)
/// - Report entry paths relative to the repository root
/// - Normalize an upstream "not found" into `ContentsError::NotFound`
/// - Never retry
#[async_trait]
pub trait RepositoryContents: Send + Sync {
    /// Lists the entries directly under `path` (`""` is the root).
    async fn list_directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Vec<ContentEntry>, ContentsError>;
}

/// Kind of a directory entry as reported upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    /// Symlinks, submodules and anything else the walker does not descend.
    #[serde(other)]
    Other,
}

/// A single entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentEntry {
    pub path: String,

    #[serde(rename = "type")]
    pub kind: EntryKind,

    #[serde(default)]
    pub size: Option<u64>,
}

impl ContentEntry {
    pub fn file(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            size: Some(size),
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Dir,
            size: None,
        }
    }
}

/// Errors raised while fetching repository contents.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentsError {
    /// No API credential is configured.
    #[error("Repository API credential is not configured")]
    MissingCredential,

    /// The configured credential was rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Repository or path does not exist (or is not visible).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other upstream failure, carrying its message.
    #[error("{0}")]
    Upstream(String),
}

impl ContentsError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }
}
