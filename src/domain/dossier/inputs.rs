//! Inputs of a dossier build.
//!
//! All of these are supplied by the caller and treated as read-only for the
//! duration of a single build.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Descriptive metadata of the repository the dossier is about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DossierMetadata {
    pub owner: String,
    pub repo: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub default_branch: Option<String>,

    #[serde(default)]
    pub languages: Vec<String>,

    /// Extra technology labels (frameworks, services, tooling).
    #[serde(default)]
    pub technologies: Vec<String>,
}

impl DossierMetadata {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            ..Default::default()
        }
    }

    /// `owner/repo`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// A file chosen for inclusion, with its full textual content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub path: String,
    pub content: String,
}

impl SelectedFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Stored review of a single commit, produced by an upstream analysis step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitReview {
    pub sha: String,
    pub message: String,
    pub committed_at: DateTime<Utc>,

    /// Author-facing URL of the commit.
    #[serde(default)]
    pub html_url: Option<String>,

    #[serde(default)]
    pub additions: u64,

    #[serde(default)]
    pub deletions: u64,

    #[serde(default)]
    pub changed_files: u32,

    /// Review flags such as `large` or `risky`.
    #[serde(default)]
    pub flags: Vec<String>,
}

impl CommitReview {
    /// First line of the commit message.
    pub fn title(&self) -> &str {
        self.message.lines().next().unwrap_or("").trim_end()
    }

    /// Abbreviated commit id.
    pub fn short_sha(&self) -> &str {
        match self.sha.char_indices().nth(7) {
            Some((idx, _)) => &self.sha[..idx],
            None => &self.sha,
        }
    }
}

/// Package manifest summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSummary {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    /// Runtime dependencies, package name to version requirement.
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,

    /// Development dependencies, package name to version requirement.
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
}

/// Everything a dossier build consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DossierRequest {
    pub metadata: DossierMetadata,

    #[serde(default)]
    pub files: Vec<SelectedFile>,

    #[serde(default)]
    pub commits: Option<Vec<CommitReview>>,

    /// Flat list of every repository path, used for the structure tree.
    /// Falls back to the selected files' paths when absent.
    #[serde(default)]
    pub all_paths: Option<Vec<String>>,

    #[serde(default)]
    pub package: Option<PackageSummary>,

    /// Raw content of the repository's environment-example file.
    #[serde(default)]
    pub env_example: Option<String>,
}

impl DossierRequest {
    pub fn new(metadata: DossierMetadata) -> Self {
        Self {
            metadata,
            ..Default::default()
        }
    }

    /// Paths used to draw the structure tree.
    pub fn tree_paths(&self) -> Vec<&str> {
        match &self.all_paths {
            Some(paths) => paths.iter().map(String::as_str).collect(),
            None => self.files.iter().map(|f| f.path.as_str()).collect(),
        }
    }
}
