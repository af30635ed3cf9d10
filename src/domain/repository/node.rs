//! Repository node value objects.

use serde::{Deserialize, Serialize};

/// Kind of a repository node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Dir,
}

/// A single path within a repository.
///
/// Serializes as `{path, type, size?}`; `size` is only present for files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryNode {
    pub path: String,

    #[serde(rename = "type")]
    pub kind: NodeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl RepositoryNode {
    /// Creates a file node.
    pub fn file(path: impl Into<String>, size: Option<u64>) -> Self {
        Self {
            path: path.into(),
            kind: NodeKind::File,
            size,
        }
    }

    /// Creates a directory node.
    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: NodeKind::Dir,
            size: None,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Dir
    }
}

/// Result of a depth-bounded tree walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeWalk {
    /// Nodes in walk order; a directory always precedes its children.
    pub nodes: Vec<RepositoryNode>,

    /// Directories that were emitted but not descended into because they sit
    /// past the depth bound.
    pub truncated: Vec<String>,
}

impl TreeWalk {
    /// Whether any branch was cut by the depth bound.
    pub fn is_truncated(&self) -> bool {
        !self.truncated.is_empty()
    }

    /// All node paths, in walk order.
    pub fn paths(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.path.clone()).collect()
    }
}
