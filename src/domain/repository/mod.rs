//! Repository domain - File tree of a hosted source repository.
//!
//! Nodes are produced by walking the hosted repository's contents listing and
//! have no identity beyond the single response they belong to.

mod node;

pub use node::{NodeKind, RepositoryNode, TreeWalk};
