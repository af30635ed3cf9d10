//! WalkRepositoryTreeHandler - Query handler producing a flat repository tree.
//!
//! The walk is a depth-first pre-order traversal driven by an explicit stack
//! of pending directory listings, so deep repositories do not grow the call
//! stack. Every directory is fetched exactly once, sequentially; there is no
//! caching and no retry.

use std::sync::Arc;

use crate::domain::repository::{RepositoryNode, TreeWalk};
use crate::ports::{ContentEntry, ContentsError, EntryKind, RepositoryContents};

/// Default depth bound for a walk.
pub const DEFAULT_MAX_DEPTH: usize = 6;

/// Query to walk a repository tree.
#[derive(Debug, Clone)]
pub struct WalkTreeQuery {
    pub owner: String,
    pub repo: String,
    /// Starting directory; empty for the repository root.
    pub path: String,
}

impl WalkTreeQuery {
    /// Walk from the repository root.
    pub fn root(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            path: String::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into().trim_matches('/').to_string();
        self
    }
}

/// A directory listing still being consumed.
struct Frame {
    depth: usize,
    entries: std::vec::IntoIter<ContentEntry>,
}

/// Handler for walking repository trees.
pub struct WalkRepositoryTreeHandler {
    contents: Arc<dyn RepositoryContents>,
    max_depth: usize,
}

impl WalkRepositoryTreeHandler {
    pub fn new(contents: Arc<dyn RepositoryContents>) -> Self {
        Self {
            contents,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the depth bound. The starting directory is depth 0; a directory
    /// at depth greater than `max_depth` is emitted but not listed.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub async fn handle(&self, query: WalkTreeQuery) -> Result<TreeWalk, ContentsError> {
        let mut walk = TreeWalk::default();

        let root = self.list(&query, &query.path).await?;
        let mut stack = vec![Frame {
            depth: 0,
            entries: root.into_iter(),
        }];

        loop {
            let Some(frame) = stack.last_mut() else {
                break;
            };
            let depth = frame.depth;
            let Some(entry) = frame.entries.next() else {
                stack.pop();
                continue;
            };

            match entry.kind {
                EntryKind::File => walk.nodes.push(RepositoryNode::file(entry.path, entry.size)),
                EntryKind::Dir => {
                    walk.nodes.push(RepositoryNode::dir(entry.path.clone()));

                    let child_depth = depth + 1;
                    if child_depth > self.max_depth {
                        walk.truncated.push(entry.path);
                        continue;
                    }

                    let children = self.list(&query, &entry.path).await?;
                    stack.push(Frame {
                        depth: child_depth,
                        entries: children.into_iter(),
                    });
                }
                EntryKind::Other => {}
            }
        }

        if walk.is_truncated() {
            tracing::warn!(
                owner = %query.owner,
                repo = %query.repo,
                max_depth = self.max_depth,
                truncated = walk.truncated.len(),
                "Repository tree truncated at depth bound"
            );
        }

        Ok(walk)
    }

    async fn list(&self, query: &WalkTreeQuery, path: &str) -> Result<Vec<ContentEntry>, ContentsError> {
        tracing::debug!(owner = %query.owner, repo = %query.repo, path = %path, "Listing directory");
        self.contents
            .list_directory(&query.owner, &query.repo, path)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct MockContents {
        listings: HashMap<String, Vec<ContentEntry>>,
        calls: Mutex<Vec<String>>,
        failure: Option<ContentsError>,
    }

    impl MockContents {
        fn new<P: Into<String>>(listings: Vec<(P, Vec<ContentEntry>)>) -> Self {
            Self {
                listings: listings
                    .into_iter()
                    .map(|(path, entries)| (path.into(), entries))
                    .collect(),
                calls: Mutex::new(Vec::new()),
                failure: None,
            }
        }

        fn failing(error: ContentsError) -> Self {
            Self {
                failure: Some(error),
                ..Self::new(Vec::<(String, Vec<ContentEntry>)>::new())
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RepositoryContents for MockContents {
        async fn list_directory(
            &self,
            _owner: &str,
            _repo: &str,
            path: &str,
        ) -> Result<Vec<ContentEntry>, ContentsError> {
            self.calls.lock().unwrap().push(path.to_string());
            if let Some(err) = &self.failure {
                return Err(err.clone());
            }
            self.listings
                .get(path)
                .cloned()
                .ok_or_else(|| ContentsError::not_found(path))
        }
    }

    /// `a/b/c/...` chain of `levels` nested directories with a file in the last.
    fn chain(levels: usize) -> MockContents {
        let mut listings = Vec::new();
        let mut parent = String::new();
        for level in 0..levels {
            let dir = if parent.is_empty() {
                format!("d{}", level)
            } else {
                format!("{}/d{}", parent, level)
            };
            listings.push((parent.clone(), vec![ContentEntry::dir(dir.clone())]));
            parent = dir;
        }
        let leaf = ContentEntry::file(format!("{}/leaf.txt", parent), 1);
        listings.push((parent, vec![leaf]));

        MockContents::new(listings)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn emits_directory_before_its_children() {
        let contents = Arc::new(MockContents::new(vec![
            (
                "",
                vec![ContentEntry::file("README.md", 10), ContentEntry::dir("src")],
            ),
            ("src", vec![ContentEntry::file("src/index.ts", 20)]),
        ]));
        let handler = WalkRepositoryTreeHandler::new(contents.clone());

        let walk = handler.handle(WalkTreeQuery::root("acme", "demo")).await.unwrap();

        assert_eq!(
            walk.nodes,
            vec![
                RepositoryNode::file("README.md", Some(10)),
                RepositoryNode::dir("src"),
                RepositoryNode::file("src/index.ts", Some(20)),
            ]
        );
        assert!(!walk.is_truncated());
        assert_eq!(contents.calls(), vec!["", "src"]);
    }

    #[tokio::test]
    async fn subtree_completes_before_later_siblings() {
        let contents = Arc::new(MockContents::new(vec![
            ("", vec![ContentEntry::dir("a"), ContentEntry::file("z.txt", 1)]),
            ("a", vec![ContentEntry::dir("a/b"), ContentEntry::file("a/y.txt", 1)]),
            ("a/b", vec![ContentEntry::file("a/b/x.txt", 1)]),
        ]));
        let handler = WalkRepositoryTreeHandler::new(contents);

        let walk = handler.handle(WalkTreeQuery::root("acme", "demo")).await.unwrap();

        assert_eq!(
            walk.paths(),
            vec!["a", "a/b", "a/b/x.txt", "a/y.txt", "z.txt"]
        );
    }

    #[tokio::test]
    async fn default_bound_lists_six_levels_below_start() {
        let contents = Arc::new(chain(8));
        let handler = WalkRepositoryTreeHandler::new(contents.clone());

        let walk = handler.handle(WalkTreeQuery::root("acme", "deep")).await.unwrap();

        // Root and d0..d5 are listed; d6 sits at depth 7 and is emitted only.
        assert_eq!(walk.nodes.len(), 7);
        assert!(walk.nodes.iter().all(|n| n.is_dir()));
        assert_eq!(walk.truncated, vec!["d0/d1/d2/d3/d4/d5/d6".to_string()]);
        assert_eq!(contents.calls().len(), 7);
    }

    #[tokio::test]
    async fn nodes_past_depth_bound_are_omitted_without_error() {
        let contents = Arc::new(chain(3));
        let handler = WalkRepositoryTreeHandler::new(contents).with_max_depth(1);

        let walk = handler.handle(WalkTreeQuery::root("acme", "deep")).await.unwrap();

        assert_eq!(walk.paths(), vec!["d0", "d0/d1"]);
        assert_eq!(walk.truncated, vec!["d0/d1".to_string()]);
    }

    #[tokio::test]
    async fn skips_symlinks_and_submodules() {
        let contents = Arc::new(MockContents::new(vec![(
            "",
            vec![
                ContentEntry {
                    path: "vendor/lib".to_string(),
                    kind: EntryKind::Other,
                    size: None,
                },
                ContentEntry::file("main.go", 5),
            ],
        )]));
        let handler = WalkRepositoryTreeHandler::new(contents);

        let walk = handler.handle(WalkTreeQuery::root("acme", "demo")).await.unwrap();
        assert_eq!(walk.paths(), vec!["main.go"]);
    }

    #[tokio::test]
    async fn starts_from_given_path() {
        let contents = Arc::new(MockContents::new(vec![(
            "src",
            vec![ContentEntry::file("src/lib.rs", 3)],
        )]));
        let handler = WalkRepositoryTreeHandler::new(contents.clone());

        let walk = handler
            .handle(WalkTreeQuery::root("acme", "demo").with_path("/src/"))
            .await
            .unwrap();

        assert_eq!(walk.paths(), vec!["src/lib.rs"]);
        assert_eq!(contents.calls(), vec!["src"]);
    }

    #[tokio::test]
    async fn propagates_not_found() {
        let contents = Arc::new(MockContents::failing(ContentsError::not_found("acme/missing")));
        let handler = WalkRepositoryTreeHandler::new(contents);

        let result = handler.handle(WalkTreeQuery::root("acme", "missing")).await;
        assert_eq!(result, Err(ContentsError::not_found("acme/missing")));
    }

    #[tokio::test]
    async fn failure_in_subdirectory_aborts_walk() {
        // "src" has no listing, so the mock reports it as not found.
        let contents = Arc::new(MockContents::new(vec![("", vec![ContentEntry::dir("src")])]));
        let handler = WalkRepositoryTreeHandler::new(contents);

        let result = handler.handle(WalkTreeQuery::root("acme", "demo")).await;
        assert!(matches!(result, Err(ContentsError::NotFound(_))));
    }
}
