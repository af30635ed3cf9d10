//! ASCII rendering of a flat path list as a directory tree.
//!
//! Paths are folded into a prefix trie keyed by path segment and rendered
//! depth-first. Children are visited in lexicographic order at every level,
//! and the last child of each level gets the terminal marker.

use std::collections::BTreeMap;

/// Marker for a child that has later siblings.
pub const BRANCH: &str = "├─ ";
/// Marker for the last child of a level.
pub const LAST_BRANCH: &str = "└─ ";
/// Indentation under a child that has later siblings.
pub const PIPE: &str = "│  ";
/// Indentation under the last child of a level.
pub const BLANK: &str = "   ";

#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<String, TrieNode>,
}

impl TrieNode {
    fn insert(&mut self, path: &str) {
        let mut node = self;
        for segment in path.split('/').filter(|s| !s.is_empty() && *s != ".") {
            node = node.children.entry(segment.to_string()).or_default();
        }
    }
}

/// Renders `paths` as a tree under a `root` label.
///
/// Segments that have children are suffixed with `/`. Returns just the root
/// line when `paths` is empty.
pub fn render_tree<'a, I>(root: &str, paths: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut trie = TrieNode::default();
    for path in paths {
        trie.insert(path);
    }

    let mut out = String::new();
    out.push_str(root);
    out.push('\n');
    render_children(&trie, "", &mut out);
    out
}

fn render_children(node: &TrieNode, prefix: &str, out: &mut String) {
    let count = node.children.len();
    for (index, (name, child)) in node.children.iter().enumerate() {
        let is_last = index + 1 == count;

        out.push_str(prefix);
        out.push_str(if is_last { LAST_BRANCH } else { BRANCH });
        out.push_str(name);
        if !child.children.is_empty() {
            out.push('/');
        }
        out.push('\n');

        let child_prefix = format!("{}{}", prefix, if is_last { BLANK } else { PIPE });
        render_children(child, &child_prefix, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn renders_nested_paths_sorted() {
        let tree = render_tree(
            "acme/demo",
            ["src/index.ts", "README.md", "src/lib/util.ts", "package.json"],
        );

        let expected = "\
acme/demo
├─ README.md
├─ package.json
└─ src/
   ├─ index.ts
   └─ lib/
      └─ util.ts
";
        assert_eq!(tree, expected);
    }

    #[test]
    fn pipe_continues_under_non_last_sibling() {
        let tree = render_tree(".", ["a/x", "b"]);
        let expected = "\
.
├─ a/
│  └─ x
└─ b
";
        assert_eq!(tree, expected);
    }

    #[test]
    fn directory_entries_merge_with_their_children() {
        let tree = render_tree(".", ["src", "src/main.rs", "src/"]);
        assert_eq!(tree, ".\n└─ src/\n   └─ main.rs\n");
    }

    #[test]
    fn empty_input_renders_root_only() {
        assert_eq!(render_tree("root", std::iter::empty()), "root\n");
    }

    /// One rendered line: depth, name without dir suffix, terminal marker.
    fn parse_line(line: &str) -> (usize, String, bool) {
        let chars: Vec<char> = line.chars().collect();
        let mut depth = 0;
        let mut pos = 0;
        loop {
            let unit: String = chars[pos..pos + 3].iter().collect();
            if unit == PIPE || unit == BLANK {
                depth += 1;
                pos += 3;
            } else {
                break;
            }
        }
        let marker: String = chars[pos..pos + 3].iter().collect();
        let name: String = chars[pos + 3..].iter().collect();
        (
            depth,
            name.trim_end_matches('/').to_string(),
            marker == LAST_BRANCH,
        )
    }

    fn check_group(group: &[(String, bool)]) -> Result<(), TestCaseError> {
        let names: Vec<&String> = group.iter().map(|(n, _)| n).collect();
        let mut sorted = names.clone();
        sorted.sort();
        prop_assert_eq!(&names, &sorted);

        let terminal: Vec<usize> = group
            .iter()
            .enumerate()
            .filter(|(_, (_, last))| *last)
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(terminal, vec![group.len() - 1]);
        Ok(())
    }

    proptest! {
        #[test]
        fn siblings_sorted_with_single_terminal(
            paths in prop::collection::vec("[a-c]{1,2}(/[a-c]{1,2}){0,3}", 0..20)
        ) {
            let tree = render_tree(".", paths.iter().map(String::as_str));
            let mut groups: Vec<Vec<(String, bool)>> = vec![Vec::new()];

            for line in tree.lines().skip(1) {
                let (depth, name, last) = parse_line(line);
                while groups.len() > depth + 1 {
                    let group = groups.pop().unwrap();
                    check_group(&group)?;
                }
                while groups.len() < depth + 1 {
                    groups.push(Vec::new());
                }
                groups[depth].push((name, last));
            }
            while let Some(group) = groups.pop() {
                if !group.is_empty() {
                    check_group(&group)?;
                }
            }
        }
    }
}
