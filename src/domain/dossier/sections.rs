//! Renderers for the individual pieces of a dossier.
//!
//! Each function returns a markdown fragment; none of them performs I/O.

use std::collections::BTreeMap;

use super::inputs::{CommitReview, SelectedFile};
use super::template::DossierTemplate;

/// Anchor id for a selected file: lower-cased, with every run of
/// non-alphanumeric characters collapsed to a single `-`.
pub fn file_anchor(path: &str) -> String {
    let mut slug = String::with_capacity(path.len());
    let mut pending_separator = false;

    for c in path.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    format!("file-{}", slug)
}

/// Joins the lines of `value` with single spaces.
pub fn single_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escapes a value for use inside a markdown table cell.
pub fn escape_cell(value: &str) -> String {
    single_line(value).replace('|', "\\|")
}

/// Opening/closing fence long enough that `content` cannot terminate it.
fn fence_for(content: &str) -> String {
    let longest_run = content
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest_run.max(2) + 1)
}

/// Renders one selected file: numbered heading, anchor and fenced content.
pub fn render_file_section(
    section: usize,
    number: usize,
    file: &SelectedFile,
    template: &DossierTemplate,
) -> String {
    let fence = fence_for(&file.content);
    let language = template.language_for(&file.path).unwrap_or("");

    let mut out = String::new();
    out.push_str(&format!("<a id=\"{}\"></a>\n\n", file_anchor(&file.path)));
    out.push_str(&format!("### {}.{} `{}`\n\n", section, number, file.path));
    out.push_str(&format!("{}{}\n", fence, language));
    out.push_str(&file.content);
    if !file.content.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&fence);
    out.push_str("\n\n");
    out
}

/// Renders the commit review table, one row per review in input order.
pub fn render_commit_table(commits: &[CommitReview], template: &DossierTemplate) -> String {
    let mut out = String::from("| Date | Commit | Message | Lines | Files | Flags |\n");
    out.push_str("|------|--------|---------|-------|-------|-------|\n");

    for commit in commits {
        let id = match commit.html_url.as_deref().filter(|u| !u.is_empty()) {
            Some(url) => format!("[`{}`]({})", commit.short_sha(), url),
            None => format!("`{}`", commit.short_sha()),
        };
        let flags = if commit.flags.is_empty() {
            template.empty_cell.clone()
        } else {
            escape_cell(&commit.flags.join(", "))
        };

        out.push_str(&format!(
            "| {} | {} | {} | +{}/-{} | {} | {} |\n",
            commit.committed_at.format("%Y-%m-%d"),
            id,
            escape_cell(commit.title()),
            commit.additions,
            commit.deletions,
            commit.changed_files,
            flags,
        ));
    }

    out
}

/// Renders a package → version table, or the placeholder when empty.
pub fn render_dependency_table(
    dependencies: &BTreeMap<String, String>,
    template: &DossierTemplate,
) -> String {
    if dependencies.is_empty() {
        return format!("{}\n", template.placeholder);
    }

    let mut out = String::from("| Package | Version |\n");
    out.push_str("|---------|---------|\n");
    for (name, version) in dependencies {
        out.push_str(&format!(
            "| `{}` | `{}` |\n",
            escape_cell(name),
            escape_cell(version)
        ));
    }
    out
}

/// A variable declared in an environment-example file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVariable {
    pub name: String,
    pub example: String,
    pub notes: String,
}

/// Parses `KEY=value` lines of an environment-example file.
///
/// Comment lines directly above a variable become its notes; a blank line
/// discards pending comments.
pub fn parse_env_example(raw: &str) -> Vec<EnvVariable> {
    let mut variables = Vec::new();
    let mut comments: Vec<String> = Vec::new();

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            comments.clear();
            continue;
        }
        if let Some(comment) = line.strip_prefix('#') {
            let comment = comment.trim();
            if !comment.is_empty() {
                comments.push(comment.to_string());
            }
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((name, value)) = line.split_once('=') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }

        variables.push(EnvVariable {
            name: name.to_string(),
            example: unquote(value.trim()).to_string(),
            notes: comments.join(" "),
        });
        comments.clear();
    }

    variables
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Renders the environment variable table, or the placeholder when the file
/// declares nothing.
pub fn render_env_table(raw: &str, template: &DossierTemplate) -> String {
    let variables = parse_env_example(raw);
    if variables.is_empty() {
        return format!("{}\n", template.placeholder);
    }

    let mut out = String::from("| Variable | Example | Notes |\n");
    out.push_str("|----------|---------|-------|\n");
    for var in &variables {
        let example = if var.example.is_empty() {
            template.empty_cell.clone()
        } else {
            format!("`{}`", escape_cell(&var.example))
        };
        let notes = if var.notes.is_empty() {
            template.empty_cell.clone()
        } else {
            escape_cell(&var.notes)
        };
        out.push_str(&format!("| `{}` | {} | {} |\n", var.name, example, notes));
    }
    out
}
