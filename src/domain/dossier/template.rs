//! Static lookup data used while rendering a dossier.
//!
//! The extension → language table, the closing checklist and the placeholder
//! strings are content choices rather than behaviour, so they live in a
//! template that can be replaced from a YAML file.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading a template file.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to read template file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid template YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Replaceable content of a dossier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DossierTemplate {
    /// Document title prefix, followed by `owner/repo`.
    pub title: String,

    /// Rendered in place of any section whose input was omitted.
    pub placeholder: String,

    /// Rendered in table cells with no value (e.g. commits without flags).
    pub empty_cell: String,

    /// Lower-case file extension (without dot) to fence language tag.
    pub language_tags: BTreeMap<String, String>,

    /// Closing follow-up checklist, rendered verbatim on every build.
    pub closing_checklist: Vec<String>,
}

impl DossierTemplate {
    /// Parses a template from YAML; absent keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, TemplateError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a template from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml(&raw)
    }

    /// Language tag for a path, from its extension.
    pub fn language_for(&self, path: &str) -> Option<&str> {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        let (stem, ext) = file_name.rsplit_once('.')?;
        if stem.is_empty() {
            // Dotfiles like `.env` have no extension.
            return None;
        }
        self.language_tags
            .get(&ext.to_ascii_lowercase())
            .map(String::as_str)
    }
}

impl Default for DossierTemplate {
    fn default() -> Self {
        Self {
            title: "Technical Dossier".to_string(),
            placeholder: "_Not provided._".to_string(),
            empty_cell: "-".to_string(),
            language_tags: default_language_tags(),
            closing_checklist: default_checklist(),
        }
    }
}

fn default_language_tags() -> BTreeMap<String, String> {
    [
        ("rs", "rust"),
        ("ts", "typescript"),
        ("tsx", "tsx"),
        ("js", "javascript"),
        ("jsx", "jsx"),
        ("mjs", "javascript"),
        ("cjs", "javascript"),
        ("json", "json"),
        ("md", "markdown"),
        ("py", "python"),
        ("go", "go"),
        ("java", "java"),
        ("kt", "kotlin"),
        ("rb", "ruby"),
        ("php", "php"),
        ("cs", "csharp"),
        ("c", "c"),
        ("h", "c"),
        ("cpp", "cpp"),
        ("hpp", "cpp"),
        ("swift", "swift"),
        ("sh", "bash"),
        ("bash", "bash"),
        ("yml", "yaml"),
        ("yaml", "yaml"),
        ("toml", "toml"),
        ("xml", "xml"),
        ("html", "html"),
        ("css", "css"),
        ("scss", "scss"),
        ("sql", "sql"),
        ("prisma", "prisma"),
        ("graphql", "graphql"),
        ("vue", "vue"),
        ("svelte", "svelte"),
    ]
    .into_iter()
    .map(|(ext, tag)| (ext.to_string(), tag.to_string()))
    .collect()
}

fn default_checklist() -> Vec<String> {
    [
        "Confirm the selected files cover the main entry points",
        "Review commits flagged as large or risky",
        "Check dependency versions for known vulnerabilities",
        "Verify every environment variable is documented and has a safe default",
        "Add or update tests for the critical paths",
        "Document the deployment and rollback procedure",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
