//! Dossier assembler.
//!
//! Builds the complete markdown dossier from a [`DossierRequest`]. The output
//! is a fixed template of eight numbered sections, each preceded by a stable
//! anchor. Omitted optional inputs render the template placeholder instead of
//! an empty section.

use chrono::{DateTime, Utc};

use super::ascii_tree::render_tree;
use super::inputs::{DossierMetadata, DossierRequest};
use super::sections::{
    escape_cell, file_anchor, render_commit_table, render_dependency_table, render_env_table,
    render_file_section, single_line,
};
use super::template::DossierTemplate;

/// Numbered sections of a dossier, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DossierSection {
    Overview,
    TechnologyStack,
    RepositoryStructure,
    Dependencies,
    EnvironmentVariables,
    CommitHistory,
    SourceFiles,
    NextSteps,
}

impl DossierSection {
    pub const ALL: [DossierSection; 8] = [
        DossierSection::Overview,
        DossierSection::TechnologyStack,
        DossierSection::RepositoryStructure,
        DossierSection::Dependencies,
        DossierSection::EnvironmentVariables,
        DossierSection::CommitHistory,
        DossierSection::SourceFiles,
        DossierSection::NextSteps,
    ];

    /// 1-based section number.
    pub fn number(&self) -> usize {
        Self::ALL
            .iter()
            .position(|s| s == self)
            .map_or(0, |idx| idx + 1)
    }

    pub fn title(&self) -> &'static str {
        match self {
            DossierSection::Overview => "Overview",
            DossierSection::TechnologyStack => "Technology Stack",
            DossierSection::RepositoryStructure => "Repository Structure",
            DossierSection::Dependencies => "Dependencies",
            DossierSection::EnvironmentVariables => "Environment Variables",
            DossierSection::CommitHistory => "Commit History",
            DossierSection::SourceFiles => "Source Files",
            DossierSection::NextSteps => "Next Steps",
        }
    }

    pub fn anchor(&self) -> &'static str {
        match self {
            DossierSection::Overview => "overview",
            DossierSection::TechnologyStack => "technology-stack",
            DossierSection::RepositoryStructure => "repository-structure",
            DossierSection::Dependencies => "dependencies",
            DossierSection::EnvironmentVariables => "environment-variables",
            DossierSection::CommitHistory => "commit-history",
            DossierSection::SourceFiles => "source-files",
            DossierSection::NextSteps => "next-steps",
        }
    }

    fn heading(&self) -> String {
        format!(
            "<a id=\"{}\"></a>\n\n## {}. {}\n\n",
            self.anchor(),
            self.number(),
            self.title()
        )
    }
}

/// Prefix of the line carrying the build timestamp.
pub const GENERATED_AT_PREFIX: &str = "> Generated at ";

/// Assembles markdown dossiers.
#[derive(Debug, Clone, Default)]
pub struct DossierAssembler {
    template: DossierTemplate,
}

impl DossierAssembler {
    pub fn new(template: DossierTemplate) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &DossierTemplate {
        &self.template
    }

    /// Builds the dossier stamped with the current time.
    pub fn build(&self, request: &DossierRequest) -> String {
        self.build_at(request, Utc::now())
    }

    /// Builds the dossier stamped with `generated_at`.
    ///
    /// Identical inputs always give identical output.
    pub fn build_at(&self, request: &DossierRequest, generated_at: DateTime<Utc>) -> String {
        let mut doc = self.generate_header(&request.metadata, generated_at);

        for section in DossierSection::ALL {
            doc.push_str(&section.heading());
            let body = match section {
                DossierSection::Overview => self.generate_overview(&request.metadata),
                DossierSection::TechnologyStack => self.generate_stack(&request.metadata),
                DossierSection::RepositoryStructure => self.generate_structure(request),
                DossierSection::Dependencies => self.generate_dependencies(request),
                DossierSection::EnvironmentVariables => self.generate_environment(request),
                DossierSection::CommitHistory => self.generate_commits(request),
                DossierSection::SourceFiles => self.generate_files(request),
                DossierSection::NextSteps => self.generate_next_steps(),
            };
            doc.push_str(&body);
            doc.push('\n');
        }

        doc
    }

    fn generate_header(&self, metadata: &DossierMetadata, generated_at: DateTime<Utc>) -> String {
        let mut header = format!(
            "# {}: {}\n\n",
            self.template.title,
            single_line(&metadata.full_name())
        );
        header.push_str(&format!(
            "{}{}\n\n",
            GENERATED_AT_PREFIX,
            generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        header.push_str("## Contents\n\n");
        for section in DossierSection::ALL {
            header.push_str(&format!(
                "{}. [{}](#{})\n",
                section.number(),
                section.title(),
                section.anchor()
            ));
        }
        header.push_str("\n---\n\n");
        header
    }

    fn generate_overview(&self, metadata: &DossierMetadata) -> String {
        let placeholder = self.template.placeholder.as_str();
        let description = metadata
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(placeholder);
        let branch = metadata
            .default_branch
            .as_deref()
            .map(|b| format!("`{}`", escape_cell(b)))
            .unwrap_or_else(|| placeholder.to_string());

        let mut section = String::from("| Field | Value |\n|-------|-------|\n");
        section.push_str(&format!("| Owner | `{}` |\n", escape_cell(&metadata.owner)));
        section.push_str(&format!("| Repository | `{}` |\n", escape_cell(&metadata.repo)));
        section.push_str(&format!("| Description | {} |\n", escape_cell(description)));
        section.push_str(&format!("| Default branch | {} |\n", branch));
        section
    }

    fn generate_stack(&self, metadata: &DossierMetadata) -> String {
        let mut section = String::from("### Languages\n\n");
        section.push_str(&self.bullet_list(&metadata.languages));
        section.push_str("\n### Technologies\n\n");
        section.push_str(&self.bullet_list(&metadata.technologies));
        section
    }

    fn bullet_list(&self, items: &[String]) -> String {
        if items.is_empty() {
            return format!("{}\n", self.template.placeholder);
        }
        items
            .iter()
            .map(|item| format!("- {}\n", single_line(item)))
            .collect()
    }

    fn generate_structure(&self, request: &DossierRequest) -> String {
        let paths = request.tree_paths();
        if paths.is_empty() {
            return format!("{}\n", self.template.placeholder);
        }

        let tree = render_tree(&request.metadata.full_name(), paths);
        format!("```text\n{}```\n", tree)
    }

    fn generate_dependencies(&self, request: &DossierRequest) -> String {
        let Some(package) = &request.package else {
            return format!("{}\n", self.template.placeholder);
        };

        let mut section = String::new();
        if let Some(name) = &package.name {
            let version = package.version.as_deref().unwrap_or("");
            if version.is_empty() {
                section.push_str(&format!("**Package:** `{}`\n\n", name));
            } else {
                section.push_str(&format!("**Package:** `{}@{}`\n\n", name, version));
            }
        }

        section.push_str("### Runtime\n\n");
        section.push_str(&render_dependency_table(&package.dependencies, &self.template));
        section.push_str("\n### Development\n\n");
        section.push_str(&render_dependency_table(
            &package.dev_dependencies,
            &self.template,
        ));
        section
    }

    fn generate_environment(&self, request: &DossierRequest) -> String {
        match &request.env_example {
            Some(raw) => render_env_table(raw, &self.template),
            None => format!("{}\n", self.template.placeholder),
        }
    }

    fn generate_commits(&self, request: &DossierRequest) -> String {
        match request.commits.as_deref() {
            Some(commits) if !commits.is_empty() => render_commit_table(commits, &self.template),
            _ => format!("{}\n", self.template.placeholder),
        }
    }

    fn generate_files(&self, request: &DossierRequest) -> String {
        if request.files.is_empty() {
            return format!("{}\n", self.template.placeholder);
        }

        let number = DossierSection::SourceFiles.number();
        let mut section = String::new();
        for file in &request.files {
            section.push_str(&format!(
                "- [`{}`](#{})\n",
                file.path,
                file_anchor(&file.path)
            ));
        }
        section.push('\n');

        for (idx, file) in request.files.iter().enumerate() {
            section.push_str(&render_file_section(number, idx + 1, file, &self.template));
        }
        section
    }

    fn generate_next_steps(&self) -> String {
        self.template
            .closing_checklist
            .iter()
            .map(|item| format!("- [ ] {}\n", item))
            .collect()
    }
}
