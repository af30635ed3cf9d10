//! Dossier domain - Markdown summary of a repository.
//!
//! A dossier is a single immutable markdown document regenerated from scratch
//! on every build. Building is a pure function of the inputs plus the
//! "generated at" timestamp.
//!
//! - `inputs` - Caller supplied metadata, files, commit reviews, packages
//! - `template` - Swappable lookup data (language tags, checklist, placeholders)
//! - `ascii_tree` - Directory tree drawing
//! - `sections` - Per-section renderers
//! - `assembler` - The document template itself

mod ascii_tree;
mod assembler;
mod inputs;
mod sections;
mod template;

pub use ascii_tree::render_tree;
pub use assembler::{DossierAssembler, DossierSection, GENERATED_AT_PREFIX};
pub use inputs::{CommitReview, DossierMetadata, DossierRequest, PackageSummary, SelectedFile};
pub use sections::{escape_cell, file_anchor, parse_env_example, single_line, EnvVariable};
pub use template::{DossierTemplate, TemplateError};
