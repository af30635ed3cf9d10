//! Dossier template configuration

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::dossier::{DossierTemplate, TemplateError};

/// Dossier configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DossierConfig {
    /// YAML file replacing the built-in template content
    pub template_path: Option<PathBuf>,
}

impl DossierConfig {
    /// Load the configured template, or the built-in one.
    pub fn load_template(&self) -> Result<DossierTemplate, TemplateError> {
        match &self.template_path {
            Some(path) => DossierTemplate::from_file(path),
            None => Ok(DossierTemplate::default()),
        }
    }
}
