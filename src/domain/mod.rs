//! Domain layer containing the document models and pure rendering logic.
//!
//! # Module Organization
//!
//! - `repository` - Repository tree nodes produced by a tree walk
//! - `dossier` - Dossier inputs, template data and the markdown assembler

pub mod dossier;
pub mod repository;
