//! Repo Dossier - Repository tree walking, dossier assembly and PDF export
//!
//! This crate walks a hosted repository's file tree, assembles a markdown
//! technical dossier about it, and prints markdown documents to PDF through
//! a headless browser.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
