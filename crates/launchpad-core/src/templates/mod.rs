//! Template catalog, resolution, and best-effort file operations
//!
//! This module provides:
//! - The embedded template catalog (one overlay set per combination)
//! - Resolution of template ids to bundled files
//! - Batch copy/remove/clean operations that never abort on a single path

pub mod copier;
pub mod manifest;
pub mod resolver;

pub use copier::{clean_directory, copy_many, remove_many, BatchReport, CopyPair};
pub use manifest::{CatalogError, Cleanup, TemplateCatalog, TemplateFile, TemplateSet};
pub use resolver::TemplateResolver;
