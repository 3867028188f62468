//! Catalog indexing.
//!
//! This module turns a catalog checkout into an index of templates:
//! - [`path`] classifies file paths into template and version folders
//! - [`parse`] parses definition and override files
//! - [`index`] walks the tree and merges files into partial records
//! - [`reconcile`] applies override files once the walk is complete
//! - [`compat`] checks platform version ranges
//!
//! # Example
//!
//! ```no_run
//! use infra_version::catalog::{index_catalog, reconcile_index};
//! use std::path::Path;
//!
//! let mut outcome = index_catalog(Path::new("rancher-catalog")).unwrap();
//! let errors = reconcile_index(&mut outcome.templates);
//! println!("{} templates, {} errors", outcome.templates.len(), errors.len());
//! ```

pub mod compat;
pub mod index;
pub mod model;
pub mod parse;
pub mod path;
pub mod reconcile;

// Re-exports
pub use compat::{parse_platform_version, version_in_range};
pub use index::{index_catalog, CatalogIndexer, IndexOutcome, TemplateIndex};
pub use model::{
    CatalogFile, Question, Template, TemplateKey, Version, VersionId, VersionOverride,
};
pub use parse::{parse_compose_override, parse_template_definition, parse_version_override};
pub use path::{classify_template_path, classify_version_path, TemplatePath, VersionPath};
pub use reconcile::{reconcile_index, reconcile_template};
