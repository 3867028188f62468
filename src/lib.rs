//! infra-version - Rancher catalog indexing and infrastructure image reports.
//!
//! Indexes a Rancher catalog tree into templates and versions, reconciles
//! per-version override files, filters versions by a target Rancher version
//! and lists the images used by infrastructure services.
//!
//! # Modules
//!
//! - [`catalog`] - Tree walking, classification, merging and reconciliation
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings loading and resolution
//! - [`error`] - Error types and result aliases
//! - [`report`] - Version filtering and report formatting
//! - [`scan`] - Index, reconcile and filter in one call
//! - [`source`] - Catalog checkout (git clone or local directory)
//!
//! # Example
//!
//! ```
//! use infra_version::report::dedupe;
//!
//! let images = dedupe(vec!["a", "b", "a", "c", "b"]);
//! assert_eq!(images, vec!["a", "b", "c"]);
//! ```
//!
//! For scanning a catalog tree, see the integration tests.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod scan;
pub mod source;

pub use error::{CatalogError, Result};
pub use scan::{scan_catalog, ScanOutcome};
