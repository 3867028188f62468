//! End-to-end scan of a catalog tree.
//!
//! Indexes a tree, reconciles override files and filters every template
//! down to the versions that support a target platform version.

use crate::catalog::{index_catalog, parse_platform_version, reconcile_index};
use crate::error::{CatalogError, Result};
use crate::report::{filter_templates, Report};
use std::path::Path;

/// Result of scanning one catalog tree.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Filtered templates for the target version
    pub report: Report,

    /// Recoverable errors from indexing and reconciliation, in order
    pub errors: Vec<CatalogError>,
}

impl ScanOutcome {
    /// Whether any recoverable error was recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse the target platform version.
///
/// A leading `v` is accepted and missing minor or patch components are
/// treated as zero.
pub fn parse_target(raw: &str) -> Result<semver::Version> {
    parse_platform_version(raw).map_err(|e| CatalogError::InvalidTargetVersion {
        version: raw.to_string(),
        message: e.to_string(),
    })
}

/// Scan the catalog tree at `root` for versions supporting `target`.
///
/// # Errors
///
/// Returns an error when `target` is not a version or the tree cannot be
/// walked at all. Problems with individual files are collected in
/// [`ScanOutcome::errors`].
pub fn scan_catalog(root: &Path, target: &str) -> Result<ScanOutcome> {
    let platform = parse_target(target)?;

    let outcome = index_catalog(root)?;
    let mut templates = outcome.templates;
    let mut errors = outcome.errors;
    tracing::debug!(
        "Indexed {} templates under {}",
        templates.len(),
        root.display()
    );

    errors.extend(reconcile_index(&mut templates));

    let report = Report {
        target: target.to_string(),
        templates: filter_templates(templates, &platform),
    };
    tracing::debug!(
        "{} versions support {}",
        report.version_count(),
        report.target
    );

    Ok(ScanOutcome { report, errors })
}
