//! Filtered catalog reports.
//!
//! This module filters an indexed catalog down to the versions that support a
//! target platform version and formats the result:
//! - [`filter`] - version selection by compatibility range
//! - [`images`] - image extraction from docker-compose files
//! - [`human`] - line-oriented text for infrastructure templates
//! - [`json`] - the full filtered template list as JSON

pub mod filter;
pub mod human;
pub mod images;
pub mod json;

use crate::catalog::Template;
use std::io::Write;

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Templates filtered for one target version.
#[derive(Debug, Clone)]
pub struct Report {
    /// Target platform version as given by the user
    pub target: String,

    /// Every template, holding only its supported versions
    pub templates: Vec<Template>,
}

impl Report {
    /// Number of versions that survived filtering.
    pub fn version_count(&self) -> usize {
        self.templates.iter().map(|t| t.versions.len()).sum()
    }
}

/// Trait for formatting reports.
pub trait ReportFormatter {
    /// Format a report to the given writer.
    fn format<W: Write>(&self, report: &Report, writer: &mut W) -> std::io::Result<()>;
}

pub use filter::{filter_templates, supports};
pub use human::HumanFormatter;
pub use images::{dedupe, extract_images};
pub use json::JsonFormatter;
