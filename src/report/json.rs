//! JSON report formatter.
//!
//! Emits the whole filtered template list for tooling integration.

use super::{Report, ReportFormatter};
use crate::catalog::Template;
use serde::Serialize;
use std::io::Write;

/// Formats reports as JSON.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    target: &'a str,
    templates: &'a [Template],
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    templates: usize,
    versions: usize,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format<W: Write>(&self, report: &Report, writer: &mut W) -> std::io::Result<()> {
        let output = JsonOutput {
            target: &report.target,
            templates: &report.templates,
            summary: JsonSummary {
                templates: report.templates.len(),
                versions: report.version_count(),
            },
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)?;
        Ok(())
    }
}
