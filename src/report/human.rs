//! Human-readable report formatter.
//!
//! Prints one block per supported version of every infrastructure template:
//!
//! ```text
//! template:Network Services
//! revision:<nil>
//! version:v0.2.9
//! [rancher/network-manager:v0.7.20 rancher/metadata:v0.9.5]
//!
//! ```

use super::images::{extract_images, is_docker_compose};
use super::{Report, ReportFormatter};
use std::io::Write;

/// Printed in place of a revision for semver-identified versions.
const NO_REVISION: &str = "<nil>";

/// Formats reports for terminal display.
pub struct HumanFormatter {
    /// Base category whose templates are printed.
    pub infra_base: String,
}

impl HumanFormatter {
    /// Create a formatter for the given infrastructure base.
    pub fn new(infra_base: impl Into<String>) -> Self {
        Self {
            infra_base: infra_base.into(),
        }
    }
}

impl ReportFormatter for HumanFormatter {
    fn format<W: Write>(&self, report: &Report, writer: &mut W) -> std::io::Result<()> {
        writeln!(
            writer,
            "searching infra services of Rancher version {}",
            report.target
        )?;

        for template in report
            .templates
            .iter()
            .filter(|t| t.base == self.infra_base)
        {
            for version in &template.versions {
                writeln!(writer, "template:{}", template.display_name())?;
                match version.id.revision() {
                    Some(revision) => writeln!(writer, "revision:{}", revision)?,
                    None => writeln!(writer, "revision:{}", NO_REVISION)?,
                }
                writeln!(writer, "version:{}", version.version)?;

                for file in version.files.iter().filter(|f| is_docker_compose(&f.name)) {
                    writeln!(writer, "[{}]", extract_images(&file.contents).join(" "))?;
                }

                writeln!(writer)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogFile, Template, TemplateKey, Version, VersionId};

    fn render(formatter: &HumanFormatter, report: &Report) -> String {
        let mut out = Vec::new();
        formatter.format(report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn infra_template() -> Template {
        let mut template = Template::partial(&TemplateKey::new("infra", "network-services"));
        template.name = "Network Services".into();

        let mut revision = Version::new(VersionId::Revision(7));
        revision.version = "v0.2.0".into();
        revision.files.push(CatalogFile::new(
            "docker-compose.yml",
            "a:\n  image: rancher/a:1\nb:\n  image: rancher/a:1\n",
        ));
        revision.files.push(CatalogFile::new("rancher-compose.yml", "x:\n  image: skipped\n"));

        let semver = Version::new(VersionId::Semver("v0.3.0".into()));

        template.versions = vec![revision, semver];
        template
    }

    #[test]
    fn prints_header_and_one_block_per_version() {
        let report = Report {
            target: "v1.6.6".into(),
            templates: vec![infra_template()],
        };

        let output = render(&HumanFormatter::new("infra"), &report);

        let expected = "searching infra services of Rancher version v1.6.6\n\
                        template:Network Services\n\
                        revision:7\n\
                        version:v0.2.0\n\
                        [rancher/a:1]\n\
                        \n\
                        template:Network Services\n\
                        revision:<nil>\n\
                        version:v0.3.0\n\
                        \n";
        assert_eq!(output, expected);
    }

    #[test]
    fn skips_templates_of_other_bases() {
        let mut other = infra_template();
        other.base = String::new();
        let report = Report {
            target: "v1.6.6".into(),
            templates: vec![other],
        };

        let output = render(&HumanFormatter::new("infra"), &report);

        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn honours_custom_infra_base() {
        let mut other = infra_template();
        other.base = "system".into();
        let report = Report {
            target: "v1.6.6".into(),
            templates: vec![other],
        };

        let output = render(&HumanFormatter::new("system"), &report);

        assert!(output.contains("template:Network Services"));
    }
}
