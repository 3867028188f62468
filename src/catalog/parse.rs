//! Content parsers for catalog files.
//!
//! These turn raw file bytes into the records the indexer merges:
//! definition files (`config.yml`, `template.yml`) into a [`Template`]
//! skeleton, and `rancher-compose.yml` / `template-version.yml` into a
//! [`VersionOverride`].

use crate::catalog::model::{Template, VersionOverride};
use serde_yaml::Value;

/// Result of parsing one catalog file.
pub type ParseResult<T> = std::result::Result<T, serde_yaml::Error>;

/// Keys that may hold catalog metadata inside a compose file.
const CATALOG_KEYS: [&str; 2] = [".catalog", "catalog"];

/// Parse a template definition file into a skeleton template.
///
/// Path-derived fields (base, folder name) and accumulated data (icon,
/// readme, versions) are left empty for the indexer to fill in.
pub fn parse_template_definition(contents: &[u8]) -> ParseResult<Template> {
    match parse_document(contents)? {
        Value::Null => Ok(Template::default()),
        doc => serde_yaml::from_value(doc),
    }
}

/// Parse the catalog section of a `rancher-compose.yml` file.
///
/// The section is read from a top-level `.catalog` (or `catalog`) key, or
/// from `services.catalog` in v2 compose files. A compose file without one
/// yields an empty override.
pub fn parse_compose_override(contents: &[u8]) -> ParseResult<VersionOverride> {
    let doc = parse_document(contents)?;

    let section = CATALOG_KEYS
        .iter()
        .find_map(|key| doc.get(key))
        .or_else(|| {
            let services = doc.get("services")?;
            CATALOG_KEYS.iter().find_map(|key| services.get(key))
        });

    match section {
        None | Some(Value::Null) => Ok(VersionOverride::default()),
        Some(section) => serde_yaml::from_value(section.clone()),
    }
}

/// Parse a `template-version.yml` file.
pub fn parse_version_override(contents: &[u8]) -> ParseResult<VersionOverride> {
    match parse_document(contents)? {
        Value::Null => Ok(VersionOverride::default()),
        doc => serde_yaml::from_value(doc),
    }
}

/// Parse a YAML document, treating blank or comment-only content as null.
fn parse_document(contents: &[u8]) -> ParseResult<Value> {
    let text = String::from_utf8_lossy(contents);
    let blank = text
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#') || line == "---");
    if blank {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_reads_camel_case_keys() {
        let yaml = r#"
name: Network Services
description: Rancher networking
version: v0.2.0
defaultVersion: v0.2.1
category: Rancher services
maintainer: Rancher Labs
projectURL: https://github.com/rancher
isSystem: true
labels:
  io.rancher.orchestration.supported: cattle
"#;
        let template = parse_template_definition(yaml.as_bytes()).unwrap();
        assert_eq!(template.name, "Network Services");
        assert_eq!(template.default_version, "v0.2.1");
        assert_eq!(template.project_url, "https://github.com/rancher");
        assert_eq!(template.is_system, "true");
        assert_eq!(
            template.labels.get("io.rancher.orchestration.supported"),
            Some(&"cattle".to_string())
        );
        assert!(template.base.is_empty());
        assert!(template.versions.is_empty());
    }

    #[test]
    fn definition_accepts_snake_case_and_numbers() {
        let yaml = "name: foo\nversion: 1.0\ndefault_version: 2\nproject_url: http://x\n";
        let template = parse_template_definition(yaml.as_bytes()).unwrap();
        assert_eq!(template.version, "1.0");
        assert_eq!(template.default_version, "2");
        assert_eq!(template.project_url, "http://x");
    }

    #[test]
    fn definition_ignores_unknown_keys() {
        let yaml = "name: foo\nsomething_else: [1, 2]\n";
        let template = parse_template_definition(yaml.as_bytes()).unwrap();
        assert_eq!(template.name, "foo");
    }

    #[test]
    fn empty_definition_is_empty_skeleton() {
        let template = parse_template_definition(b"# nothing here\n\n").unwrap();
        assert_eq!(template, Template::default());
    }

    #[test]
    fn malformed_definition_is_error() {
        assert!(parse_template_definition(b"name: [unclosed\n").is_err());
        assert!(parse_template_definition(b"- just\n- a list\n").is_err());
    }

    #[test]
    fn compose_reads_dot_catalog_section() {
        let yaml = r#"
.catalog:
  name: ipsec
  version: v0.1.0
  minimum_rancher_version: v1.2.0-pre4-rc1
  maximum_rancher_version: v1.5.99
  upgrade_from: "<=v0.0.9"
  questions:
    - variable: MTU
      label: MTU
      type: int
      default: 1500
      required: true
ipsec:
  scale: 1
"#;
        let over = parse_compose_override(yaml.as_bytes()).unwrap();
        assert_eq!(over.version, "v0.1.0");
        assert_eq!(over.minimum_rancher_version, "v1.2.0-pre4-rc1");
        assert_eq!(over.maximum_rancher_version, "v1.5.99");
        assert_eq!(over.upgrade_from, "<=v0.0.9");
        assert_eq!(over.questions.len(), 1);
        assert_eq!(over.questions[0].variable, "MTU");
        assert_eq!(over.questions[0].question_type, "int");
        assert!(over.questions[0].required);
    }

    #[test]
    fn definition_with_boolean_label_keeps_fields() {
        let yaml = "name: Foo\nlabels:\n  io.rancher.certified: true\n";
        let template = parse_template_definition(yaml.as_bytes()).unwrap();
        assert_eq!(template.name, "Foo");
        assert_eq!(template.labels["io.rancher.certified"], "true");
    }

    #[test]
    fn compose_with_numeric_options_keeps_range() {
        let yaml = r#"
.catalog:
  version: v0.2.0
  minimum_rancher_version: v9.0.0
  questions:
    - variable: SCALE
      type: enum
      options: [1, 2]
"#;
        let over = parse_compose_override(yaml.as_bytes()).unwrap();
        assert_eq!(over.minimum_rancher_version, "v9.0.0");
        assert_eq!(over.questions[0].options, ["1", "2"]);
    }

    #[test]
    fn compose_reads_v2_services_catalog() {
        let yaml = r#"
version: '2'
services:
  .catalog:
    minimumRancherVersion: v0.9.0
  web:
    scale: 2
"#;
        let over = parse_compose_override(yaml.as_bytes()).unwrap();
        assert_eq!(over.minimum_rancher_version, "v0.9.0");
        assert!(over.version.is_empty());
    }

    #[test]
    fn compose_without_catalog_is_empty_override() {
        let over = parse_compose_override(b"web:\n  scale: 1\n").unwrap();
        assert_eq!(over, VersionOverride::default());
    }

    #[test]
    fn compose_with_bad_catalog_is_error() {
        assert!(parse_compose_override(b".catalog:\n  questions: 7\n").is_err());
    }

    #[test]
    fn version_override_reads_top_level() {
        let yaml = "version: v2.0.0\nminimum_rancher_version: v1.6.0\n";
        let over = parse_version_override(yaml.as_bytes()).unwrap();
        assert_eq!(over.version, "v2.0.0");
        assert_eq!(over.minimum_rancher_version, "v1.6.0");
        assert!(over.maximum_rancher_version.is_empty());
    }

    #[test]
    fn malformed_version_override_is_error() {
        assert!(parse_version_override(b"version: [\n").is_err());
    }
}
