//! Version reconciliation.
//!
//! Runs after the walk, once every file of every version folder is known.
//! Each version picks up its own readme and the metadata declared by
//! `rancher-compose.yml` and `template-version.yml`, the latter winning.

use crate::catalog::index::{TemplateIndex, README_FILE};
use crate::catalog::model::{Template, Version, VersionOverride};
use crate::catalog::parse::{parse_compose_override, parse_version_override, ParseResult};
use crate::error::CatalogError;

/// Compose file carrying a `.catalog` section.
pub const COMPOSE_FILE: &str = "rancher-compose.yml";

/// Dedicated version metadata file.
pub const VERSION_FILE: &str = "template-version.yml";

/// Reconcile every version of every template in place.
///
/// Returns the override parse failures; versions whose overrides failed keep
/// their folder-derived metadata.
pub fn reconcile_index(templates: &mut TemplateIndex) -> Vec<CatalogError> {
    let mut errors = Vec::new();
    for template in templates.values_mut() {
        errors.extend(reconcile_template(template));
    }
    errors
}

/// Reconcile the versions of a single template in place.
pub fn reconcile_template(template: &mut Template) -> Vec<CatalogError> {
    let mut errors = Vec::new();

    for index in 0..template.versions.len() {
        let label = template.version_label(index);
        let reconciled = reconcile_version(&template.versions[index], &label, &mut errors);
        template.versions[index] = reconciled;
    }

    errors
}

type OverrideParser = fn(&[u8]) -> ParseResult<VersionOverride>;

fn reconcile_version(version: &Version, label: &str, errors: &mut Vec<CatalogError>) -> Version {
    let mut reconciled = version.clone();

    let overrides: [(&str, OverrideParser); 2] = [
        (COMPOSE_FILE, parse_compose_override),
        (VERSION_FILE, parse_version_override),
    ];

    for (name, parse) in overrides {
        let Some(file) = version.find_file(|n| n == name) else {
            continue;
        };

        match parse(file.contents.as_bytes()) {
            Ok(over) => reconciled.apply_override(over),
            Err(e) => {
                let err = CatalogError::OverrideParse {
                    id: label.to_string(),
                    file: name.to_string(),
                    message: e.to_string(),
                };
                tracing::warn!("{}", err);
                errors.push(err);
            }
        }
    }

    reconciled.readme = version
        .find_file(|n| n.eq_ignore_ascii_case(README_FILE))
        .map(|f| f.contents.clone())
        .unwrap_or_default();

    reconciled
}
