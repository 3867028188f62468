//! Version filtering against a target platform version.

use crate::catalog::compat::version_in_range;
use crate::catalog::{Template, TemplateIndex, Version};
use semver::Version as PlatformVersion;

/// Keep only the versions of each template that support `target`.
///
/// A version survives when it has a version string and its declared range
/// contains `target`. Templates are kept even when no version survives, and
/// the relative order of versions is preserved.
pub fn filter_templates(templates: TemplateIndex, target: &PlatformVersion) -> Vec<Template> {
    templates
        .into_values()
        .map(|mut template| {
            template.versions.retain(|version| supports(version, target));
            template
        })
        .collect()
}

/// Whether one version is usable on `target`.
pub fn supports(version: &Version, target: &PlatformVersion) -> bool {
    !version.version.is_empty()
        && version_in_range(
            &version.minimum_rancher_version,
            target,
            &version.maximum_rancher_version,
        )
}
