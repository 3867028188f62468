//! Classification of catalog paths.
//!
//! Catalog trees are laid out as `<base>/<template>/...`, with version folders
//! one level further down: `<base>/<template>/<folder>/<file>`. The top-level
//! `templates` folder is the default base; `<name>-templates` and any other
//! top-level folder contribute `<name>` as the base category.

use std::path::{Component, Path};

/// Top-level folder holding templates of the default base.
const DEFAULT_BASE_DIR: &str = "templates";

/// Suffix stripped from top-level folders to get the base category.
const BASE_DIR_SUFFIX: &str = "-templates";

/// A path that lives inside a template folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePath {
    /// Base category ("" for the default base)
    pub base: String,
    /// Template folder name
    pub template: String,
}

/// A path that lives inside a version folder of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPath {
    pub base: String,
    pub template: String,
    /// Name of the version folder (not yet resolved to an identity)
    pub folder: String,
}

/// Classify a path relative to the catalog root as a template path.
///
/// The file must sit inside a template folder.
pub fn classify_template_path(relative: &Path) -> Option<TemplatePath> {
    let parts = components(relative)?;
    if parts.len() < 3 {
        return None;
    }

    Some(TemplatePath {
        base: base_category(parts[0]),
        template: parts[1].to_string(),
    })
}

/// Classify a path relative to the catalog root as a version-folder path.
///
/// The file must sit inside a folder below the template folder.
pub fn classify_version_path(relative: &Path) -> Option<VersionPath> {
    let parts = components(relative)?;
    if parts.len() < 4 {
        return None;
    }

    Some(VersionPath {
        base: base_category(parts[0]),
        template: parts[1].to_string(),
        folder: parts[2].to_string(),
    })
}

/// Split into normal UTF-8 components, rejecting hidden and odd ones.
fn components(relative: &Path) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str()?;
                if part.starts_with('.') {
                    return None;
                }
                parts.push(part);
            }
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(parts)
}

fn base_category(dir: &str) -> String {
    if dir == DEFAULT_BASE_DIR {
        return String::new();
    }
    dir.strip_suffix(BASE_DIR_SUFFIX).unwrap_or(dir).to_string()
}
