//! Settings schema.
//!
//! Settings control where the catalog comes from and which templates the
//! text report covers. Every key is optional in the settings file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Catalog repository used when nothing else is configured.
pub const DEFAULT_CATALOG_URL: &str = "https://github.com/rancher/rancher-catalog.git";

/// Base category of infrastructure templates.
pub const DEFAULT_INFRA_BASE: &str = "infra";

/// Resolved run settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Git URL of the catalog repository
    pub catalog_url: String,

    /// Branch to clone (repository default when unset)
    pub branch: Option<String>,

    /// Local catalog tree to index instead of cloning
    pub catalog_dir: Option<PathBuf>,

    /// Base category whose templates are reported
    pub infra_base: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            branch: None,
            catalog_dir: None,
            infra_base: DEFAULT_INFRA_BASE.to_string(),
        }
    }
}

/// Values that take precedence over the settings file.
///
/// Typically filled from command-line flags and their environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub catalog_url: Option<String>,
    pub branch: Option<String>,
    pub catalog_dir: Option<PathBuf>,
    pub infra_base: Option<String>,
}

impl Settings {
    /// Apply overrides; set values replace the current ones.
    pub fn apply(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(url) = overrides.catalog_url {
            self.catalog_url = url;
        }
        if overrides.branch.is_some() {
            self.branch = overrides.branch;
        }
        if overrides.catalog_dir.is_some() {
            self.catalog_dir = overrides.catalog_dir;
        }
        if let Some(base) = overrides.infra_base {
            self.infra_base = base;
        }
        self
    }

    /// Branch to clone, ignoring blank values.
    pub fn branch(&self) -> Option<&str> {
        self.branch
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
    }
}
