//! Settings file loading.

use crate::config::schema::Settings;
use crate::error::{CatalogError, Result};
use std::fs;
use std::path::Path;

/// Load a settings file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CatalogError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CatalogError::Io(e)
        }
    })?;

    parse_settings(&content, path)
}

/// Parse YAML content into settings.
///
/// Missing keys keep their defaults; an empty document yields the defaults.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_settings(content: &str, source_path: &Path) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    serde_yaml::from_str(content).map_err(|e| CatalogError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
