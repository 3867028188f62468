//! Catalog source acquisition.
//!
//! A catalog tree comes either from a fresh git clone into a temporary
//! directory or from an existing local directory.

pub mod git;

pub use git::GitFetcher;

use crate::error::{CatalogError, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A catalog tree on disk.
///
/// Temporary checkouts are deleted when this value is dropped.
#[derive(Debug)]
pub struct CatalogCheckout {
    path: PathBuf,
    temp: Option<TempDir>,
}

impl CatalogCheckout {
    /// Use an existing directory as the catalog tree.
    pub fn local(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_dir() {
            return Err(CatalogError::SourceFetch {
                url: path.display().to_string(),
                message: "not a directory".to_string(),
            });
        }
        Ok(Self { path, temp: None })
    }

    /// Take ownership of a temporary checkout directory.
    pub fn temporary(temp: TempDir) -> Self {
        Self {
            path: temp.path().to_path_buf(),
            temp: Some(temp),
        }
    }

    /// Root of the catalog tree.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the tree is deleted on drop.
    pub fn is_temporary(&self) -> bool {
        self.temp.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_checkout_requires_directory() {
        let temp = TempDir::new().unwrap();
        let checkout = CatalogCheckout::local(temp.path()).unwrap();
        assert_eq!(checkout.path(), temp.path());
        assert!(!checkout.is_temporary());

        let missing = CatalogCheckout::local(temp.path().join("missing"));
        assert!(matches!(missing, Err(CatalogError::SourceFetch { .. })));
    }

    #[test]
    fn local_checkout_is_not_removed_on_drop() {
        let temp = TempDir::new().unwrap();
        drop(CatalogCheckout::local(temp.path()).unwrap());
        assert!(temp.path().exists());
    }
}
