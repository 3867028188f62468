//! Catalog tree indexing.
//!
//! The indexer walks a catalog checkout and routes every file that lives
//! under a template folder to one of four merges:
//!
//! 1. Definition files (`config.yml`, `template.yml`) replace the template
//!    skeleton while keeping what was already accumulated
//! 2. Icons (`catalogIcon*`, `icon*`) are stored base64-encoded
//! 3. A `readme.md` outside version folders becomes the template readme
//! 4. Everything else is attached to the version its folder names
//!
//! Files may arrive in any order; each merge creates the partial record it
//! needs. Per-file failures are collected and the walk continues.

use crate::catalog::model::{CatalogFile, Template, TemplateKey, VersionId};
use crate::catalog::parse::parse_template_definition;
use crate::catalog::path::{classify_template_path, classify_version_path, TemplatePath};
use crate::error::{CatalogError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// File names that define a template.
pub const DEFINITION_FILES: [&str; 2] = ["config.yml", "template.yml"];

/// Prefixes of icon files (case-sensitive).
pub const ICON_PREFIXES: [&str; 2] = ["catalogIcon", "icon"];

/// Readme file name (case-insensitive).
pub const README_FILE: &str = "readme.md";

/// Templates keyed by identity.
pub type TemplateIndex = BTreeMap<TemplateKey, Template>;

/// Everything the walk produced.
#[derive(Debug, Default)]
pub struct IndexOutcome {
    /// Partial and complete templates, keyed by identity
    pub templates: TemplateIndex,

    /// Per-file errors, in walk order
    pub errors: Vec<CatalogError>,
}

/// Walk `root` and index every catalog file below it.
///
/// Hidden directories (such as `.git`) are not descended into and entries
/// are visited in file-name order. Only a path that cannot be made relative
/// to `root` aborts the walk.
pub fn index_catalog(root: &Path) -> Result<IndexOutcome> {
    let mut indexer = CatalogIndexer::new(root);

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                indexer.record(CatalogError::Walk {
                    path,
                    message: err.to_string(),
                });
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        indexer.add_file(entry.path())?;
    }

    let outcome = indexer.finish();
    tracing::debug!(
        "Indexed {} templates ({} errors)",
        outcome.templates.len(),
        outcome.errors.len()
    );
    Ok(outcome)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Accumulates partial template records for one catalog root.
#[derive(Debug)]
pub struct CatalogIndexer {
    root: PathBuf,
    templates: TemplateIndex,
    errors: Vec<CatalogError>,
}

impl CatalogIndexer {
    /// Create an empty indexer for a catalog root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            templates: BTreeMap::new(),
            errors: Vec::new(),
        }
    }

    /// Index a single file given by its full path.
    ///
    /// Files outside template folders are skipped. Read and parse failures
    /// are recorded and `Ok` is returned; only a path outside the root is an
    /// error.
    pub fn add_file(&mut self, full_path: &Path) -> Result<()> {
        let relative =
            full_path
                .strip_prefix(&self.root)
                .map_err(|_| CatalogError::RelativePath {
                    path: full_path.to_path_buf(),
                    root: self.root.clone(),
                })?;

        let Some(template_path) = classify_template_path(relative) else {
            tracing::trace!("Skipping {}: not in a template folder", relative.display());
            return Ok(());
        };

        let Some(filename) = relative.file_name().and_then(|n| n.to_str()) else {
            return Ok(());
        };

        if let Err(err) = self.route(full_path, relative, filename, template_path) {
            self.record(err);
        }

        Ok(())
    }

    /// Templates accumulated so far.
    pub fn templates(&self) -> &TemplateIndex {
        &self.templates
    }

    /// Per-file errors recorded so far.
    pub fn errors(&self) -> &[CatalogError] {
        &self.errors
    }

    /// Finish indexing.
    pub fn finish(self) -> IndexOutcome {
        IndexOutcome {
            templates: self.templates,
            errors: self.errors,
        }
    }

    fn record(&mut self, err: CatalogError) {
        tracing::warn!("{}", err);
        self.errors.push(err);
    }

    fn route(
        &mut self,
        full_path: &Path,
        relative: &Path,
        filename: &str,
        template_path: TemplatePath,
    ) -> Result<()> {
        let key = TemplateKey::new(template_path.base, template_path.template);

        if DEFINITION_FILES.contains(&filename) {
            self.merge_definition(full_path, key)
        } else if ICON_PREFIXES.iter().any(|p| filename.starts_with(p)) {
            self.merge_icon(full_path, key, filename)
        } else if filename.eq_ignore_ascii_case(README_FILE)
            && classify_version_path(relative).is_none()
        {
            self.merge_readme(full_path, key)
        } else {
            self.merge_version_file(full_path, relative, filename)
        }
    }

    fn merge_definition(&mut self, full_path: &Path, key: TemplateKey) -> Result<()> {
        let contents = read_bytes(full_path)?;
        let mut template =
            parse_template_definition(&contents).map_err(|e| CatalogError::FileParse {
                path: full_path.to_path_buf(),
                message: e.to_string(),
            })?;

        template.base = key.base.clone();
        template.folder_name = key.folder_name.clone();

        if let Some(existing) = self.templates.remove(&key) {
            template.icon = existing.icon;
            template.icon_filename = existing.icon_filename;
            template.readme = existing.readme;
            template.versions = existing.versions;
        }

        tracing::debug!("Loaded definition for {}", key);
        self.templates.insert(key, template);
        Ok(())
    }

    fn merge_icon(&mut self, full_path: &Path, key: TemplateKey, filename: &str) -> Result<()> {
        let contents = read_bytes(full_path)?;
        let template = self.entry(key);
        template.icon = STANDARD.encode(contents);
        template.icon_filename = filename.to_string();
        Ok(())
    }

    fn merge_readme(&mut self, full_path: &Path, key: TemplateKey) -> Result<()> {
        let contents = read_text(full_path)?;
        self.entry(key).readme = contents;
        Ok(())
    }

    fn merge_version_file(
        &mut self,
        full_path: &Path,
        relative: &Path,
        filename: &str,
    ) -> Result<()> {
        let Some(version_path) = classify_version_path(relative) else {
            tracing::trace!("Skipping {}: not in a version folder", relative.display());
            return Ok(());
        };

        let Some(id) = VersionId::from_folder(&version_path.folder) else {
            tracing::trace!(
                "Skipping {}: folder '{}' is neither a revision nor a version",
                relative.display(),
                version_path.folder
            );
            return Ok(());
        };

        let contents = read_text(full_path)?;
        let key = TemplateKey::new(version_path.base, version_path.template);
        self.entry(key)
            .add_version_file(id, CatalogFile::new(filename, contents));
        Ok(())
    }

    fn entry(&mut self, key: TemplateKey) -> &mut Template {
        self.templates
            .entry(key)
            .or_insert_with_key(Template::partial)
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| CatalogError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

fn read_text(path: &Path) -> Result<String> {
    read_bytes(path).map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}
