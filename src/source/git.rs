//! Git catalog fetching.
//!
//! Clones the catalog repository into a temporary directory that lives as
//! long as the returned [`CatalogCheckout`].

use crate::error::{CatalogError, Result};
use crate::source::CatalogCheckout;
use std::path::Path;
use std::process::{Command, Stdio};

/// Prefix of the temporary checkout directory.
const CHECKOUT_PREFIX: &str = "rancher-catalog-";

/// Fetches a catalog from a git repository.
#[derive(Debug, Clone)]
pub struct GitFetcher {
    url: String,
}

impl GitFetcher {
    /// Create a fetcher for a repository URL (or local repository path).
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// The repository URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Arguments passed to `git` to clone into `dest`.
    pub fn clone_args(&self, dest: &Path, branch: Option<&str>) -> Vec<String> {
        let mut args = vec!["clone".to_string(), "--depth".to_string(), "1".to_string()];

        if let Some(branch) = branch {
            args.extend([
                "-b".to_string(),
                branch.to_string(),
                "--single-branch".to_string(),
            ]);
        }

        args.push(self.url.clone());
        args.push(dest.to_string_lossy().into_owned());
        args
    }

    /// Clone the repository into a fresh temporary directory under `parent`.
    ///
    /// Git's progress output is passed through to stderr. The directory is
    /// removed when the checkout is dropped, including on failure.
    pub fn fetch(&self, parent: &Path, branch: Option<&str>) -> Result<CatalogCheckout> {
        let temp = tempfile::Builder::new()
            .prefix(CHECKOUT_PREFIX)
            .tempdir_in(parent)
            .map_err(|source| CatalogError::TempDir {
                parent: parent.to_path_buf(),
                source,
            })?;

        let branch_note = branch
            .map(|b| format!(" (branch {})", b))
            .unwrap_or_default();
        tracing::info!(
            "Cloning {}{} into {}",
            self.url,
            branch_note,
            temp.path().display()
        );

        let status = Command::new("git")
            .args(self.clone_args(temp.path(), branch))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| CatalogError::SourceFetch {
                url: self.url.clone(),
                message: format!("failed to run git: {}", e),
            })?;

        if !status.success() {
            return Err(CatalogError::SourceFetch {
                url: self.url.clone(),
                message: format!("git clone exited with {}", status),
            });
        }

        Ok(CatalogCheckout::temporary(temp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Serialize git-process tests to avoid flaky failures under parallel execution
    static GIT_LOCK: Mutex<()> = Mutex::new(());

    fn git(dir: &Path, args: &[&str]) {
        let output = Command::new("git")
            .args(["-c", "user.name=Test", "-c", "user.email=test@test.com"])
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    /// Create a repository with one catalog template committed on `main`.
    fn create_catalog_repo(parent: &Path) -> PathBuf {
        let repo = parent.join("catalog-repo");
        fs::create_dir_all(repo.join("infra-templates/ipsec/1")).unwrap();
        fs::write(
            repo.join("infra-templates/ipsec/config.yml"),
            "name: IPsec\n",
        )
        .unwrap();
        fs::write(
            repo.join("infra-templates/ipsec/1/docker-compose.yml"),
            "ipsec:\n  image: rancher/net:v0.11.3\n",
        )
        .unwrap();

        git(&repo, &["init", "--initial-branch=main"]);
        git(&repo, &["add", "."]);
        git(&repo, &["commit", "-m", "Initial catalog"]);
        repo
    }

    #[test]
    fn clone_args_without_branch() {
        let fetcher = GitFetcher::new("https://github.com/rancher/rancher-catalog.git");
        let args = fetcher.clone_args(Path::new("/tmp/dest"), None);
        assert_eq!(
            args,
            [
                "clone",
                "--depth",
                "1",
                "https://github.com/rancher/rancher-catalog.git",
                "/tmp/dest"
            ]
        );
    }

    #[test]
    fn clone_args_with_branch_are_single_branch() {
        let fetcher = GitFetcher::new("https://example.com/catalog.git");
        let args = fetcher.clone_args(Path::new("/tmp/dest"), Some("v1.6-release"));
        assert!(args
            .windows(3)
            .any(|w| *w == ["-b", "v1.6-release", "--single-branch"]));
        assert_eq!(args.last().unwrap(), "/tmp/dest");
    }

    #[test]
    fn clone_from_local_repo() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp = TempDir::new().unwrap();
        let repo = create_catalog_repo(temp.path());
        let work = temp.path().join("work");
        fs::create_dir_all(&work).unwrap();

        let fetcher = GitFetcher::new(repo.to_string_lossy());
        let checkout = fetcher.fetch(&work, Some("main")).unwrap();

        assert!(checkout.is_temporary());
        assert!(checkout.path().starts_with(&work));
        assert!(checkout
            .path()
            .join("infra-templates/ipsec/config.yml")
            .exists());
    }

    #[test]
    fn checkout_is_removed_on_drop() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp = TempDir::new().unwrap();
        let repo = create_catalog_repo(temp.path());
        let work = temp.path().join("work");
        fs::create_dir_all(&work).unwrap();

        let checkout = GitFetcher::new(repo.to_string_lossy())
            .fetch(&work, None)
            .unwrap();
        let path = checkout.path().to_path_buf();
        assert!(path.exists());

        drop(checkout);

        assert!(!path.exists());
    }

    #[test]
    fn invalid_repo_returns_fetch_error_and_cleans_up() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp = TempDir::new().unwrap();

        let err = GitFetcher::new("/nonexistent/path/repo.git")
            .fetch(temp.path(), None)
            .unwrap_err();

        assert!(matches!(err, CatalogError::SourceFetch { .. }));
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn missing_parent_is_temp_dir_error() {
        let temp = TempDir::new().unwrap();
        let err = GitFetcher::new("unused")
            .fetch(&temp.path().join("does-not-exist"), None)
            .unwrap_err();
        assert!(matches!(err, CatalogError::TempDir { .. }));
    }
}
