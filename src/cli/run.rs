//! The run command.
//!
//! Resolves settings, obtains a catalog tree, scans it for the target
//! version and prints the report.

use std::io::Write;

use anyhow::Context;

use crate::cli::args::Cli;
use crate::config::{load_settings_file, Settings};
use crate::error::{CatalogError, Result};
use crate::report::{HumanFormatter, JsonFormatter, OutputFormat, Report, ReportFormatter};
use crate::scan::{parse_target, scan_catalog};
use crate::source::{CatalogCheckout, GitFetcher};

/// Result of command execution.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// The run command implementation.
pub struct RunCommand {
    target: String,
    settings: Settings,
    format: OutputFormat,
    strict: bool,
}

impl RunCommand {
    /// Build the command from parsed arguments, loading the settings file if
    /// one was given.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let settings = match &cli.config {
            Some(path) => load_settings_file(path)?,
            None => Settings::default(),
        };

        Ok(Self::new(
            &cli.rancher_version,
            settings.apply(cli.overrides()),
            cli.output_format(),
            cli.strict,
        ))
    }

    /// Create a run command from resolved settings.
    pub fn new(target: &str, settings: Settings, format: OutputFormat, strict: bool) -> Self {
        Self {
            target: target.to_string(),
            settings,
            format,
            strict,
        }
    }

    /// Resolved settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run against the catalog and print the report to stdout.
    pub fn execute(&self) -> Result<CommandResult> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.execute_to(&mut out)
    }

    /// Run against the catalog and write the report to `writer`.
    pub fn execute_to<W: Write>(&self, writer: &mut W) -> Result<CommandResult> {
        // Reject a bad target before fetching anything.
        parse_target(&self.target)?;

        let checkout = self.checkout()?;
        let outcome = scan_catalog(checkout.path(), &self.target)?;

        self.write_report(&outcome.report, writer)
            .context("Failed to write report")?;

        if outcome.has_errors() {
            tracing::error!(
                "{} catalog file(s) could not be loaded:\n{}",
                outcome.errors.len(),
                summarize(&outcome.errors)
            );
            if self.strict {
                return Ok(CommandResult::failure(1));
            }
        }

        Ok(CommandResult::success())
    }

    fn checkout(&self) -> Result<CatalogCheckout> {
        if let Some(dir) = &self.settings.catalog_dir {
            tracing::debug!("Using local catalog at {}", dir.display());
            return CatalogCheckout::local(dir);
        }

        let cwd = std::env::current_dir().map_err(CatalogError::WorkingDir)?;
        GitFetcher::new(&self.settings.catalog_url).fetch(&cwd, self.settings.branch())
    }

    fn write_report<W: Write>(&self, report: &Report, writer: &mut W) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Json => JsonFormatter::new().format(report, writer),
            OutputFormat::Human => {
                HumanFormatter::new(&self.settings.infra_base).format(report, writer)
            }
        }
    }
}

fn summarize(errors: &[CatalogError]) -> String {
    errors
        .iter()
        .map(|e| format!("  {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn local(root: &Path) -> Settings {
        Settings {
            catalog_dir: Some(root.to_path_buf()),
            ..Default::default()
        }
    }

    fn human(target: &str, settings: Settings, strict: bool) -> RunCommand {
        RunCommand::new(target, settings, OutputFormat::Human, strict)
    }

    fn run(command: &RunCommand) -> (CommandResult, String) {
        let mut out = Vec::new();
        let result = command.execute_to(&mut out).unwrap();
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn prints_infra_report_for_local_catalog() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "infra-templates/dns/config.yml", "name: DNS\n");
        write(
            temp.path(),
            "infra-templates/dns/0/docker-compose.yml",
            "dns:\n  image: rancher/dns:v0.15.3\n",
        );
        write(
            temp.path(),
            "infra-templates/dns/0/rancher-compose.yml",
            ".catalog:\n  version: v0.15.3\n",
        );

        let command = human("v1.6.0", local(temp.path()), false);
        let (result, output) = run(&command);

        assert_eq!(result, CommandResult::success());
        assert!(output.starts_with("searching infra services of Rancher version v1.6.0\n"));
        let block = "template:DNS\nrevision:0\nversion:v0.15.3\n[rancher/dns:v0.15.3]\n";
        assert!(output.contains(block));
    }

    #[test]
    fn strict_mode_fails_on_recoverable_errors() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "infra-templates/dns/config.yml", "name: [\n");

        let lenient = human("v1.6.0", local(temp.path()), false);
        assert!(run(&lenient).0.success);

        let strict = human("v1.6.0", local(temp.path()), true);
        let (result, output) = run(&strict);
        assert_eq!(result, CommandResult::failure(1));
        assert!(output.starts_with("searching infra services"));
    }

    #[test]
    fn invalid_target_fails_before_checkout() {
        let settings = Settings {
            catalog_dir: Some("/nonexistent/catalog".into()),
            ..Default::default()
        };
        let command = human("not-a-version", settings, false);

        let err = command.execute_to(&mut Vec::new()).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidTargetVersion { .. }));
    }

    #[test]
    fn missing_catalog_dir_is_fatal() {
        let temp = TempDir::new().unwrap();
        let command = human("v1.6.0", local(&temp.path().join("missing")), false);

        let err = command.execute_to(&mut Vec::new()).unwrap_err();
        assert!(matches!(err, CatalogError::SourceFetch { .. }));
    }

    #[test]
    fn settings_file_is_overridden_by_flags() {
        use clap::Parser;

        let temp = TempDir::new().unwrap();
        let config = temp.path().join("settings.yml");
        fs::write(&config, "infra_base: system\nbranch: v1.6-release\n").unwrap();

        let cli = Cli::try_parse_from([
            "infra-version",
            "v1.6.0",
            "--config",
            config.to_str().unwrap(),
            "--infra-base",
            "infra",
        ])
        .unwrap();
        let command = RunCommand::from_cli(&cli).unwrap();

        assert_eq!(command.settings().infra_base, "infra");
        assert_eq!(command.settings().branch(), Some("v1.6-release"));
    }
}
