//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use crate::config::SettingsOverrides;
use crate::report::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// List the infrastructure service images supported by a Rancher version.
#[derive(Debug, Parser)]
#[command(name = "infra-version")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Target Rancher version (for example v1.6.14)
    pub rancher_version: String,

    /// Catalog branch to clone
    #[arg(short, long, env = "INFRA_VERSION_BRANCH")]
    pub branch: Option<String>,

    /// Catalog repository URL
    #[arg(long, env = "INFRA_VERSION_CATALOG_URL")]
    pub catalog_url: Option<String>,

    /// Index a local catalog tree instead of cloning
    #[arg(long)]
    pub catalog_dir: Option<PathBuf>,

    /// Base category of infrastructure templates
    #[arg(long)]
    pub infra_base: Option<String>,

    /// Path to a settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output the filtered catalog as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit non-zero when any catalog file failed to load
    #[arg(long)]
    pub strict: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Settings given on the command line or through the environment.
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            catalog_url: self.catalog_url.clone(),
            branch: self.branch.clone(),
            catalog_dir: self.catalog_dir.clone(),
            infra_base: self.infra_base.clone(),
        }
    }

    /// Selected output format.
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}
