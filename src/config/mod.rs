//! Run settings.
//!
//! - Schema and defaults in [`schema`]
//! - File loading in [`loader`]
//!
//! # Resolution Order
//!
//! Later sources override earlier ones:
//! 1. Built-in defaults
//! 2. Settings file (`--config`)
//! 3. Environment variables
//! 4. Command-line flags

pub mod loader;
pub mod schema;

pub use loader::{load_settings_file, parse_settings};
pub use schema::{Settings, SettingsOverrides, DEFAULT_CATALOG_URL, DEFAULT_INFRA_BASE};
