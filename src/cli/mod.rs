//! Command-line interface.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`run`] - The run command

pub mod args;
pub mod run;

pub use args::Cli;
pub use run::{CommandResult, RunCommand};
