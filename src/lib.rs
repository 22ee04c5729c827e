//! subcmd - named subcommand registry and dispatcher.
//!
//! A program registers its subcommands with descriptive metadata, defines
//! its global flags, and lets the dispatcher route the process arguments:
//!
//! - Sorted command registry with a built-in `help` command
//! - Usage and help text generated from command metadata
//! - Usage reminder printed whenever a command fails
//! - Banner built from program metadata, loadable from TOML
//!
//! # Quick Start
//!
//! ```rust
//! use std::io::Write;
//!
//! use subcmd::cli::{Command, CommandEntry, CommandRegistry, CommandResult, Context, Dispatcher, FlagSet};
//!
//! struct Greet;
//!
//! impl Command for Greet {
//!     fn execute(&self, ctx: &mut Context<'_>) -> CommandResult {
//!         writeln!(ctx.out(), "hello")?;
//!         Ok(())
//!     }
//! }
//!
//! let mut registry = CommandRegistry::new();
//! registry.register("greet", CommandEntry::new(Greet).description("says hello"));
//!
//! let dispatcher = Dispatcher::new(registry, FlagSet::new());
//!
//! let mut out = Vec::new();
//! dispatcher.dispatch(["greet"], &mut out)?;
//! assert_eq!(out, b"hello\n");
//! # Ok::<(), subcmd::cli::CliError>(())
//! ```

/// Command registry, flag definitions and dispatch.
pub mod cli;

/// Program metadata and general settings.
pub mod config;

/// Error types for configuration loading.
pub mod error;

/// Tracing subscriber setup.
pub mod tracing_config;

pub use error::{Result, SubcmdError};
