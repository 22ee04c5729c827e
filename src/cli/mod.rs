//! Command registry and dispatcher.
//!
//! Programs register named subcommands in a [`CommandRegistry`], define
//! their global flags in a [`FlagSet`], and hand both to a [`Dispatcher`].
//! The dispatcher routes an argument vector to the matching command and
//! renders help and usage text from each command's metadata.

mod commands;
mod context;
mod dispatcher;
mod flags;
pub mod formatting;
mod registry;
mod types;

#[cfg(test)]
mod tests;

pub use commands::HelpCommand;
pub use context::Context;
pub use dispatcher::Dispatcher;
pub use flags::{FlagInfo, FlagKind, FlagSet};
pub use registry::CommandRegistry;
pub use types::{CliError, Command, CommandEntry, CommandResult, ConfigurationError};
