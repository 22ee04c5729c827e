//! Commands every registry starts with.
mod help;

pub use help::HelpCommand;

use super::{CommandEntry, CommandRegistry};

/// Registers the built-in commands.
///
/// Called once by [`CommandRegistry::new`], so every registry can answer
/// `help` and `help <command>`.
pub(crate) fn register_builtin(registry: &mut CommandRegistry) {
    registry.register(
        "help",
        CommandEntry::new(HelpCommand)
            .description("Shows information about the given command.")
            .usage("help <command>"),
    );
}
