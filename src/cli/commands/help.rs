use crate::cli::{Command, CommandResult, Context};

/// Built-in `help` command.
///
/// `<program> help <command>` renders that command's usage block. With no
/// target it renders its own usage. An unknown target fails with
/// `CliError::CommandNotFound`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelpCommand;

impl Command for HelpCommand {
    fn execute(&self, ctx: &mut Context<'_>) -> CommandResult {
        let dispatcher = ctx.dispatcher();
        let target = ctx
            .args()
            .first()
            .cloned()
            .unwrap_or_else(|| "help".to_string());

        dispatcher.usage(&target, ctx.out())
    }
}
