use std::fmt;

use thiserror::Error;

use super::Context;

/// Errors that can occur while resolving or executing a command.
///
/// These are the recoverable failures: they are returned to whoever called
/// `usage`, `execute`, `help` or `dispatch`. Wiring mistakes are reported
/// through [`ConfigurationError`] instead.
#[derive(Error, Debug)]
pub enum CliError {
    /// No command is registered under the requested name.
    ///
    /// Carries the name exactly as it was queried.
    #[error("No such command \"{0}\".")]
    CommandNotFound(String),

    /// The argument vector could not be parsed.
    ///
    /// Returned for unknown flags, flags missing their value, or values a
    /// command could not interpret.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A command ran but could not complete.
    #[error("{0}")]
    ExecutionFailed(String),

    /// Writing to the output sink failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result returned by every command and by the dispatcher entry points.
pub type CommandResult = Result<(), CliError>;

/// Programmer wiring mistakes discovered at run time.
///
/// These are never returned through a `Result`. The registry, the flag set
/// and the usage renderer `panic!` with the display text of one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Two commands were registered under the same name.
    #[error("Command \"{name}\" was already registered.")]
    DuplicateCommand {
        /// The name registered twice.
        name: String,
    },

    /// A command was registered under an empty name.
    #[error("Command names must not be empty.")]
    EmptyName,

    /// A command declares an argument with no matching flag definition.
    #[error("Flag \"--{flag}\" is expected for command \"{command}\" but it's not defined.")]
    UndefinedFlag {
        /// The declared argument name.
        flag: String,
        /// The command declaring it.
        command: String,
    },

    /// Two flags were defined under the same name.
    #[error("Flag \"--{name}\" was already defined.")]
    DuplicateFlag {
        /// The flag name defined twice.
        name: String,
    },

    /// A flag was defined with an empty name.
    #[error("Flag names must not be empty.")]
    EmptyFlagName,
}

/// Trait implemented by every subcommand.
///
/// Help and usage text are produced from the [`CommandEntry`] a command is
/// registered with, so `execute` is the only behavior a command supplies.
pub trait Command: Send + Sync {
    /// Runs the command.
    ///
    /// The context exposes parsed flag values, the positional arguments that
    /// followed the command name, and the output sink.
    ///
    /// # Errors
    ///
    /// Any `CliError`. The dispatcher prints this command's usage block and
    /// then hands the error back to its caller untouched.
    fn execute(&self, ctx: &mut Context<'_>) -> CommandResult;
}

/// A registered command together with its descriptive metadata.
pub struct CommandEntry {
    pub(crate) name: String,
    pub(crate) usage: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) arguments: Vec<String>,
    pub(crate) command: Box<dyn Command>,
}

impl CommandEntry {
    /// Creates an entry with no metadata around `command`.
    pub fn new(command: impl Command + 'static) -> Self {
        Self {
            name: String::new(),
            usage: None,
            description: None,
            arguments: Vec::new(),
            command: Box::new(command),
        }
    }

    /// Sets the invocation string shown after the program name, e.g. `"greet [name]"`.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = non_empty(usage.into());
        self
    }

    /// Sets the one-line summary shown in listings.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = non_empty(description.into());
        self
    }

    /// Declares the flags this command reads.
    ///
    /// Every name must be defined in the dispatcher's
    /// [`FlagSet`](super::FlagSet); rendering usage for a command that
    /// declares an undefined flag panics.
    pub fn arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    /// The registration name. Empty until the entry is registered.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The invocation string, if any.
    pub fn usage_text(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    /// The one-line summary, if any.
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Declared flag names, in declaration order.
    pub fn argument_names(&self) -> &[String] {
        &self.arguments
    }
}

impl fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("description", &self.description)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
