use std::{env, ffi::OsString, io, io::Write, path::Path};

use tracing::{debug, instrument};

use crate::config::ProgramInfo;

use super::{
    CliError, CommandRegistry, CommandResult, Context, FlagSet, context::Invocation, formatting,
};

/// Routes argument vectors to registered commands.
///
/// Owns the command registry, the global flag definitions and the program
/// metadata used by the banner. All rendering goes to the writer passed in,
/// never straight to stdout.
///
/// # Example
///
/// ```
/// use subcmd::cli::{CommandRegistry, Dispatcher, FlagSet};
///
/// let dispatcher = Dispatcher::new(CommandRegistry::new(), FlagSet::new()).with_bin_name("demo");
///
/// let mut out = Vec::new();
/// dispatcher.dispatch(Vec::<String>::new(), &mut out).unwrap();
///
/// let listing = String::from_utf8(out).unwrap();
/// assert!(listing.starts_with("Usage: demo <arguments> <command>"));
/// ```
#[derive(Debug)]
pub struct Dispatcher {
    registry: CommandRegistry,
    flags: FlagSet,
    program: ProgramInfo,
    bin_name: Option<String>,
}

impl Dispatcher {
    /// Creates a dispatcher over a fully populated registry and flag set.
    pub fn new(registry: CommandRegistry, flags: FlagSet) -> Self {
        Self {
            registry,
            flags,
            program: ProgramInfo::default(),
            bin_name: None,
        }
    }

    /// Sets the metadata shown by [`Dispatcher::banner`].
    pub fn with_program(mut self, program: ProgramInfo) -> Self {
        self.program = program;
        self
    }

    /// Overrides the program name used in usage lines.
    pub fn with_bin_name(mut self, bin_name: impl Into<String>) -> Self {
        self.bin_name = Some(bin_name.into());
        self
    }

    /// The registered commands.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// The global flag definitions.
    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    /// The banner metadata.
    pub fn program(&self) -> &ProgramInfo {
        &self.program
    }

    /// Name shown in usage lines.
    ///
    /// The explicit override if set, else the file name of `argv[0]`, else
    /// the program name, else `"app"`.
    pub fn bin_name(&self) -> String {
        if let Some(bin_name) = &self.bin_name {
            return bin_name.clone();
        }

        env::args_os()
            .next()
            .and_then(|argv0| {
                Path::new(&argv0)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .or_else(|| self.program.name.clone().filter(|name| !name.is_empty()))
            .unwrap_or_else(|| "app".to_string())
    }

    /// Writes the name/version, copyright and author lines, if any are set.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn banner(&self, out: &mut dyn Write) -> io::Result<()> {
        self.program.write_banner(out)
    }

    /// Writes the usage block of the command called `name`.
    ///
    /// # Errors
    ///
    /// `CliError::CommandNotFound` if no such command is registered,
    /// `CliError::Io` if writing fails.
    ///
    /// # Panics
    ///
    /// Panics if the command declares an argument the flag set does not define.
    pub fn usage(&self, name: &str, out: &mut dyn Write) -> CommandResult {
        let text = self.render_usage(name)?;
        out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Renders the usage block of `name` into a string.
    ///
    /// # Errors
    ///
    /// `CliError::CommandNotFound` if no such command is registered.
    pub fn render_usage(&self, name: &str) -> Result<String, CliError> {
        let entry = self
            .registry
            .get(name)
            .ok_or_else(|| CliError::CommandNotFound(name.to_string()))?;

        Ok(formatting::usage_block(entry, &self.bin_name(), &self.flags))
    }

    /// Writes the full command listing when `selector` is empty, otherwise
    /// the usage block of `selector`.
    ///
    /// # Errors
    ///
    /// With an empty selector only `CliError::Io`. Otherwise the same as
    /// [`Dispatcher::usage`].
    pub fn help(&self, selector: &str, out: &mut dyn Write) -> CommandResult {
        let text = self.render_help(selector)?;
        out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Renders what [`Dispatcher::help`] writes.
    ///
    /// # Errors
    ///
    /// `CliError::CommandNotFound` for a non-empty unknown selector.
    pub fn render_help(&self, selector: &str) -> Result<String, CliError> {
        if selector.is_empty() {
            Ok(formatting::help_listing(
                self.registry.entries(),
                &self.bin_name(),
            ))
        } else {
            self.render_usage(selector)
        }
    }

    /// Runs the command called `name` with default flag values and no
    /// positional arguments.
    ///
    /// # Errors
    ///
    /// `CliError::CommandNotFound` if no such command is registered.
    /// Otherwise whatever the command returns, unchanged, after its usage
    /// block has been written to `out`. A failure to write the usage block
    /// does not replace the command's error.
    pub fn execute(&self, name: &str, out: &mut dyn Write) -> CommandResult {
        let invocation = self.flags.parse(&self.bin_name(), Vec::<OsString>::new())?;
        self.run(name, &invocation, out)
    }

    /// Parses `args` (program name excluded) and runs the command named by
    /// the first positional token. With no positional token, writes the
    /// full listing.
    ///
    /// # Errors
    ///
    /// `CliError::InvalidArguments` when flag parsing fails, otherwise the
    /// same as [`Dispatcher::execute`].
    #[instrument(skip_all)]
    pub fn dispatch<I, T>(&self, args: I, out: &mut dyn Write) -> CommandResult
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let invocation = self.flags.parse(&self.bin_name(), args)?;

        match invocation.positionals.first() {
            Some(name) => {
                debug!(command = %name, args = ?&invocation.positionals[1..], "dispatching");
                self.run(name, &invocation, out)
            }
            None => {
                debug!("no command given, showing help");
                self.help("", out)
            }
        }
    }

    /// [`Dispatcher::dispatch`] over the process arguments.
    ///
    /// # Errors
    ///
    /// Same as [`Dispatcher::dispatch`].
    pub fn dispatch_env(&self, out: &mut dyn Write) -> CommandResult {
        self.dispatch(env::args_os().skip(1), out)
    }

    fn run(&self, name: &str, invocation: &Invocation, out: &mut dyn Write) -> CommandResult {
        let entry = self
            .registry
            .get(name)
            .ok_or_else(|| CliError::CommandNotFound(name.to_string()))?;

        let result = {
            let mut ctx = Context::new(self, invocation, &mut *out);
            entry.command.execute(&mut ctx)
        };

        if let Err(e) = &result {
            debug!(command = %name, error = %e, "command failed");
            let reminder = self
                .usage(name, out)
                .and_then(|()| Ok(out.write_all(b"\n")?));
            if let Err(io) = reminder {
                debug!(command = %name, error = %io, "could not render usage");
            }
        }

        result
    }
}
