use std::{collections::BTreeMap, fmt, io::Write, str::FromStr};

use super::{CliError, Dispatcher};

/// Flag values and positional arguments resolved from one argument vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Invocation {
    /// Flag name -> value. Switches hold `"true"` or `"false"`; value flags
    /// without a default are absent unless given.
    pub(crate) values: BTreeMap<String, String>,

    /// Every positional token, starting with the command name.
    pub(crate) positionals: Vec<String>,
}

/// What a running command can see: parsed flags, its own positional
/// arguments, the dispatcher that invoked it, and the output sink.
pub struct Context<'a> {
    dispatcher: &'a Dispatcher,
    invocation: &'a Invocation,
    out: &'a mut dyn Write,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        dispatcher: &'a Dispatcher,
        invocation: &'a Invocation,
        out: &'a mut dyn Write,
    ) -> Self {
        Self {
            dispatcher,
            invocation,
            out,
        }
    }

    /// Positional arguments after the command name.
    pub fn args(&self) -> &[String] {
        self.invocation.positionals.get(1..).unwrap_or(&[])
    }

    /// Raw value of a flag, or its default.
    ///
    /// `None` for undefined flags and for value flags with no default that
    /// were not given.
    pub fn flag(&self, name: &str) -> Option<&str> {
        self.invocation.values.get(name).map(String::as_str)
    }

    /// Parses a flag value into `T`.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidArguments` when the value does not parse.
    pub fn parse_flag<T>(&self, name: &str) -> Result<Option<T>, CliError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.flag(name)
            .map(|raw| {
                raw.parse::<T>().map_err(|e| {
                    CliError::InvalidArguments(format!("invalid value '{raw}' for --{name}: {e}"))
                })
            })
            .transpose()
    }

    /// Whether a switch was given.
    pub fn is_set(&self, name: &str) -> bool {
        self.flag(name) == Some("true")
    }

    /// The dispatcher running this command.
    pub fn dispatcher(&self) -> &'a Dispatcher {
        self.dispatcher
    }

    /// The output sink.
    pub fn out(&mut self) -> &mut dyn Write {
        &mut *self.out
    }
}
