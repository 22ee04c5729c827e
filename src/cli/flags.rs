use std::{collections::BTreeMap, ffi::OsString, iter};

use clap::{Arg, ArgAction};

use super::{CliError, ConfigurationError, context::Invocation};

/// Argument id used for the trailing positional list.
const POSITIONALS: &str = "__positionals";

/// How a flag consumes the argument vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Takes a value: `--city Paris`.
    Value,

    /// Boolean presence flag: `--loud`.
    Switch,
}

/// Definition of a single global flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagInfo {
    /// Flag name without the leading dashes.
    pub name: String,

    /// Default value as shown in usage text. Empty when there is none.
    pub default: String,

    /// Human-readable description.
    pub description: String,

    /// Whether the flag takes a value.
    pub kind: FlagKind,
}

/// The set of global flags a program accepts.
///
/// Commands reference these by name through
/// [`CommandEntry::arguments`](super::CommandEntry::arguments); the usage
/// renderer resolves each declared name here. Parsing is delegated to `clap`.
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    flags: BTreeMap<String, FlagInfo>,
}

impl FlagSet {
    /// Creates an empty flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a flag taking a value.
    ///
    /// An empty `default` means the flag has no value unless given.
    ///
    /// # Panics
    ///
    /// Panics with [`ConfigurationError::DuplicateFlag`] if `name` is already defined,
    /// and with [`ConfigurationError::EmptyFlagName`] if it is empty.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        default: impl Into<String>,
        description: impl Into<String>,
    ) -> &mut Self {
        self.insert(FlagInfo {
            name: name.into(),
            default: default.into(),
            description: description.into(),
            kind: FlagKind::Value,
        })
    }

    /// Defines a boolean switch. Its default renders as `false`.
    ///
    /// # Panics
    ///
    /// Panics with [`ConfigurationError::DuplicateFlag`] if `name` is already defined,
    /// and with [`ConfigurationError::EmptyFlagName`] if it is empty.
    pub fn switch(&mut self, name: impl Into<String>, description: impl Into<String>) -> &mut Self {
        self.insert(FlagInfo {
            name: name.into(),
            default: false.to_string(),
            description: description.into(),
            kind: FlagKind::Switch,
        })
    }

    /// Looks up a flag definition by name.
    pub fn lookup(&self, name: &str) -> Option<&FlagInfo> {
        self.flags.get(name)
    }

    /// Iterates over all definitions, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &FlagInfo> {
        self.flags.values()
    }

    /// Number of defined flags.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether no flags are defined.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    #[allow(clippy::panic)]
    fn insert(&mut self, info: FlagInfo) -> &mut Self {
        if info.name.is_empty() {
            panic!("{}", ConfigurationError::EmptyFlagName);
        }
        if self.flags.contains_key(&info.name) {
            panic!(
                "{}",
                ConfigurationError::DuplicateFlag {
                    name: info.name.clone()
                }
            );
        }
        self.flags.insert(info.name.clone(), info);
        self
    }

    /// Parses `args` (program name excluded).
    ///
    /// Flags are read until the first positional token; that token and
    /// everything after it are kept verbatim as positionals. A flag given
    /// more than once keeps its last value.
    pub(crate) fn parse<I, T>(&self, bin_name: &str, args: I) -> Result<Invocation, CliError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let argv = iter::once(OsString::from(bin_name)).chain(args.into_iter().map(Into::into));

        let matches = self
            .parser(bin_name)
            .try_get_matches_from(argv)
            .map_err(|e| CliError::InvalidArguments(first_line(&e.to_string())))?;

        let values = self
            .flags
            .values()
            .filter_map(|flag| {
                let value = match flag.kind {
                    FlagKind::Switch => Some(matches.get_flag(&flag.name).to_string()),
                    FlagKind::Value => matches.get_one::<String>(&flag.name).cloned(),
                };
                value.map(|value| (flag.name.clone(), value))
            })
            .collect();

        let positionals = matches
            .get_many::<String>(POSITIONALS)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        Ok(Invocation {
            values,
            positionals,
        })
    }

    fn parser(&self, bin_name: &str) -> clap::Command {
        clap::Command::new(bin_name.to_owned())
            .disable_help_flag(true)
            .disable_version_flag(true)
            .args_override_self(true)
            .args(self.flags.values().map(to_arg))
            .arg(
                Arg::new(POSITIONALS)
                    .num_args(1..)
                    .trailing_var_arg(true)
                    .value_parser(clap::value_parser!(String)),
            )
    }
}

fn to_arg(flag: &FlagInfo) -> Arg {
    let arg = Arg::new(flag.name.clone())
        .long(flag.name.clone())
        .help(flag.description.clone());

    match flag.kind {
        FlagKind::Switch => arg.action(ArgAction::SetTrue),
        FlagKind::Value if flag.default.is_empty() => arg.action(ArgAction::Set),
        FlagKind::Value => arg
            .action(ArgAction::Set)
            .default_value(flag.default.clone()),
    }
}

fn first_line(message: &str) -> String {
    let line = message.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_owned()
}
