use std::collections::{BTreeMap, btree_map};

use tracing::debug;

use super::{CommandEntry, ConfigurationError, commands};

/// Registry mapping command names to their entries.
///
/// Names are kept in a sorted map, so listings come out in lexicographic
/// order regardless of registration order. The registry is append-only:
/// entries are never replaced or removed once inserted.
///
/// A new registry already contains the built-in `help` command.
///
/// # Example
///
/// ```
/// use subcmd::cli::{CommandRegistry, HelpCommand, CommandEntry};
///
/// let mut registry = CommandRegistry::new();
/// registry.register(
///     "assist",
///     CommandEntry::new(HelpCommand).description("Another way to ask for help"),
/// );
///
/// let names: Vec<&str> = registry.names().collect();
/// assert_eq!(names, ["assist", "help"]);
/// ```
#[derive(Debug)]
pub struct CommandRegistry {
    commands: BTreeMap<String, CommandEntry>,
}

impl CommandRegistry {
    /// Creates a registry holding only the built-in commands.
    pub fn new() -> Self {
        let mut registry = Self {
            commands: BTreeMap::new(),
        };
        commands::register_builtin(&mut registry);

        registry
    }

    /// Registers `entry` under `name`.
    ///
    /// The entry's name is set to `name`, whatever the caller put there.
    /// Registration is start-up wiring, so mistakes here are fatal.
    ///
    /// # Panics
    ///
    /// Panics with [`ConfigurationError::DuplicateCommand`] if `name` is
    /// already registered, and with [`ConfigurationError::EmptyName`] if it
    /// is empty.
    #[allow(clippy::panic)]
    pub fn register(&mut self, name: impl Into<String>, mut entry: CommandEntry) {
        let name = name.into();
        if name.is_empty() {
            panic!("{}", ConfigurationError::EmptyName);
        }

        match self.commands.entry(name) {
            btree_map::Entry::Occupied(occupied) => panic!(
                "{}",
                ConfigurationError::DuplicateCommand {
                    name: occupied.key().clone()
                }
            ),
            btree_map::Entry::Vacant(vacant) => {
                entry.name = vacant.key().clone();
                debug!(command = %entry.name, "registered command");
                vacant.insert(entry);
            }
        }
    }

    /// Looks up a command by name.
    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    /// Whether a command is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Registered entries in lexicographic order of their names.
    pub fn entries(&self) -> impl Iterator<Item = &CommandEntry> {
        self.commands.values()
    }

    /// Number of registered commands, built-ins included.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Always `false` for a registry built with [`CommandRegistry::new`].
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
