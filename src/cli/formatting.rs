//! Plain-text rendering for usage blocks, help listings and error lines.
//!
//! Everything here returns owned strings; the dispatcher decides where they
//! are written.

use super::{CommandEntry, ConfigurationError, FlagInfo, FlagSet};

/// Renders the usage block for one command.
///
/// In order: the description line, the usage line, and the declared
/// arguments resolved against `flags`. Each part is left out when the entry
/// has nothing for it.
///
/// # Panics
///
/// Panics with [`ConfigurationError::UndefinedFlag`] when the entry declares
/// an argument that `flags` does not define.
#[allow(clippy::panic)]
pub fn usage_block(entry: &CommandEntry, bin_name: &str, flags: &FlagSet) -> String {
    let mut text = String::new();

    if let Some(description) = entry.description_text() {
        text.push_str(&format!("Command \"{}\": {description}\n", entry.name()));
    }

    if let Some(usage) = entry.usage_text() {
        text.push_str(&format!("\nUsage: {bin_name} {usage}\n"));
    }

    if !entry.argument_names().is_empty() {
        text.push_str(&format!(
            "\nArguments for command \"{}\":\n\n",
            entry.name()
        ));
        for argument in entry.argument_names() {
            let Some(flag) = flags.lookup(argument) else {
                panic!(
                    "{}",
                    ConfigurationError::UndefinedFlag {
                        flag: argument.clone(),
                        command: entry.name().to_owned(),
                    }
                );
            };
            text.push_str(&flag_line(flag));
            text.push('\n');
        }
        text.push('\n');
    }

    text
}

/// Renders the top-level listing: a usage banner, one line per command and
/// a closing hint. `entries` are listed in the order given.
pub fn help_listing<'a, I>(entries: I, bin_name: &str) -> String
where
    I: IntoIterator<Item = &'a CommandEntry>,
{
    let rows: Vec<(&str, &str)> = entries
        .into_iter()
        .map(|entry| (entry.name(), entry.description_text().unwrap_or_default()))
        .collect();

    let mut text = format!(
        "Usage: {bin_name} <arguments> <command>\n\nAvailable commands for {bin_name}:\n\n"
    );
    for line in command_lines(&rows) {
        text.push_str(&line);
        text.push('\n');
    }
    text.push_str(&format!(
        "\nUse \"{bin_name} help <command>\" to view more information about a command.\n"
    ));

    text
}

/// Formats `(name, description)` rows with the names padded to a common width.
///
/// # Examples
///
/// ```
/// use subcmd::cli::formatting::command_lines;
///
/// let lines = command_lines(&[("greet", "says hello"), ("help", "shows help")]);
/// assert_eq!(lines, ["\tgreet  says hello", "\thelp   shows help"]);
/// ```
pub fn command_lines(rows: &[(&str, &str)]) -> Vec<String> {
    let width = rows
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);

    rows.iter()
        .map(|(name, description)| {
            format!("\t{name:<width$}  {description}")
                .trim_end()
                .to_owned()
        })
        .collect()
}

/// Formats one declared argument: `--name [default]: description`.
pub fn flag_line(flag: &FlagInfo) -> String {
    format!("\t--{} [{}]: {}", flag.name, flag.default, flag.description)
}

/// Formats an error for the terminal.
pub fn format_error(text: &str) -> String {
    format!("Error: {text}")
}
