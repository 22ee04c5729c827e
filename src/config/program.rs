use std::io::{self, Write};

use serde::{Deserialize, Serialize};

/// Descriptive metadata about the embedding program.
///
/// Every field is optional; empty strings count as unset. Only the banner
/// reads these.
///
/// ```toml
/// [program]
/// name = "subcmd"
/// version = "0.1.0"
/// homepage = "https://example.org"
/// copyright = "Copyright (c) 2024 Jane Doe"
/// license = "MIT License"
/// author = "Jane Doe"
/// author_email = "jane@example.org"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProgramInfo {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Version string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Project URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    /// Copyright statement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,

    /// License name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// Author's name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Author's e-mail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
}

impl ProgramInfo {
    /// Metadata with only a display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Banner lines, in order: name/version/homepage, copyright/license,
    /// author/e-mail. A line is only produced when its leading field is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use subcmd::config::ProgramInfo;
    ///
    /// let info = ProgramInfo {
    ///     version: Some("1.2.0".to_string()),
    ///     author: Some("Jane Doe".to_string()),
    ///     ..ProgramInfo::new("tool")
    /// };
    /// assert_eq!(info.banner_lines(), ["tool (1.2.0)", "by Jane Doe"]);
    /// ```
    pub fn banner_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(name) = field(&self.name) {
            let mut line = match field(&self.version) {
                Some(version) => format!("{name} ({version})"),
                None => name.to_string(),
            };
            if let Some(homepage) = field(&self.homepage) {
                line.push_str(" - ");
                line.push_str(homepage);
            }
            lines.push(line);
        }

        if let Some(copyright) = field(&self.copyright) {
            lines.push(match field(&self.license) {
                Some(license) => format!("{copyright}. {license}."),
                None => copyright.to_string(),
            });
        }

        if let Some(author) = field(&self.author) {
            lines.push(match field(&self.author_email) {
                Some(email) => format!("by {author} <{email}>"),
                None => format!("by {author}"),
            });
        }

        lines
    }

    /// Writes the banner lines followed by a blank line. Writes nothing when
    /// there are no lines.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_banner(&self, out: &mut dyn Write) -> io::Result<()> {
        let lines = self.banner_lines();
        if lines.is_empty() {
            return Ok(());
        }

        write!(out, "{}\n\n", lines.join("\n"))
    }
}

fn field(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
