use std::{fs, io::ErrorKind, path::Path};

use tracing::debug;

use super::Config;
use crate::{Result, SubcmdError};

impl Config {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `SubcmdError::TomlParseError` if the text is not valid TOML
    /// or does not match the configuration schema.
    pub fn from_toml_str(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| SubcmdError::toml_parse(e, None))
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is invalid
    pub fn load(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| SubcmdError::io_at(e, path))?;
        toml::from_str(&content).map_err(|e| SubcmdError::toml_parse(e, Some(path)))
    }

    /// Loads a configuration file, falling back to defaults when it does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`], except that a missing file is not an error.
    pub fn load_or_default(path: &Path) -> Result<Config> {
        match fs::metadata(path) {
            Ok(_) => Self::load(path),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Config::default())
            }
            Err(e) => Err(SubcmdError::io_at(e, path)),
        }
    }
}
