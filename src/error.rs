use std::{
    fmt, io,
    path::{Path, PathBuf},
    result,
};

use thiserror::Error;

/// Errors raised while loading program configuration.
///
/// Command resolution and execution failures use
/// [`CliError`](crate::cli::CliError) instead.
#[derive(Error, Debug)]
pub enum SubcmdError {
    /// I/O failure tied to a specific file.
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where the error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// I/O failure with no path attached.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// File path, or "string" for in-memory input
        location: String,
        /// Parse error details
        details: String,
    },
}

/// A specialized `Result` type for configuration loading.
pub type Result<T> = result::Result<T, SubcmdError>;

impl SubcmdError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        SubcmdError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an I/O error tied to `path`.
    pub fn io_at(error: impl fmt::Display, path: &Path) -> Self {
        SubcmdError::IoError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }
}
