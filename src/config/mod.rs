//! Program configuration.
//!
//! Holds the metadata shown in the banner and the general settings of an
//! embedding program. Everything is serializable to/from TOML and every
//! field has a default, so an empty file is a valid configuration.

mod general;
mod loading;
mod paths;
mod program;


pub use general::{GeneralConfig, LogLevel};
pub use paths::ConfigPaths;
pub use program::ProgramInfo;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Banner metadata.
    #[serde(default)]
    pub program: ProgramInfo,
}
