mod log_level;

pub use log_level::LogLevel;

use serde::{Deserialize, Serialize};

/// General settings of the embedding program.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GeneralConfig {
    /// Logging level used when `RUST_LOG` is not set.
    #[serde(default)]
    pub log_level: LogLevel,
}
