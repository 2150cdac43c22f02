//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Environment variable naming the log file.
pub const FILE_ENV: &str = "FUGIT_FILE";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the time log.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        Self::figment(config_path).extract()
    }

    fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (FUGIT_*)
        figment.merge(Env::prefixed("FUGIT_"))
    }
}

/// Returns the platform-specific config directory for fugit.
///
/// On Linux: `~/.config/fugit`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("fugit"))
}
