//! Player configuration
//!
//! Loaded from an optional `cadence.toml` and `CADENCE_`-prefixed environment
//! variables (e.g. `CADENCE_PLAYLIST_PATH`, `CADENCE_VOLUME`). Missing keys
//! fall back to defaults.

use cadence_core::{CadenceError, RepeatMode, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "CADENCE";

/// Configuration for the playlist controller and player service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayerConfig {
    /// Where the session playlist is persisted (default: `playlist.json`)
    #[serde(default = "default_playlist_path")]
    pub playlist_path: PathBuf,

    /// Initial volume (0-100, default: 50)
    #[serde(default = "default_volume")]
    pub volume: u8,

    /// Start muted (default: false)
    #[serde(default)]
    pub muted: bool,

    /// Initial repeat mode (default: off)
    #[serde(default)]
    pub repeat: RepeatMode,

    /// Progress polling interval in milliseconds (default: 1000)
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            playlist_path: default_playlist_path(),
            volume: default_volume(),
            muted: false,
            repeat: RepeatMode::Off,
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl PlayerConfig {
    /// Load configuration from `cadence.toml` (if present) and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Load configuration from `path` (if present) and the environment
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::build(
            path,
            config::Environment::with_prefix(ENV_PREFIX).try_parsing(true),
        )
    }

    fn build(path: &Path, environment: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        if path.exists() {
            tracing::debug!(path = %path.display(), "Reading configuration file");
            settings = settings.add_source(config::File::from(path));
        }

        let config = settings
            .add_source(environment)
            .build()
            .map_err(|e| CadenceError::config(e.to_string()))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| CadenceError::config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.volume > 100 {
            return Err(CadenceError::config(format!(
                "volume must be between 0 and 100, got {}",
                self.volume
            )));
        }

        if self.tick_interval_ms == 0 {
            return Err(CadenceError::config("tick_interval_ms must be positive"));
        }

        Ok(())
    }

    /// Progress polling interval
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

// Default values
fn default_playlist_path() -> PathBuf {
    PathBuf::from("playlist.json")
}

fn default_volume() -> u8 {
    50
}

fn default_tick_interval_ms() -> u64 {
    1000
}
