use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delay between the last slider movement and the command that applies it.
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;

/// Slider percent to overlay alpha multiplier. 100% maps to just under fully
/// opaque so the screen content stays faintly visible.
pub const DEFAULT_DIM_ALPHA_SCALE: f32 = 2.3;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Config {
    /// Path of the ddcutil executable.
    pub ddcutil_path: PathBuf,
    /// Trailing-edge debounce window for slider changes, in milliseconds.
    pub debounce_ms: u64,
    /// Multiplier from dim-slider percent to overlay alpha (0..=255).
    pub dim_alpha_scale: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ddcutil_path: PathBuf::from("ddcutil"),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            dim_alpha_scale: DEFAULT_DIM_ALPHA_SCALE,
        }
    }
}

impl Config {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ddcdim").join("config.json"))
    }

    /// Load the config file, falling back to defaults when it is missing or
    /// unreadable. A malformed file is reported but never fatal.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            warn!("no config directory available, using default config");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(err) => {
                    error!("can't parse {}: {err}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                warn!("can't read {}: {err}, using defaults", path.display());
                Self::default()
            }
        }
    }
}
