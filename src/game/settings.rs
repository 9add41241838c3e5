use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::ranking::{RankingPolicy, DISPLAY_TOP, LOCAL_LEADERBOARD_CAPACITY};
use crate::model::DifficultyTier;

const APP_DIR: &str = "tileswap";
pub const DATA_DIR_ENV: &str = "TILESWAP_DATA_DIR";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default)]
    pub difficulty: DifficultyTier,

    /// Prefilled into the save form.
    #[serde(default)]
    pub nickname: Option<String>,

    #[serde(default)]
    pub country: Option<String>,

    #[serde(default = "default_scramble_interval_ms")]
    pub scramble_interval_ms: u64,

    #[serde(default = "default_timer_refresh_ms")]
    pub timer_refresh_ms: u64,

    #[serde(default = "default_leaderboard_capacity")]
    pub leaderboard_capacity: usize,

    #[serde(default = "default_display_top")]
    pub display_top: usize,

    #[serde(default)]
    pub ranking_policy: RankingPolicy,
}

// Helper functions for default values
fn default_version() -> u32 {
    1
}
fn default_scramble_interval_ms() -> u64 {
    50
}
fn default_timer_refresh_ms() -> u64 {
    100
}
fn default_leaderboard_capacity() -> usize {
    LOCAL_LEADERBOARD_CAPACITY
}
fn default_display_top() -> usize {
    DISPLAY_TOP
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: default_version(),
            difficulty: DifficultyTier::default(),
            nickname: None,
            country: None,
            scramble_interval_ms: default_scramble_interval_ms(),
            timer_refresh_ms: default_timer_refresh_ms(),
            leaderboard_capacity: default_leaderboard_capacity(),
            display_top: default_display_top(),
            ranking_policy: RankingPolicy::default(),
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        let path = Self::settings_path();
        if let Some(settings) = Self::load_from(&path) {
            return settings;
        }
        let default = Settings::default();
        if let Err(err) = default.save() {
            warn!(target: "settings", "Could not write default settings to {:?}: {}", path, err);
        }
        default
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        let contents = fs::read_to_string(path).ok()?;
        match serde_json::from_str::<Settings>(&contents) {
            Ok(mut settings) => {
                settings.migrate();
                debug!(target: "settings", "Loaded settings from {:?}", path);
                Some(settings)
            }
            Err(err) => {
                warn!(target: "settings", "Ignoring unreadable settings {:?}: {}", path, err);
                None
            }
        }
    }

    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&Self::settings_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        // Ensure the directory exists
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
    }

    /// `$TILESWAP_DATA_DIR`, else the platform data directory, else a temp dir.
    pub fn data_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            return PathBuf::from(dir);
        }
        dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR)
    }

    pub fn settings_path() -> PathBuf {
        Self::data_dir().join("settings.json")
    }

    pub fn leaderboard_path() -> PathBuf {
        Self::data_dir().join("leaderboard.json")
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
    }

    pub fn scramble_interval(&self) -> Duration {
        Duration::from_millis(self.scramble_interval_ms)
    }

    pub fn timer_refresh(&self) -> Duration {
        Duration::from_millis(self.timer_refresh_ms)
    }

    pub fn seed_from_env() -> Option<u64> {
        std::env::var("SEED").ok().and_then(|v| v.parse::<u64>().ok())
    }
}
