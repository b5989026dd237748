//! Saved user preferences (speed, language, switch input) in a small JSON file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{
    AppConfig, InputMode, Language, ScanSpeed, DEFAULT_ACTIVATION_KEY, DEFAULT_INTERVAL_MS,
    MAX_INTERVAL_MS, MIN_INTERVAL_MS,
};
use crate::log_debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub speed: ScanSpeed,
    /// Highlight interval; out-of-range or missing values fall back to 500 ms.
    pub interval_ms: u64,
    pub language: Language,
    pub input_mode: InputMode,
    /// Switch key for `InputMode::Custom`.
    pub custom_key: Option<char>,
    pub custom_alphabet: Option<String>,
    pub custom_first_letters: Option<String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            speed: ScanSpeed::Normal,
            interval_ms: DEFAULT_INTERVAL_MS,
            language: Language::English,
            input_mode: InputMode::Keyboard,
            custom_key: None,
            custom_alphabet: None,
            custom_first_letters: None,
        }
    }
}

impl UserSettings {
    /// Interval for the next scanning session.
    pub fn cycle_interval(&self) -> Duration {
        if (MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&self.interval_ms) {
            Duration::from_millis(self.interval_ms)
        } else {
            Duration::from_millis(DEFAULT_INTERVAL_MS)
        }
    }

    pub fn set_speed(&mut self, speed: ScanSpeed) {
        self.speed = speed;
        self.interval_ms = speed.interval_ms();
    }

    /// Key that fires the switch, `None` in mouse mode.
    pub fn activation_key(&self) -> Option<char> {
        match self.input_mode {
            InputMode::Keyboard => Some(DEFAULT_ACTIVATION_KEY),
            InputMode::Mouse => None,
            InputMode::Custom => Some(self.custom_key.unwrap_or(DEFAULT_ACTIVATION_KEY)),
        }
    }

    /// Options given on the command line win over saved values.
    pub fn apply_cli(&mut self, config: &AppConfig) {
        if let Some(speed) = config.speed {
            self.speed = speed;
        }
        if config.has_interval_override() {
            self.interval_ms = config.cycle_interval().as_millis() as u64;
        }
        if let Some(language) = config.language {
            self.language = language;
        }
        if config.custom_alphabet.is_some() {
            self.custom_alphabet = config.custom_alphabet.clone();
        }
        if config.custom_first_letters.is_some() {
            self.custom_first_letters = config.custom_first_letters.clone();
        }
        if let Some(mode) = config.input_mode {
            self.input_mode = mode;
        }
        if let Some(key) = config.activation_key {
            // An explicit key only makes sense as a custom switch.
            if key != DEFAULT_ACTIVATION_KEY {
                self.input_mode = InputMode::Custom;
            }
            self.custom_key = Some(key);
        }
    }
}

/// Reads and writes [`UserSettings`]. Without a path it keeps settings in memory only.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    path: Option<PathBuf>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    pub fn in_memory() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Saved settings, or defaults when the file is missing or unreadable.
    pub fn load(&self) -> UserSettings {
        let Some(path) = self.path.as_deref() else {
            return UserSettings::default();
        };
        if !path.exists() {
            return UserSettings::default();
        }
        match read_settings(path) {
            Ok(settings) => settings,
            Err(err) => {
                log_debug(&format!("settings load failed, using defaults: {err:#}"));
                UserSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &UserSettings) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(settings)?;
        fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

fn read_settings(path: &Path) -> Result<UserSettings> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("invalid settings {}", path.display()))
}
