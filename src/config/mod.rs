//! Command-line parsing and validation helpers.

mod defaults;
#[cfg(test)]
mod tests;
mod validation;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub use defaults::{
    default_data_dir, DEFAULT_ACTIVATION_KEY, DEFAULT_INTERVAL_MS, MAX_ALPHABET_CHARS,
    MAX_INTERVAL_MS, MIN_INTERVAL_MS,
};

/// CLI options for the scanspell overlay. Scan options left unset here fall back
/// to the saved settings file, then to the built-in defaults.
#[derive(Debug, Parser, Clone)]
#[command(about = "Single-switch scanning keyboard with word prediction", author, version)]
pub struct AppConfig {
    /// Scan speed preset (slow 800 ms, normal 500 ms, fast 250 ms)
    #[arg(long, value_enum, env = "SCANSPELL_SPEED")]
    pub speed: Option<ScanSpeed>,

    /// Explicit highlight interval in milliseconds (overrides --speed)
    #[arg(long = "interval-ms", env = "SCANSPELL_INTERVAL_MS")]
    pub interval_ms: Option<u64>,

    /// Keyboard alphabet
    #[arg(long, value_enum, env = "SCANSPELL_LANGUAGE")]
    pub language: Option<Language>,

    /// Letters for the custom alphabet, in scan order
    #[arg(long = "custom-alphabet", value_name = "CHARS")]
    pub custom_alphabet: Option<String>,

    /// Letters offered first when a new word starts (custom alphabet only)
    #[arg(long = "custom-first-letters", value_name = "CHARS")]
    pub custom_first_letters: Option<String>,

    /// Key that acts as the switch
    #[arg(long = "activation-key", env = "SCANSPELL_ACTIVATION_KEY")]
    pub activation_key: Option<char>,

    /// How the switch is read: activation key, on-screen button only, or a captured key
    #[arg(long = "input-mode", value_enum)]
    pub input_mode: Option<InputMode>,

    /// Learned model file (read at startup, rewritten as you type)
    #[arg(long, env = "SCANSPELL_MODEL")]
    pub model: Option<PathBuf>,

    /// Seed model used when the learned model file does not exist yet
    #[arg(long = "initial-model", env = "SCANSPELL_INITIAL_MODEL")]
    pub initial_model: Option<PathBuf>,

    /// Keep the model read-only for this session
    #[arg(long = "no-learn", default_value_t = false)]
    pub no_learn: bool,

    /// Settings file path
    #[arg(long, env = "SCANSPELL_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Ignore (and overwrite) the saved settings
    #[arg(long = "reset-settings", default_value_t = false)]
    pub reset_settings: bool,

    /// Program that receives typed text and navigation keys on its stdin
    #[arg(long = "target-cmd", env = "SCANSPELL_TARGET_CMD", value_name = "COMMAND")]
    pub target_cmd: Option<String>,

    /// Enable file logging (debug)
    #[arg(long = "logs", env = "SCANSPELL_LOGS", default_value_t = false)]
    pub logs: bool,

    /// Disable all file logging (overrides --logs and log env vars)
    #[arg(long = "no-logs", env = "SCANSPELL_NO_LOGS", default_value_t = false)]
    pub no_logs: bool,

    /// Allow logging typed text and suggestions (debug log only)
    #[arg(
        long = "log-content",
        env = "SCANSPELL_LOG_CONTENT",
        default_value_t = false
    )]
    pub log_content: bool,
}

/// Highlight interval presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl ScanSpeed {
    pub const ALL: [ScanSpeed; 3] = [ScanSpeed::Slow, ScanSpeed::Normal, ScanSpeed::Fast];

    pub fn interval_ms(self) -> u64 {
        match self {
            ScanSpeed::Slow => 800,
            ScanSpeed::Normal => DEFAULT_INTERVAL_MS,
            ScanSpeed::Fast => 250,
        }
    }

    pub fn interval(self) -> Duration {
        Duration::from_millis(self.interval_ms())
    }

    pub fn label(self) -> &'static str {
        match self {
            ScanSpeed::Slow => "Slow",
            ScanSpeed::Normal => "Normal",
            ScanSpeed::Fast => "Fast",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Spanish,
    Custom,
}

impl Language {
    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Español",
            Language::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// The activation key (space unless overridden)
    #[default]
    Keyboard,
    /// Only the on-screen `[ Select ]` button
    Mouse,
    /// A key captured from the Settings screen
    Custom,
}

impl InputMode {
    pub const ALL: [InputMode; 3] = [InputMode::Keyboard, InputMode::Mouse, InputMode::Custom];

    pub fn label(self) -> &'static str {
        match self {
            InputMode::Keyboard => "Keyboard",
            InputMode::Mouse => "Mouse",
            InputMode::Custom => "Custom",
        }
    }
}
