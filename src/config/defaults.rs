use std::env;
use std::path::PathBuf;

pub const DEFAULT_INTERVAL_MS: u64 = 500;
pub const MIN_INTERVAL_MS: u64 = 100;
pub const MAX_INTERVAL_MS: u64 = 5_000;
pub const DEFAULT_ACTIVATION_KEY: char = ' ';
pub const MAX_ALPHABET_CHARS: usize = 64;

pub(super) const MODEL_FILE_NAME: &str = "ngram-model.json";
pub(super) const SETTINGS_FILE_NAME: &str = "settings.json";
const APP_DIR: &str = "scanspell";

/// `$XDG_DATA_HOME/scanspell`, else `~/.local/share/scanspell`, else the temp dir.
pub fn default_data_dir() -> PathBuf {
    if let Some(dir) = env::var_os("XDG_DATA_HOME").filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir).join(APP_DIR);
    }
    if let Some(home) = env::var_os("HOME").filter(|home| !home.is_empty()) {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR);
    }
    env::temp_dir().join(APP_DIR)
}

/// `$XDG_CONFIG_HOME/scanspell`, else `~/.config/scanspell`, else the data dir.
pub(super) fn default_config_dir() -> PathBuf {
    if let Some(dir) = env::var_os("XDG_CONFIG_HOME").filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir).join(APP_DIR);
    }
    if let Some(home) = env::var_os("HOME").filter(|home| !home.is_empty()) {
        return PathBuf::from(home).join(".config").join(APP_DIR);
    }
    default_data_dir()
}
