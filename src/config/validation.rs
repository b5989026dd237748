use super::defaults::{default_config_dir, MODEL_FILE_NAME, SETTINGS_FILE_NAME};
use super::{
    default_data_dir, AppConfig, Language, MAX_ALPHABET_CHARS, MAX_INTERVAL_MS, MIN_INTERVAL_MS,
};
use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

impl AppConfig {
    /// Parse CLI arguments and validate them right away.
    pub fn parse_args() -> Result<Self> {
        let mut config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    /// Check CLI values and normalize the custom alphabet.
    pub fn validate(&mut self) -> Result<()> {
        if let Some(interval_ms) = self.interval_ms {
            if !(MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&interval_ms) {
                bail!(
                    "--interval-ms must be between {MIN_INTERVAL_MS} and {MAX_INTERVAL_MS}, got {interval_ms}"
                );
            }
        }

        if let Some(key) = self.activation_key {
            if key != ' ' && (key.is_control() || key.is_whitespace()) {
                bail!("--activation-key must be a printable character or space");
            }
        }

        if let Some(alphabet) = self.custom_alphabet.as_deref() {
            self.custom_alphabet = Some(normalize_alphabet(alphabet, "--custom-alphabet")?);
        }
        if let Some(first) = self.custom_first_letters.as_deref() {
            self.custom_first_letters = Some(normalize_alphabet(first, "--custom-first-letters")?);
        }
        if self.language == Some(Language::Custom) && self.custom_alphabet.is_none() {
            bail!("--language custom requires --custom-alphabet");
        }

        // Fail at startup rather than on the first injected key.
        self.target_command()?;

        Ok(())
    }

    /// Highlight interval chosen on the command line: `--interval-ms`, else the
    /// `--speed` preset, else the default preset.
    pub fn cycle_interval(&self) -> Duration {
        match self.interval_ms {
            Some(ms) => Duration::from_millis(ms),
            None => self.speed.unwrap_or_default().interval(),
        }
    }

    /// Whether the command line pins the interval, overriding saved settings.
    pub fn has_interval_override(&self) -> bool {
        self.interval_ms.is_some() || self.speed.is_some()
    }

    pub fn model_path(&self) -> PathBuf {
        self.model
            .clone()
            .unwrap_or_else(|| default_data_dir().join(MODEL_FILE_NAME))
    }

    pub fn settings_path(&self) -> PathBuf {
        self.settings
            .clone()
            .unwrap_or_else(|| default_config_dir().join(SETTINGS_FILE_NAME))
    }

    /// `--target-cmd` split into program and arguments, `None` when unset.
    pub fn target_command(&self) -> Result<Option<Vec<String>>> {
        let Some(raw) = self.target_cmd.as_deref() else {
            return Ok(None);
        };
        let argv = shell_words::split(raw)
            .with_context(|| format!("--target-cmd could not be parsed: '{raw}'"))?;
        if argv.is_empty() {
            return Err(anyhow!("--target-cmd cannot be empty"));
        }
        Ok(Some(argv))
    }
}

/// Lowercase, strip whitespace, reject duplicates and oversize sets.
pub(super) fn normalize_alphabet(raw: &str, flag: &str) -> Result<String> {
    let mut seen = HashSet::new();
    let mut normalized = String::new();
    for ch in raw.chars().filter(|ch| !ch.is_whitespace()) {
        if ch.is_control() {
            bail!("{flag} must not contain control characters");
        }
        for lower in ch.to_lowercase() {
            if !seen.insert(lower) {
                bail!("{flag} lists '{lower}' more than once");
            }
            normalized.push(lower);
        }
    }
    if normalized.is_empty() {
        bail!("{flag} cannot be empty");
    }
    if seen.len() > MAX_ALPHABET_CHARS {
        bail!(
            "{flag} may list at most {MAX_ALPHABET_CHARS} characters, got {}",
            seen.len()
        );
    }
    Ok(normalized)
}
