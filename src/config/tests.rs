use super::validation::normalize_alphabet;
use super::{AppConfig, InputMode, Language, ScanSpeed, DEFAULT_INTERVAL_MS};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn defaults_leave_scan_options_unset() {
    let mut cfg = AppConfig::parse_from(["test-app"]);
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.speed, None);
    assert_eq!(cfg.language, None);
    assert!(!cfg.has_interval_override());
    assert_eq!(
        cfg.cycle_interval(),
        Duration::from_millis(DEFAULT_INTERVAL_MS)
    );
}

#[test]
fn speed_presets_map_to_intervals() {
    assert_eq!(ScanSpeed::Slow.interval_ms(), 800);
    assert_eq!(ScanSpeed::Normal.interval_ms(), 500);
    assert_eq!(ScanSpeed::Fast.interval_ms(), 250);

    let cfg = AppConfig::parse_from(["test-app", "--speed", "fast"]);
    assert_eq!(cfg.cycle_interval(), Duration::from_millis(250));
    assert!(cfg.has_interval_override());
}

#[test]
fn explicit_interval_beats_speed() {
    let mut cfg = AppConfig::parse_from(["test-app", "--speed", "slow", "--interval-ms", "1200"]);
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.cycle_interval(), Duration::from_millis(1200));
}

#[test]
fn rejects_interval_out_of_bounds() {
    let mut cfg = AppConfig::parse_from(["test-app", "--interval-ms", "99"]);
    assert!(cfg.validate().is_err());

    let mut cfg = AppConfig::parse_from(["test-app", "--interval-ms", "5001"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn accepts_interval_bounds() {
    let mut cfg = AppConfig::parse_from(["test-app", "--interval-ms", "100"]);
    assert!(cfg.validate().is_ok());

    let mut cfg = AppConfig::parse_from(["test-app", "--interval-ms", "5000"]);
    assert!(cfg.validate().is_ok());
}

#[test]
fn custom_language_requires_alphabet() {
    let mut cfg = AppConfig::parse_from(["test-app", "--language", "custom"]);
    assert!(cfg.validate().is_err());

    let mut cfg = AppConfig::parse_from([
        "test-app",
        "--language",
        "custom",
        "--custom-alphabet",
        "A B c",
    ]);
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.language, Some(Language::Custom));
    assert_eq!(cfg.custom_alphabet.as_deref(), Some("abc"));
}

#[test]
fn alphabet_rejects_duplicates_and_empty() {
    assert!(normalize_alphabet("abca", "--custom-alphabet").is_err());
    assert!(normalize_alphabet("aA", "--custom-alphabet").is_err());
    assert!(normalize_alphabet("   ", "--custom-alphabet").is_err());
    assert_eq!(
        normalize_alphabet("ÑoÁ", "--custom-alphabet").unwrap(),
        "ñoá"
    );
}

#[test]
fn rejects_control_activation_key() {
    let mut cfg = AppConfig::parse_from(["test-app", "--activation-key", "\t"]);
    assert!(cfg.validate().is_err());

    let mut cfg = AppConfig::parse_from(["test-app", "--activation-key", "x"]);
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.activation_key, Some('x'));
}

#[test]
fn parses_input_mode() {
    let cfg = AppConfig::parse_from(["test-app", "--input-mode", "mouse"]);
    assert_eq!(cfg.input_mode, Some(InputMode::Mouse));
}

#[test]
fn target_command_splits_like_a_shell() {
    let cfg = AppConfig::parse_from(["test-app", "--target-cmd", "tee -a 'my notes.txt'"]);
    assert_eq!(
        cfg.target_command().unwrap(),
        Some(vec![
            "tee".to_string(),
            "-a".to_string(),
            "my notes.txt".to_string()
        ])
    );

    let cfg = AppConfig::parse_from(["test-app"]);
    assert_eq!(cfg.target_command().unwrap(), None);
}

#[test]
fn rejects_unbalanced_or_empty_target_command() {
    let mut cfg = AppConfig::parse_from(["test-app", "--target-cmd", "cat 'oops"]);
    assert!(cfg.validate().is_err());

    let mut cfg = AppConfig::parse_from(["test-app", "--target-cmd", "   "]);
    assert!(cfg.validate().is_err());
}

#[test]
fn explicit_paths_win_over_defaults() {
    let cfg = AppConfig::parse_from([
        "test-app",
        "--model",
        "/tmp/model.json",
        "--settings",
        "/tmp/settings.json",
    ]);
    assert_eq!(cfg.model_path(), PathBuf::from("/tmp/model.json"));
    assert_eq!(cfg.settings_path(), PathBuf::from("/tmp/settings.json"));
}

#[test]
fn default_paths_use_app_dir() {
    let cfg = AppConfig::parse_from(["test-app"]);
    assert!(cfg.model_path().ends_with("scanspell/ngram-model.json"));
    assert!(cfg.settings_path().ends_with("scanspell/settings.json"));
}
