use crate::config::AppConfig;
use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::Level;
use tracing_subscriber::fmt::time::UtcTime;

static TRACE_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();

/// `SCANSPELL_TRACE_LOG`, else `scanspell_trace.jsonl` in the temp dir.
pub fn tracing_log_path() -> PathBuf {
    env::var_os("SCANSPELL_TRACE_LOG")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join("scanspell_trace.jsonl"))
}

/// Install the JSON trace subscriber (scan commits, screen switches, model
/// updates) when `--logs` is on. Returns the trace file in use, if any. Only the
/// first call installs anything.
pub fn init_tracing(config: &AppConfig) -> Option<PathBuf> {
    if !config.logs || config.no_logs {
        return None;
    }
    TRACE_PATH
        .get_or_init(|| {
            let path = tracing_log_path();
            let file = match OpenOptions::new().create(true).append(true).open(&path) {
                Ok(file) => file,
                Err(err) => {
                    crate::log_debug(&format!("trace log unavailable at {}: {err}", path.display()));
                    return None;
                }
            };
            let subscriber = tracing_subscriber::fmt()
                .json()
                .with_max_level(Level::DEBUG)
                .with_timer(UtcTime::rfc_3339())
                .with_writer(file)
                .with_target(true)
                .with_current_span(false)
                .with_span_list(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .ok()
                .map(|()| path)
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn tracing_stays_off_without_logs() {
        let config = AppConfig::parse_from(["test-app"]);
        assert_eq!(init_tracing(&config), None);
        let config = AppConfig::parse_from(["test-app", "--logs", "--no-logs"]);
        assert_eq!(init_tracing(&config), None);
    }
}
