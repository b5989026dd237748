//! File logs for the overlay. The terminal belongs to the scan UI, so nothing
//! here ever prints.

use crate::config::AppConfig;
use std::{
    env, fs,
    io::Write,
    panic,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, MutexGuard, OnceLock,
    },
    time::{SystemTime, UNIX_EPOCH},
};

const DEBUG_LOG_CAP: u64 = 4 * 1024 * 1024;
const CRASH_LOG_CAP: u64 = 128 * 1024;

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);
/// Typed text and suggestions; off unless `--log-content` is given.
static CONTENT_ENABLED: AtomicBool = AtomicBool::new(false);
static DEBUG_LOG: OnceLock<Mutex<Option<CappedFile>>> = OnceLock::new();

pub fn log_file_path() -> PathBuf {
    env::temp_dir().join("scanspell_tui.log")
}

/// Crash entries carry the location and version, never typed text unless
/// content logging is on.
pub fn crash_log_path() -> PathBuf {
    env::temp_dir().join("scanspell_crash.log")
}

/// Append-only file that starts over once it would pass `cap` bytes.
struct CappedFile {
    path: PathBuf,
    file: fs::File,
    cap: u64,
    len: u64,
}

impl CappedFile {
    fn open(path: PathBuf, cap: u64) -> Option<Self> {
        let existing = fs::metadata(&path).map(|meta| meta.len()).unwrap_or(0);
        let start_over = existing > cap;
        let file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .append(!start_over)
            .truncate(start_over)
            .open(&path)
            .ok()?;
        Some(Self {
            path,
            file,
            cap,
            len: if start_over { 0 } else { existing },
        })
    }

    fn append(&mut self, line: &str) {
        let incoming = line.len() as u64;
        if self.len.saturating_add(incoming) > self.cap {
            match CappedFile::open_truncated(&self.path) {
                Some(file) => {
                    self.file = file;
                    self.len = 0;
                }
                None => return,
            }
        }
        if self.file.write_all(line.as_bytes()).is_ok() {
            self.len = self.len.saturating_add(incoming);
        }
    }

    fn open_truncated(path: &Path) -> Option<fs::File> {
        fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .ok()
    }
}

fn debug_log() -> MutexGuard<'static, Option<CappedFile>> {
    DEBUG_LOG
        .get_or_init(|| Mutex::new(None))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn stamp(msg: &str) -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);
    format!("[{secs}] {msg}\n")
}

/// Apply `--logs`, `--no-logs` and `--log-content`. `--no-logs` wins.
pub fn init_logging(config: &AppConfig) {
    let enabled = config.logs && !config.no_logs;
    DEBUG_ENABLED.store(enabled, Ordering::Relaxed);
    CONTENT_ENABLED.store(enabled && config.log_content, Ordering::Relaxed);
    *debug_log() = if enabled {
        CappedFile::open(log_file_path(), DEBUG_LOG_CAP)
    } else {
        None
    };
}

pub fn log_debug(msg: &str) {
    if !DEBUG_ENABLED.load(Ordering::Relaxed) {
        return;
    }
    if let Some(file) = debug_log().as_mut() {
        file.append(&stamp(msg));
    }
}

/// Like [`log_debug`], for lines that may quote what the user typed.
pub fn log_debug_content(msg: &str) {
    if CONTENT_ENABLED.load(Ordering::Relaxed) {
        log_debug(msg);
    }
}

fn panic_payload(info: &panic::PanicHookInfo<'_>) -> String {
    if !CONTENT_ENABLED.load(Ordering::Relaxed) {
        return "payload hidden (--log-content is off)".to_string();
    }
    let payload = info.payload();
    payload
        .downcast_ref::<&str>()
        .map(|text| (*text).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string payload".to_string())
}

pub fn log_panic(info: &panic::PanicHookInfo<'_>) {
    if !DEBUG_ENABLED.load(Ordering::Relaxed) {
        return;
    }
    let location = info
        .location()
        .map(|loc| format!("{}:{}", loc.file(), loc.line()))
        .unwrap_or_else(|| "unknown location".to_string());
    let entry = stamp(&format!(
        "scanspell v{} panicked at {location}: {}",
        env!("CARGO_PKG_VERSION"),
        panic_payload(info)
    ));
    if let Some(mut crash_log) = CappedFile::open(crash_log_path(), CRASH_LOG_CAP) {
        crash_log.append(&entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or(0);
        env::temp_dir().join(format!("scanspell-{name}-{}-{nanos}.log", std::process::id()))
    }

    #[test]
    fn capped_file_starts_over_past_the_cap() {
        let path = temp_log("capped");
        let mut log = CappedFile::open(path.clone(), 32).unwrap();
        log.append("0123456789abcdef0123\n");
        log.append("second line that overflows\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), "second line that overflows\n");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn oversized_file_is_truncated_on_open() {
        let path = temp_log("oversized");
        fs::write(&path, "x".repeat(64)).unwrap();
        let mut log = CappedFile::open(path.clone(), 16).unwrap();
        log.append("fresh\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn stamp_prefixes_seconds() {
        let line = stamp("hello");
        assert!(line.starts_with('['));
        assert!(line.ends_with("] hello\n"));
    }
}
