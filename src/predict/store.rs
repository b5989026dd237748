//! Model file loading and background persistence.

use anyhow::{Context, Result};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use super::table::BigramTable;
use crate::log_debug;

/// Pending snapshots before new requests are dropped; the next observe re-sends
/// the full table anyway.
const STORE_QUEUE_CAPACITY: usize = 4;

/// Receives the full table after each successful mutation. Must not block; the
/// predictor never waits on or retries persistence.
pub trait PersistRequest: Send + Sync {
    fn request_persist(&self, table: &BigramTable);
}

/// How the predictor was seeded at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelLoadStatus {
    Loaded { path: PathBuf, words: usize },
    Missing,
    Failed { path: PathBuf, reason: String },
}

impl ModelLoadStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelLoadStatus::Loaded { .. })
    }

    pub fn summary(&self) -> String {
        match self {
            ModelLoadStatus::Loaded { words, .. } => format!("Model loaded ({words} words)"),
            ModelLoadStatus::Missing => "Model file not found; learning from scratch".to_string(),
            ModelLoadStatus::Failed { reason, .. } => format!("Model load failed: {reason}"),
        }
    }
}

pub fn read_model(path: &Path) -> Result<BigramTable> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read model {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("invalid model {}", path.display()))
}

/// Seed from the user model, then the bundled initial model, then nothing.
/// A source that exists but fails to parse is reported and skipped.
pub fn load_model(user_path: &Path, initial_path: Option<&Path>) -> (BigramTable, ModelLoadStatus) {
    let mut failure = None;
    for path in std::iter::once(user_path).chain(initial_path) {
        if !path.exists() {
            continue;
        }
        match read_model(path) {
            Ok(table) => {
                let words = table.len();
                log_debug(&format!("model loaded from {} ({words} words)", path.display()));
                return (
                    table,
                    ModelLoadStatus::Loaded {
                        path: path.to_path_buf(),
                        words,
                    },
                );
            }
            Err(err) => {
                log_debug(&format!("model load failed: {err:#}"));
                failure.get_or_insert(ModelLoadStatus::Failed {
                    path: path.to_path_buf(),
                    reason: format!("{err:#}"),
                });
            }
        }
    }
    (
        BigramTable::new(),
        failure.unwrap_or(ModelLoadStatus::Missing),
    )
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents).with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}

/// Writes model snapshots to a JSON file on a background thread.
pub struct JsonModelStore {
    tx: Option<Sender<String>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl JsonModelStore {
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, rx) = bounded(STORE_QUEUE_CAPACITY);
        let handle = thread::spawn(move || run_store_writer(&path, rx));
        Self {
            tx: Some(tx),
            handle: Some(handle),
        }
    }
}

fn run_store_writer(path: &Path, rx: Receiver<String>) {
    while let Ok(mut snapshot) = rx.recv() {
        // Only the newest snapshot matters.
        while let Ok(newer) = rx.try_recv() {
            snapshot = newer;
        }
        if let Err(err) = write_atomic(path, &snapshot) {
            log_debug(&format!("model save failed: {err:#}"));
            tracing::warn!(path = %path.display(), "model save failed");
        }
    }
}

impl PersistRequest for JsonModelStore {
    fn request_persist(&self, table: &BigramTable) {
        let Some(tx) = self.tx.as_ref() else {
            return;
        };
        let snapshot = match serde_json::to_string(table) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log_debug(&format!("model serialize failed: {err}"));
                return;
            }
        };
        match tx.try_send(snapshot) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => log_debug("model save queue full; snapshot dropped"),
            Err(TrySendError::Disconnected(_)) => log_debug("model writer stopped"),
        }
    }
}

impl Drop for JsonModelStore {
    fn drop(&mut self) {
        // Closing the channel lets the writer flush what is queued and exit.
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
