//! Next-word and completion queries over a [`BigramTable`].

use serde::Serialize;
use std::cmp::Reverse;
use std::sync::{Arc, Mutex};

use super::store::PersistRequest;
use super::table::BigramTable;
use crate::lock_or_recover;

/// Upper bound on suggestions returned by either query.
pub const MAX_SUGGESTIONS: usize = 10;

/// Ranked candidate word. `percentage` is its share of the candidate pool,
/// rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub word: String,
    pub percentage: f64,
}

impl Suggestion {
    fn new(word: &str, weight: u64, total: u64) -> Self {
        let share = weight as f64 * 100.0 / total as f64;
        Self {
            word: word.to_string(),
            percentage: (share * 100.0).round() / 100.0,
        }
    }

    /// Two-decimal label, e.g. `66.67`.
    pub fn percentage_label(&self) -> String {
        format!("{:.2}", self.percentage)
    }
}

/// Outcome of one [`Predictor::observe`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObserveReport {
    pub recorded: usize,
    pub rejected: usize,
}

pub struct Predictor {
    table: BigramTable,
    persist: Option<Box<dyn PersistRequest>>,
    learning: bool,
}

impl Predictor {
    pub fn new(table: BigramTable) -> Self {
        Self {
            table,
            persist: None,
            learning: true,
        }
    }

    /// Hand every successful mutation's full table to `persist`.
    pub fn with_persistence(mut self, persist: Box<dyn PersistRequest>) -> Self {
        self.persist = Some(persist);
        self
    }

    /// With learning off, `observe` is a no-op.
    pub fn with_learning(mut self, learning: bool) -> Self {
        self.learning = learning;
        self
    }

    pub fn table(&self) -> &BigramTable {
        &self.table
    }

    /// Most frequent followers of the last word in `context`.
    pub fn predict_next(&self, context: &str) -> Vec<Suggestion> {
        let Some(last) = context.split_whitespace().last() else {
            return Vec::new();
        };
        let last = last.to_lowercase();
        let Some(successors) = self.table.successors(&last) else {
            return Vec::new();
        };
        let mut ranked: Vec<(&str, u64)> = successors
            .map(|(word, count)| (word, u64::from(count)))
            .collect();
        rank(&mut ranked)
    }

    /// Known words extending `prefix`, weighted by their total outgoing count.
    pub fn complete_word(&self, prefix: &str) -> Vec<Suggestion> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Vec::new();
        }
        let mut ranked: Vec<(&str, u64)> = self
            .table
            .words_with_totals()
            .filter(|(word, _)| word.starts_with(&prefix) && *word != prefix)
            .collect();
        rank(&mut ranked)
    }

    /// Learn every adjacent word pair of `sentence`. Counts accumulate: observing the
    /// same sentence twice doubles its pairs.
    pub fn observe(&mut self, sentence: &str) -> ObserveReport {
        let mut report = ObserveReport::default();
        if !self.learning {
            return report;
        }
        let tokens: Vec<String> = sentence
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        for pair in tokens.windows(2) {
            if self.table.increment(&pair[0], &pair[1]) {
                report.recorded += 1;
            } else {
                report.rejected += 1;
                crate::log_debug(&format!(
                    "bigram count saturated; pair rejected ({} tokens)",
                    tokens.len()
                ));
                tracing::warn!(rejected = report.rejected, "bigram count saturated");
            }
        }
        if report.recorded > 0 {
            tracing::debug!(recorded = report.recorded, "observed sentence");
            if let Some(persist) = self.persist.as_ref() {
                persist.request_persist(&self.table);
            }
        }
        report
    }
}

/// Stable sort by weight (ties keep table order), percentages against the whole
/// pool, then truncate.
fn rank(candidates: &mut [(&str, u64)]) -> Vec<Suggestion> {
    let total: u64 = candidates.iter().map(|(_, weight)| weight).sum();
    if total == 0 {
        return Vec::new();
    }
    candidates.sort_by_key(|(_, weight)| Reverse(*weight));
    candidates
        .iter()
        .take(MAX_SUGGESTIONS)
        .map(|(word, weight)| Suggestion::new(word, *weight, total))
        .collect()
}

/// Predictor behind one lock so a query never observes a half-applied `observe`.
#[derive(Clone)]
pub struct SharedPredictor {
    inner: Arc<Mutex<Predictor>>,
}

impl SharedPredictor {
    pub fn new(predictor: Predictor) -> Self {
        Self {
            inner: Arc::new(Mutex::new(predictor)),
        }
    }

    pub fn predict_next(&self, context: &str) -> Vec<Suggestion> {
        lock_or_recover(&self.inner, "predictor.predict_next").predict_next(context)
    }

    pub fn complete_word(&self, prefix: &str) -> Vec<Suggestion> {
        lock_or_recover(&self.inner, "predictor.complete_word").complete_word(prefix)
    }

    pub fn observe(&self, sentence: &str) -> ObserveReport {
        lock_or_recover(&self.inner, "predictor.observe").observe(sentence)
    }

    pub fn word_count(&self) -> usize {
        lock_or_recover(&self.inner, "predictor.word_count").table().len()
    }
}
