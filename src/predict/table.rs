//! Word-pair frequency table with first-seen iteration order.
//!
//! Serialized as `{"word": {"next": count}}`, the same shape the seed model
//! generator writes, with entries kept in document order so ranking ties resolve
//! the same way before and after a reload.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

type Successors = IndexMap<String, u32>;

/// Successor counts keyed by predecessor word. Every stored count is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BigramTable {
    entries: IndexMap<String, Successors>,
}

impl BigramTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct predecessor words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored count for the ordered pair, 0 when never seen.
    pub fn count(&self, word: &str, next: &str) -> u32 {
        self.entries
            .get(word)
            .and_then(|successors| successors.get(next))
            .copied()
            .unwrap_or(0)
    }

    /// Successors of `word` in first-seen order.
    pub fn successors(&self, word: &str) -> Option<impl Iterator<Item = (&str, u32)>> {
        self.entries
            .get(word)
            .map(|successors| successors.iter().map(|(next, count)| (next.as_str(), *count)))
    }

    /// Predecessor words with their total outgoing count, in first-seen order.
    pub fn words_with_totals(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(word, successors)| {
            let total = successors.values().map(|count| u64::from(*count)).sum();
            (word.as_str(), total)
        })
    }

    /// Add one to the pair's count. `false` when the count is already saturated;
    /// the table is left untouched in that case.
    pub(crate) fn increment(&mut self, word: &str, next: &str) -> bool {
        if let Some(current) = self
            .entries
            .get_mut(word)
            .and_then(|successors| successors.get_mut(next))
        {
            return match current.checked_add(1) {
                Some(bumped) => {
                    *current = bumped;
                    true
                }
                None => false,
            };
        }
        self.entries
            .entry(word.to_string())
            .or_default()
            .insert(next.to_string(), 1);
        true
    }
}

impl<'de> Deserialize<'de> for BigramTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<String, Successors>::deserialize(deserializer)?;
        let entries = raw
            .into_iter()
            .filter_map(|(word, successors)| {
                // Zero counts carry no signal and would break the count >= 1 invariant.
                let kept: Successors = successors
                    .into_iter()
                    .filter(|&(_, count)| count > 0)
                    .collect();
                (!kept.is_empty()).then_some((word, kept))
            })
            .collect();
        Ok(Self { entries })
    }
}
