use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// In-memory map from receipt id to awarded points.
///
/// Records live for the lifetime of the process. Writers hold the lock only
/// for the single insert; readers share it. Every entry is a complete
/// `(id, points)` pair, so a lock poisoned by a panicking holder is still
/// safe to use and is recovered rather than propagated.
#[derive(Debug, Default)]
pub struct ScoreStore {
    scores: RwLock<HashMap<String, u64>>,
}

impl ScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store points under `id`, replacing any previous value
    pub fn put(&self, id: &str, points: u64) {
        let mut scores = self.scores.write().unwrap_or_else(PoisonError::into_inner);
        scores.insert(id.to_string(), points);
    }

    /// Points stored under `id`, or `None` if it was never written
    pub fn get(&self, id: &str) -> Option<u64> {
        let scores = self.scores.read().unwrap_or_else(PoisonError::into_inner);
        scores.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.scores
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
