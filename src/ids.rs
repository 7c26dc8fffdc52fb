use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of opaque, unique receipt ids.
pub trait IdProvider: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs in hyphenated form
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidProvider;

impl IdProvider for UuidProvider {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic ids ("{prefix}-1", "{prefix}-2", ...) for tests and
/// reproducible runs
#[derive(Debug)]
pub struct SequenceProvider {
    prefix: String,
    next: AtomicU64,
}

impl SequenceProvider {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdProvider for SequenceProvider {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}
