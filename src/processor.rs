use std::sync::Arc;
use tracing::info;

use crate::ids::{IdProvider, UuidProvider};
use crate::receipt::Receipt;
use crate::scoring::calculate_points;
use crate::store::ScoreStore;

/// Scores receipts and remembers the points under a fresh id.
///
/// One instance is built at startup and shared by every request handler.
pub struct ReceiptProcessor {
    store: ScoreStore,
    ids: Arc<dyn IdProvider>,
}

impl Default for ReceiptProcessor {
    fn default() -> Self {
        Self::new(Arc::new(UuidProvider))
    }
}

impl ReceiptProcessor {
    pub fn new(ids: Arc<dyn IdProvider>) -> Self {
        Self {
            store: ScoreStore::new(),
            ids,
        }
    }

    /// Score `receipt`, store the points and return the new id.
    ///
    /// The points are stored before the id is handed out, so a lookup with
    /// the returned id always finds them.
    pub fn submit(&self, receipt: &Receipt) -> String {
        let result = calculate_points(receipt);
        let id = self.ids.next_id();
        self.store.put(&id, result.points);

        info!(
            id = %id,
            points = result.points,
            items = receipt.item_count(),
            degraded = result.breakdown.has_skipped(),
            "Receipt processed"
        );
        id
    }

    /// Points awarded to the receipt with `id`, if one was submitted
    pub fn lookup(&self, id: &str) -> Option<u64> {
        self.store.get(id)
    }

    /// Number of receipts processed so far
    pub fn processed_count(&self) -> usize {
        self.store.len()
    }
}
