use async_trait::async_trait;

use crate::records::{NewRestaurant, NewReview};

/// Everything one reconciliation staged for insertion. The whole batch
/// commits atomically or not at all.
#[derive(Debug, Clone, Default)]
pub struct IngestBatch {
    pub reviews: Vec<NewReview>,
    pub restaurants: Vec<NewRestaurant>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchCounts {
    pub reviews_added: u64,
    pub restaurants_added: u64,
    pub restaurants_skipped: u64,
}

/// Storage boundary for ingestion.
///
/// Implemented over PostgreSQL by `tasteboard-store`; tests substitute an
/// in-memory sink.
#[async_trait]
pub trait ReviewSink: Send + Sync {
    /// Insert the batch inside a single transaction. Restaurant rows that
    /// collide on (place id, type) are skipped, not duplicated; the counts
    /// reflect what actually landed. Any failure leaves nothing behind.
    async fn ingest_batch(&self, batch: &IngestBatch) -> anyhow::Result<BatchCounts>;

    /// Run the given maintenance/aggregation statements inside a single
    /// transaction, in order.
    async fn execute_procedures(&self, statements: &[&str]) -> anyhow::Result<()>;
}
