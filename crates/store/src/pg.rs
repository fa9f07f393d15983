use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use tasteboard_ingest::records::NewReview;
use tasteboard_ingest::sink::{BatchCounts, IngestBatch, ReviewSink};

use crate::{procedures, restaurants, reviews};

/// PostgreSQL-backed review storage.
///
/// Each operation opens its own transaction and releases it on every exit
/// path: an early return drops the transaction, which rolls it back.
pub struct PgReviewStore {
    pool: PgPool,
}

impl PgReviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert a single directly-submitted review outside any batch.
    pub async fn insert_review(&self, review: &NewReview) -> anyhow::Result<i64> {
        let mut conn = self.pool.acquire().await?;
        let id = reviews::insert(&mut conn, review).await?;
        Ok(id)
    }
}

#[async_trait]
impl ReviewSink for PgReviewStore {
    async fn ingest_batch(&self, batch: &IngestBatch) -> anyhow::Result<BatchCounts> {
        let mut tx = self.pool.begin().await?;
        let mut counts = BatchCounts::default();

        for review in &batch.reviews {
            reviews::insert(&mut tx, review).await?;
            counts.reviews_added += 1;
        }
        for restaurant in &batch.restaurants {
            if restaurants::insert_if_absent(&mut tx, restaurant).await? {
                counts.restaurants_added += 1;
            } else {
                counts.restaurants_skipped += 1;
            }
        }

        tx.commit().await?;
        debug!(
            reviews = counts.reviews_added,
            restaurants = counts.restaurants_added,
            skipped = counts.restaurants_skipped,
            "ingest batch committed"
        );
        Ok(counts)
    }

    async fn execute_procedures(&self, statements: &[&str]) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        for statement in statements {
            debug!(statement = %statement, "executing procedure");
            procedures::run(&mut tx, statement).await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
