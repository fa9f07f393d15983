use thiserror::Error;
use tracing::{info, warn};

use tasteboard_core::config::ProcedureConfig;
use tasteboard_scrape::{RunStatus, ScrapeError, ScrapeJobs};

use crate::normalize::normalize;
use crate::records::NewRestaurant;
use crate::sink::{IngestBatch, ReviewSink};

const DEFAULT_PAGE_SIZE: u32 = 500;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    #[error("database error: {0}")]
    Store(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    /// When set, every record also stages a (place, type) restaurant row
    /// under this tag, deduplicated against existing pairs.
    pub restaurant_type: Option<String>,
    /// Wipe all existing data before ingesting. Explicit maintenance mode
    /// only; never implied by a normal ingestion.
    pub reset_first: bool,
    /// Dataset page size; 0 means the default.
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileOutcome {
    /// The run has not reached terminal success. Nothing was written; the
    /// caller is expected to poll again later.
    NotReady { status: String },
    Completed(IngestReport),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    pub reviews_added: u64,
    pub restaurants_added: u64,
    pub restaurants_skipped: u64,
    /// Set when a post-commit aggregation procedure failed. The ingested
    /// rows are already committed and stay put; the aggregate tables are
    /// stale until aggregation is re-triggered.
    pub aggregation_error: Option<String>,
}

/// Pull a completed run's result set into storage.
///
/// The full dataset is normalized and staged, then committed as one
/// transaction; any staging or commit failure rolls the whole batch back.
/// Aggregation procedures run in a second transaction after the commit, so
/// an aggregation failure never undoes ingested data.
///
/// Review insertion has no idempotence key: reconciling the same run twice
/// inserts every review again. That is intentional, documented behavior of
/// this design, not something this function guards against.
pub async fn reconcile(
    scraper: &dyn ScrapeJobs,
    sink: &dyn ReviewSink,
    procedures: &ProcedureConfig,
    run_id: &str,
    opts: &ReconcileOptions,
) -> Result<ReconcileOutcome, ReconcileError> {
    let run = scraper.run_info(run_id).await?;
    match run.status {
        RunStatus::Succeeded => {}
        other => {
            return Ok(ReconcileOutcome::NotReady {
                status: other.as_str().to_string(),
            })
        }
    }

    if opts.reset_first {
        sink.execute_procedures(&[&procedures.clear_db]).await?;
        info!(run_id, "cleared existing review data before ingest");
    }

    let dataset_id = run.dataset_id.ok_or_else(|| {
        ScrapeError::Parse(format!("run '{run_id}' has no result dataset"))
    })?;

    let page_size = if opts.page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        opts.page_size
    };

    let mut batch = IngestBatch::default();
    let mut offset = 0u32;
    loop {
        let page = scraper.dataset_page(&dataset_id, offset, page_size).await?;
        let fetched = page.len() as u32;
        for raw in &page {
            let review = normalize(raw);
            if let Some(rtype) = &opts.restaurant_type {
                batch.restaurants.push(NewRestaurant {
                    google_maps_id: review.google_maps_id.clone().unwrap_or_default(),
                    place_name: review.place_name.clone(),
                    place_address: review.place_address.clone(),
                    restaurant_type: rtype.clone(),
                });
            }
            batch.reviews.push(review);
        }
        if fetched < page_size {
            break;
        }
        offset += fetched;
    }

    let counts = sink.ingest_batch(&batch).await?;
    info!(
        run_id,
        reviews = counts.reviews_added,
        restaurants = counts.restaurants_added,
        skipped = counts.restaurants_skipped,
        "ingest batch committed"
    );

    let mut statements: Vec<&str> = vec![&procedures.make_ratings];
    if opts.restaurant_type.is_none() {
        // Only the full "all restaurants" path rebuilds the restaurant table.
        statements.push(&procedures.make_restaurants);
    }
    let aggregation_error = match sink.execute_procedures(&statements).await {
        Ok(()) => None,
        Err(e) => {
            warn!(run_id, error = %e, "aggregation failed after a successful commit");
            Some(e.to_string())
        }
    };

    Ok(ReconcileOutcome::Completed(IngestReport {
        reviews_added: counts.reviews_added,
        restaurants_added: counts.restaurants_added,
        restaurants_skipped: counts.restaurants_skipped,
        aggregation_error,
    }))
}
