use std::sync::Arc;

use tasteboard_core::Config;
use tasteboard_scrape::ScrapeJobs;
use tasteboard_store::PgReviewStore;

pub struct AppState {
    pub config: Config,
    /// Absent when the scraping service credential is not configured; the
    /// scrape endpoints refuse with a configuration error in that case.
    pub scraper: Option<Arc<dyn ScrapeJobs>>,
    pub store: Arc<PgReviewStore>,
}
