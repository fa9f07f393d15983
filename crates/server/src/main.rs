mod api;
mod router;
mod state;

use std::sync::Arc;

use tracing::{info, warn};

use tasteboard_scrape::{ApifyClient, ScrapeJobs};
use tasteboard_store::PgReviewStore;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    tasteboard_core::config::load_dotenv();
    let config = tasteboard_core::Config::from_env();
    config.log_summary();

    let pool = tasteboard_store::db::connect(&config.postgres).await?;
    let store = Arc::new(PgReviewStore::new(pool));

    let scraper: Option<Arc<dyn ScrapeJobs>> = match ApifyClient::from_config(&config.scraper) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            warn!("scraper client not available: {e} — scrape endpoints will refuse");
            None
        }
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState {
        config,
        scraper,
        store,
    });

    let app = router::build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
