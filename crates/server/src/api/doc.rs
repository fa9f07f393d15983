//! OpenAPI documentation aggregator.
//!
//! Collects all `#[utoipa::path]`-annotated handlers and `ToSchema`-derived
//! types into a single OpenAPI spec, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "tasteboard API",
        version = "0.1.0",
        description = "Restaurant review ingestion backend: drives scraping runs on an \
                       external job service and reconciles their results into PostgreSQL.",
    ),
    tags(
        (name = "Health", description = "Service readiness"),
        (name = "Scrape", description = "Scraping-run lifecycle and reconciliation"),
        (name = "Reviews", description = "Direct review submission"),
        (name = "Admin", description = "Maintenance operations"),
    ),
    paths(
        crate::api::health::health,
        crate::api::scrape::start_run,
        crate::api::scrape::start_type_run,
        crate::api::scrape::run_status,
        crate::api::scrape::reconcile_all,
        crate::api::scrape::reconcile_type,
        crate::api::admin::reset,
        crate::api::submit::submit_review,
        crate::api::seed::seed_from_file,
    )
)]
pub struct ApiDoc;
