//! PostgreSQL persistence: connection pool setup, row insertion, and the
//! transactional [`ReviewSink`](tasteboard_ingest::ReviewSink)
//! implementation used by the ingestion reconciler.

pub mod db;
pub mod pg;
pub mod procedures;
pub mod restaurants;
pub mod reviews;

pub use pg::PgReviewStore;
