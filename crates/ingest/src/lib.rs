//! Ingestion pipeline: normalization of raw scraped records, the
//! reconciliation workflow that merges a completed run's dataset into
//! storage, and validation for directly submitted reviews.

pub mod normalize;
pub mod reconcile;
pub mod records;
pub mod sink;
pub mod submit;

pub use reconcile::{reconcile, IngestReport, ReconcileError, ReconcileOptions, ReconcileOutcome};
pub use records::{NewRestaurant, NewReview};
pub use sink::{BatchCounts, IngestBatch, ReviewSink};
