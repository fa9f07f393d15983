//! Client for the external review-scraping job service.
//!
//! The service runs scraping jobs asynchronously: a run is started, polled
//! by identifier until it reaches a terminal status, and its result dataset
//! is then retrieved page by page. [`ScrapeJobs`] is the seam the rest of
//! the system programs against; [`ApifyClient`] is the HTTP-backed
//! implementation.

pub mod client;
pub mod error;
pub mod status;
pub mod types;

pub use client::{ApifyClient, ScrapeJobs};
pub use error::ScrapeError;
pub use status::RunStatus;
pub use types::{RawReview, RunInfo, RunInput, StartedRun};
