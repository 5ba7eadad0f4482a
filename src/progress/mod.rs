//! Progress module: per-job crawl counters
//!
//! Workers never share mutable progress state. They send events into one
//! channel; a single aggregator loop owns the counters for every job that
//! is running and is the only thing that mutates them.

mod aggregator;
mod events;

pub use aggregator::{Aggregator, JobProgress};
pub use events::ProgressEvent;
