//! Output module: append-only record and failure logs
//!
//! Both sinks are shared by all workers of a job and guarded by a mutex so
//! that each append lands as one complete line. The record log is never
//! rewritten; the entire resume design depends on it being append-only.

mod failures;
mod record;
mod sink;

pub use failures::FailureRecorder;
pub use record::Record;
pub use sink::RecordSink;
