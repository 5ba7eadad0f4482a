//! Progress events sent from workers to the aggregator

/// One progress update from a worker, tagged with the job it belongs to.
///
/// Consumed once by the aggregator and discarded.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// A leaf record was extracted and appended to the record log.
    LeafCompleted { job: String },

    /// A fetch or extraction failed; the URL went to the failure log.
    LeafFailed { job: String },

    /// An already-complete subtree was skipped on resume. The walker does
    /// not revisit those leaves to count them one by one, so the prior
    /// run's record count arrives in bulk.
    BatchCompleted { job: String, count: u64 },

    /// The walker moved past a URL (completed or failed).
    CursorAdvanced { job: String, url: String },
}

impl ProgressEvent {
    /// The job identifier this event is keyed under.
    pub fn job(&self) -> &str {
        match self {
            ProgressEvent::LeafCompleted { job }
            | ProgressEvent::LeafFailed { job }
            | ProgressEvent::BatchCompleted { job, .. }
            | ProgressEvent::CursorAdvanced { job, .. } => job,
        }
    }
}
