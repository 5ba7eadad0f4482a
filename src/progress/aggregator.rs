//! Single-consumer aggregation of worker progress events

use crate::progress::ProgressEvent;
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedReceiver;

/// How many leaf events to accumulate per job between progress lines.
const LOG_INTERVAL: u64 = 25;

/// Counters for one (jurisdiction, dataset) job.
#[derive(Debug, Clone, Default)]
pub struct JobProgress {
    /// Leaves extracted and written this run.
    pub completed: u64,

    /// Leaves whose fetch or extraction failed this run.
    pub failed: u64,

    /// Leaves carried over from a prior run via the resume skip.
    pub resumed: u64,

    /// The URL the walker most recently moved past.
    pub last_url: String,
}

/// Consumes progress events for all concurrently running jobs.
///
/// One aggregator instance serves every job at once, keyed by job id.
/// The loop ends when the channel reports `None`, which with an mpsc
/// channel means every worker of every job has dropped its sender and
/// the buffer is drained — no trailing events are lost.
pub struct Aggregator {
    receiver: UnboundedReceiver<ProgressEvent>,
}

impl Aggregator {
    pub fn new(receiver: UnboundedReceiver<ProgressEvent>) -> Self {
        Self { receiver }
    }

    /// Runs the consumer loop to completion and returns the final
    /// per-job counters.
    pub async fn run(mut self) -> HashMap<String, JobProgress> {
        let mut jobs: HashMap<String, JobProgress> = HashMap::new();

        while let Some(event) = self.receiver.recv().await {
            let progress = jobs.entry(event.job().to_string()).or_default();

            match &event {
                ProgressEvent::LeafCompleted { job } => {
                    progress.completed += 1;
                    maybe_log(job, progress);
                }
                ProgressEvent::LeafFailed { job } => {
                    progress.failed += 1;
                    maybe_log(job, progress);
                }
                ProgressEvent::BatchCompleted { job, count } => {
                    progress.resumed += count;
                    tracing::info!(
                        "{}: resuming past {} previously recorded leaves",
                        job,
                        count
                    );
                }
                ProgressEvent::CursorAdvanced { url, .. } => {
                    progress.last_url = url.clone();
                }
            }
        }

        for (job, progress) in &jobs {
            tracing::info!(
                "{}: finished with {} completed, {} failed, {} resumed",
                job,
                progress.completed,
                progress.failed,
                progress.resumed
            );
        }

        jobs
    }
}

fn maybe_log(job: &str, progress: &JobProgress) {
    if (progress.completed + progress.failed) % LOG_INTERVAL == 0 {
        tracing::info!(
            "{}: completed {}, failed {}, last {}",
            job,
            progress.completed,
            progress.failed,
            progress.last_url
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_counts_events_per_job() {
        let (tx, rx) = mpsc::unbounded_channel();

        for _ in 0..3 {
            tx.send(ProgressEvent::LeafCompleted {
                job: "TX/codes".to_string(),
            })
            .unwrap();
        }
        tx.send(ProgressEvent::LeafFailed {
            job: "TX/codes".to_string(),
        })
        .unwrap();
        tx.send(ProgressEvent::LeafCompleted {
            job: "VT/regs".to_string(),
        })
        .unwrap();
        tx.send(ProgressEvent::CursorAdvanced {
            job: "VT/regs".to_string(),
            url: "https://example.com/last".to_string(),
        })
        .unwrap();
        drop(tx);

        let jobs = Aggregator::new(rx).run().await;

        let tx_progress = &jobs["TX/codes"];
        assert_eq!(tx_progress.completed, 3);
        assert_eq!(tx_progress.failed, 1);

        let vt_progress = &jobs["VT/regs"];
        assert_eq!(vt_progress.completed, 1);
        assert_eq!(vt_progress.last_url, "https://example.com/last");
    }

    #[tokio::test]
    async fn test_batch_completed_counts_in_bulk() {
        let (tx, rx) = mpsc::unbounded_channel();

        tx.send(ProgressEvent::BatchCompleted {
            job: "AL/codes".to_string(),
            count: 412,
        })
        .unwrap();
        tx.send(ProgressEvent::LeafCompleted {
            job: "AL/codes".to_string(),
        })
        .unwrap();
        drop(tx);

        let jobs = Aggregator::new(rx).run().await;
        assert_eq!(jobs["AL/codes"].resumed, 412);
        assert_eq!(jobs["AL/codes"].completed, 1);
    }

    #[tokio::test]
    async fn test_drains_channel_after_senders_drop() {
        let (tx, rx) = mpsc::unbounded_channel();

        // Everything queued before the senders drop must still be counted.
        for _ in 0..100 {
            tx.send(ProgressEvent::LeafCompleted {
                job: "WY/codes".to_string(),
            })
            .unwrap();
        }
        drop(tx);

        let jobs = Aggregator::new(rx).run().await;
        assert_eq!(jobs["WY/codes"].completed, 100);
    }
}
