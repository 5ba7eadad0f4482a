//! Depth-first traversal with checkpoint resume
//!
//! The engine walks one top-level subtree to completion, emitting a
//! record per leaf in pre-order. An explicit stack carries the frames;
//! children are pushed in reverse index order so the lowest index is
//! processed first, which preserves the pre-order guarantee.
//!
//! Resume rules, applied functionally at each frame:
//! - a frame whose path equals the cursor exactly is the checkpointed
//!   leaf from the prior run and is skipped without a fetch;
//! - at a branch on the cursor's spine, iteration starts at the cursor's
//!   index for that depth, skipping every earlier sibling subtree
//!   without fetching it;
//! - only the child at exactly the start index inherits the cursor;
//!   later siblings get none.
//!
//! Fetch and extraction failures are recorded and the walk continues
//! with the next frame; nothing below the root aborts a subtree.

use crate::config::{DatasetKind, JobSpec};
use crate::crawler::classifier::{classify_document, DocumentKind};
use crate::crawler::extractor::extract_leaf;
use crate::crawler::fetcher::{fetch_page, FetchOutcome};
use crate::cursor::{resume_start_index, sibling_cursor, LexPath};
use crate::output::{FailureRecorder, Record, RecordSink};
use crate::progress::ProgressEvent;
use crate::{LexError, Result};
use reqwest::Client;
use tokio::sync::mpsc::UnboundedSender;
use url::Url;

/// One top-level unit of work: a subtree root, its path prefix, and the
/// resume cursor restricted to this subtree, if any.
///
/// Owned by the distributor's queue until exactly one worker pops it.
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub url: String,
    pub path: LexPath,
    pub cursor: Option<LexPath>,
}

/// A pending node during the walk.
#[derive(Debug)]
struct Frame {
    url: String,
    path: LexPath,
    cursor: Option<LexPath>,
}

/// Walks subtrees depth-first for one job.
///
/// Shared read-only across the job's workers; all mutable state lives in
/// the sinks (mutex-guarded) and the progress channel.
pub struct TraversalEngine {
    client: Client,
    job_id: String,
    state: String,
    dataset: DatasetKind,
    site_base: Url,
    sink: RecordSink,
    failures: FailureRecorder,
    events: UnboundedSender<ProgressEvent>,
}

impl TraversalEngine {
    pub fn new(
        client: Client,
        spec: &JobSpec,
        site_base: Url,
        sink: RecordSink,
        failures: FailureRecorder,
        events: UnboundedSender<ProgressEvent>,
    ) -> Self {
        Self {
            client,
            job_id: spec.job_id(),
            state: spec.jurisdiction.abbr.to_string(),
            dataset: spec.dataset,
            site_base,
            sink,
            failures,
            events,
        }
    }

    /// Runs one work item's subtree to completion.
    ///
    /// Only sink IO errors propagate; per-node failures are recorded and
    /// the walk continues.
    pub async fn run(&self, item: WorkItem) -> Result<()> {
        let mut stack = vec![Frame {
            url: item.url,
            path: item.path,
            cursor: item.cursor,
        }];

        while let Some(frame) = stack.pop() {
            // The exact checkpoint address is the leaf the prior run
            // recorded last: already in the log, skip without fetching.
            if frame.cursor.as_ref() == Some(&frame.path) {
                tracing::debug!("{}: checkpoint leaf {} skipped", self.job_id, frame.path);
                continue;
            }

            let body = match fetch_page(&self.client, &frame.url).await {
                FetchOutcome::Success { body } => body,
                FetchOutcome::HttpError { status } => {
                    let error = LexError::Status {
                        url: frame.url.clone(),
                        status,
                    };
                    self.report_failure(&frame.url, &error)?;
                    continue;
                }
                FetchOutcome::NetworkError { error } => {
                    let error = LexError::Fetch {
                        url: frame.url.clone(),
                        reason: error,
                    };
                    self.report_failure(&frame.url, &error)?;
                    continue;
                }
            };

            match classify_document(&body) {
                DocumentKind::Branch(children) => {
                    let start_idx = resume_start_index(&frame.path, frame.cursor.as_ref());
                    for (i, child) in children.iter().enumerate().skip(start_idx).rev() {
                        let child_url = match self.site_base.join(&child.href) {
                            Ok(url) => url.to_string(),
                            Err(e) => {
                                self.report_failure(&child.href, &LexError::UrlParse(e))?;
                                continue;
                            }
                        };
                        stack.push(Frame {
                            url: child_url,
                            path: frame.path.child(i),
                            cursor: sibling_cursor(frame.cursor.as_ref(), i, start_idx),
                        });
                    }
                }
                DocumentKind::Leaf => match extract_leaf(&body, self.dataset) {
                    Ok(fields) => {
                        let record = Record {
                            url: frame.url.clone(),
                            state: self.state.clone(),
                            path: fields.breadcrumb,
                            title: fields.title,
                            univ_cite: fields.univ_cite,
                            citation: fields.citation,
                            content: fields.content,
                            lex_path: frame.path,
                        };
                        self.sink.append(&record)?;
                        self.send(ProgressEvent::LeafCompleted {
                            job: self.job_id.clone(),
                        });
                        self.send(ProgressEvent::CursorAdvanced {
                            job: self.job_id.clone(),
                            url: frame.url,
                        });
                    }
                    Err(reason) => {
                        let error = LexError::Extraction {
                            url: frame.url.clone(),
                            reason,
                        };
                        self.report_failure(&frame.url, &error)?;
                    }
                },
            }
        }

        Ok(())
    }

    /// Records a failed URL and reports it, then lets the walk continue.
    fn report_failure(&self, url: &str, error: &LexError) -> Result<()> {
        tracing::warn!("{}: {}", self.job_id, error);
        self.failures.record(url)?;
        self.send(ProgressEvent::LeafFailed {
            job: self.job_id.clone(),
        });
        self.send(ProgressEvent::CursorAdvanced {
            job: self.job_id.clone(),
            url: url.to_string(),
        });
        Ok(())
    }

    fn send(&self, event: ProgressEvent) {
        // The aggregator outlives the workers; a closed channel only
        // means the process is already shutting down.
        let _ = self.events.send(event);
    }
}
