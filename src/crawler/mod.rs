//! Crawler module: fetch, classify, extract, traverse, distribute
//!
//! This module contains the crawl engine proper:
//! - a thin HTTP fetcher over the shared client
//! - the branch/leaf classifier and the leaf field extractor
//! - the depth-first traversal engine with checkpoint resume
//! - the work distributor and its fixed worker pool
//!
//! [`run_job`] ties them together for one (jurisdiction, dataset) job.

mod classifier;
mod distributor;
mod extractor;
mod fetcher;
mod traversal;

pub use classifier::{classify_document, ChildLink, DocumentKind, LISTING_MARKER};
pub use distributor::{distribute, run_workers};
pub use extractor::{extract_leaf, LeafFields};
pub use fetcher::{build_http_client, fetch_page, FetchOutcome};
pub use traversal::{TraversalEngine, WorkItem};

use crate::config::{JobSpec, OutputConfig};
use crate::cursor::{count_records, read_checkpoint};
use crate::output::{FailureRecorder, RecordSink};
use crate::progress::ProgressEvent;
use crate::Result;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use url::Url;

/// Everything needed to run one job: the spec plus the resolved root
/// URL, href resolution base, and record log path.
///
/// Resolution is split out of [`run_job`] so tests can point a job at a
/// local mock server.
#[derive(Debug, Clone)]
pub struct CrawlJob {
    pub spec: JobSpec,
    pub root_url: String,
    pub site_base: Url,
    pub output_path: PathBuf,
    pub resume: bool,
    pub workers: usize,
}

impl CrawlJob {
    /// Resolves a job spec against the output configuration.
    pub fn from_spec(
        spec: JobSpec,
        output: &OutputConfig,
        resume: bool,
        workers: usize,
    ) -> Result<Self> {
        let root_url = spec.root_url();
        let site_base = Url::parse(spec.dataset.site_base())?;
        let output_path = spec.output_path(output);
        Ok(Self {
            spec,
            root_url,
            site_base,
            output_path,
            resume,
            workers,
        })
    }
}

/// Runs one crawl job to completion.
///
/// Recovers the checkpoint from the record log tail (once, before any
/// worker starts), reports previously recorded leaves in bulk, opens the
/// sink in the matching mode, distributes the top-level branches, and
/// drives the worker pool. Returns an error only for job-fatal
/// conditions: root discovery failure or an unusable record log.
pub async fn run_job(
    client: &Client,
    job: CrawlJob,
    failures: FailureRecorder,
    events: UnboundedSender<ProgressEvent>,
) -> Result<()> {
    let job_id = job.spec.job_id();

    let checkpoint = if job.resume {
        read_checkpoint(&job.output_path)?
    } else {
        None
    };

    if let Some(cursor) = &checkpoint {
        let prior = count_records(&job.output_path)?;
        tracing::info!(
            "{}: resuming from checkpoint {} ({} records already on disk)",
            job_id,
            cursor,
            prior
        );
        let _ = events.send(ProgressEvent::BatchCompleted {
            job: job_id.clone(),
            count: prior,
        });
    } else {
        tracing::info!("{}: starting from the root (cold start)", job_id);
    }

    let sink = RecordSink::open(&job.output_path, checkpoint.is_some())?;

    let items = distribute(client, &job.root_url, &job.site_base, checkpoint.as_ref()).await?;
    tracing::info!("{}: {} top-level work items", job_id, items.len());

    let engine = Arc::new(TraversalEngine::new(
        client.clone(),
        &job.spec,
        job.site_base.clone(),
        sink,
        failures,
        events,
    ));
    run_workers(engine, items, job.workers.max(1)).await;

    Ok(())
}
