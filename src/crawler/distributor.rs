//! Work distribution across top-level branches
//!
//! The distributor fetches the job root exactly once (the top-level
//! listing is always re-enumerated, never partially resumed, so shape
//! drift is at least visible at depth 0), builds one work item per
//! top-level branch at or past the checkpoint, and feeds a fixed pool of
//! workers from a shared queue. Top-level subtrees are disjoint, so no
//! two workers ever address overlapping path ranges.

use crate::crawler::classifier::{classify_document, DocumentKind};
use crate::crawler::fetcher::{fetch_page, FetchOutcome};
use crate::crawler::traversal::{TraversalEngine, WorkItem};
use crate::cursor::{resume_start_index, sibling_cursor, LexPath};
use crate::{LexError, Result};
use reqwest::Client;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Enumerates the top-level branches and builds the work items.
///
/// Mirrors the traversal's sibling rule at depth 0: only the branch at
/// the checkpoint's first index carries the (possibly deeper) cursor,
/// later branches start fresh, earlier branches are not emitted at all.
/// A root page with no child listing yields a single work item for the
/// root itself. A root fetch failure is fatal for this job — there is
/// no subtree to discover — and is surfaced, not retried.
pub async fn distribute(
    client: &Client,
    root_url: &str,
    site_base: &url::Url,
    checkpoint: Option<&LexPath>,
) -> Result<Vec<WorkItem>> {
    let body = match fetch_page(client, root_url).await {
        FetchOutcome::Success { body } => body,
        FetchOutcome::HttpError { status } => {
            return Err(LexError::RootDiscovery {
                url: root_url.to_string(),
                reason: format!("HTTP status {}", status),
            })
        }
        FetchOutcome::NetworkError { error } => {
            return Err(LexError::RootDiscovery {
                url: root_url.to_string(),
                reason: error,
            })
        }
    };

    let root = LexPath::root();
    match classify_document(&body) {
        DocumentKind::Branch(children) => {
            let start_branch = resume_start_index(&root, checkpoint);
            let mut items = Vec::new();
            for (i, child) in children.iter().enumerate().skip(start_branch) {
                let url = site_base.join(&child.href)?;
                items.push(WorkItem {
                    url: url.to_string(),
                    path: root.child(i),
                    cursor: sibling_cursor(checkpoint, i, start_branch),
                });
            }
            Ok(items)
        }
        DocumentKind::Leaf => Ok(vec![WorkItem {
            url: root_url.to_string(),
            path: root,
            cursor: checkpoint.cloned(),
        }]),
    }
}

/// Runs the worker pool over the distributed work items.
///
/// Each worker pops an item non-blockingly and runs its whole subtree to
/// completion before pulling the next; workers only ever meet at the
/// sinks' mutexes. A worker whose subtree hits a sink error logs it and
/// moves on so the remaining items still run.
pub async fn run_workers(engine: Arc<TraversalEngine>, items: Vec<WorkItem>, worker_count: usize) {
    let queue = Arc::new(Mutex::new(VecDeque::from(items)));

    let mut handles = Vec::with_capacity(worker_count);
    for worker in 0..worker_count {
        let engine = Arc::clone(&engine);
        let queue = Arc::clone(&queue);

        handles.push(tokio::spawn(async move {
            loop {
                let item = queue.lock().unwrap().pop_front();
                let item = match item {
                    Some(item) => item,
                    None => break,
                };

                tracing::debug!("worker {} starting subtree {}", worker, item.path);
                if let Err(e) = engine.run(item).await {
                    tracing::error!("worker {} subtree failed: {}", worker, e);
                }
            }
        }));
    }

    for handle in handles {
        if let Err(e) = handle.await {
            tracing::error!("worker task panicked: {}", e);
        }
    }
}
