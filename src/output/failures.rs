//! Append-only failure log
//!
//! URLs that failed to fetch or extract are written here, one per line,
//! for later offline retry. Nothing consults this log at crawl time.

use crate::Result;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Write-only sink of failed URLs, shared across all jobs and workers.
#[derive(Clone)]
pub struct FailureRecorder {
    file: Arc<Mutex<File>>,
}

impl FailureRecorder {
    /// Opens the failure log in append mode, creating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Arc::new(Mutex::new(file)),
        })
    }

    /// Appends one failed URL as its own line.
    pub fn record(&self, url: &str) -> Result<()> {
        let mut file = self.file.lock().unwrap();
        file.write_all(url.as_bytes())?;
        file.write_all(b"\n")?;
        file.flush()?;
        Ok(())
    }
}
