//! Append-only JSONL record sink

use crate::output::Record;
use crate::Result;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Thread-safe, append-only sink for leaf records.
///
/// Any number of workers may append concurrently; the mutex makes each
/// append (serialize, write, flush) atomic with respect to the others, so
/// no partial lines interleave. Each line is flushed immediately so the
/// checkpoint reader of a later run only ever sees complete records.
#[derive(Clone)]
pub struct RecordSink {
    writer: Arc<Mutex<BufWriter<File>>>,
}

impl RecordSink {
    /// Opens the sink, truncating any existing log for a fresh run and
    /// appending when resuming from a checkpoint.
    pub fn open(path: &Path, resume: bool) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = if resume {
            OpenOptions::new().create(true).append(true).open(path)?
        } else {
            File::create(path)?
        };

        Ok(Self {
            writer: Arc::new(Mutex::new(BufWriter::new(file))),
        })
    }

    /// Appends one record as a single JSON line.
    pub fn append(&self, record: &Record) -> Result<()> {
        let line = serde_json::to_string(record)?;
        let mut writer = self.writer.lock().unwrap();
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
