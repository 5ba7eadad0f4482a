//! Checkpoint recovery from the record log tail
//!
//! The resume cursor is the `lex_path` of the last record appended to a
//! job's JSONL file. It is recovered exactly once, before any worker
//! starts, by scanning backward from the end of the file for the final
//! complete line. A missing file, an empty file, or an unparsable tail
//! line all degrade to a cold start.

use crate::cursor::LexPath;
use crate::Result;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

/// Recovers the lex path of the last record in the given log file.
///
/// Returns `None` when the file is missing or empty, when the tail line
/// does not parse as JSON, or when the record carries no `lex_path`
/// (logs written without resume support). The backward scan tolerates a
/// one-line file and a final write that was not newline-terminated.
pub fn read_checkpoint(path: &Path) -> Result<Option<LexPath>> {
    let last_line = match read_last_line(path)? {
        Some(line) => line,
        None => return Ok(None),
    };

    let value: serde_json::Value = match serde_json::from_str(&last_line) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(
                "Unparsable tail record in {}, treating as cold start: {}",
                path.display(),
                e
            );
            return Ok(None);
        }
    };

    let lex_path = value
        .get("lex_path")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|n| n.as_u64().map(|n| n as usize))
                .collect::<Vec<_>>()
        })
        .map(LexPath::new);

    Ok(lex_path)
}

/// Counts the records already present in the given log file.
///
/// Used on resume to report the skipped leaves in bulk, since the walker
/// never revisits them individually.
pub fn count_records(path: &Path) -> Result<u64> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };

    let reader = BufReader::new(file);
    let mut count = 0u64;
    for line in reader.lines() {
        if !line?.trim().is_empty() {
            count += 1;
        }
    }
    Ok(count)
}

/// Reads the final complete line of a file by scanning backward from EOF.
fn read_last_line(path: &Path) -> Result<Option<String>> {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(None);
    }

    // A trailing newline terminates the last record rather than starting
    // an empty one, so the scan begins just before it.
    let mut end = len;
    let mut byte = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut byte)?;
    if byte[0] == b'\n' {
        end = len - 1;
    }
    if end == 0 {
        return Ok(None);
    }

    // Walk backward one byte at a time until the previous line boundary,
    // falling back to the start of the file for a one-line log.
    let mut line_start = 0u64;
    let mut pos = end;
    while pos > 0 {
        pos -= 1;
        file.seek(SeekFrom::Start(pos))?;
        file.read_exact(&mut byte)?;
        if byte[0] == b'\n' {
            line_start = pos + 1;
            break;
        }
    }

    file.seek(SeekFrom::Start(line_start))?;
    let mut buf = String::new();
    file.take(end - line_start).read_to_string(&mut buf)?;
    Ok(Some(buf))
}
