//! Cursor module: lexicographic tree addresses and checkpoint recovery
//!
//! A crawl position is identified by its [`LexPath`], the sequence of
//! child-index choices from the tree root. The path of the last record
//! written to a job's output log doubles as the resume cursor; the
//! checkpoint reader recovers it from the log tail before workers start.

mod checkpoint;
mod lexpath;

pub use checkpoint::{count_records, read_checkpoint};
pub use lexpath::{resume_start_index, sibling_cursor, LexPath};
