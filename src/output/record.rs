//! The flattened leaf record

use crate::cursor::LexPath;
use serde::{Deserialize, Serialize};

/// One terminal document, flattened into a line of the record log.
///
/// Immutable once constructed; ownership passes from the worker that built
/// it into the sink. `lex_path` locates the record in the tree that
/// produced it, so the log's total order can be recovered by sorting even
/// though workers interleave across top-level branches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub url: String,
    /// Jurisdiction abbreviation, e.g. "TX".
    pub state: String,
    /// Breadcrumb trail as displayed on the page.
    pub path: String,
    pub title: String,
    /// Whether the page carries a "Universal Citation:" marker.
    pub univ_cite: bool,
    pub citation: Option<String>,
    pub content: String,
    pub lex_path: LexPath,
}
