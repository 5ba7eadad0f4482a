//! Lexicographic path addresses
//!
//! A [`LexPath`] addresses a node in the document tree by the sequence of
//! child indices chosen at each depth, in discovery order. Paths compare
//! lexicographically, so sorting records by path reproduces pre-order DFS
//! discovery order, and the path of the last written record is a resumable
//! cursor into the tree.
//!
//! The scheme assumes the site returns child listings in the same order on
//! every run. If the upstream ordering changes between an interrupted run
//! and its resumption, the cursor silently addresses the wrong node.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered sequence of child-choice indices from the tree root.
///
/// The derived `Ord` on the inner vector is exactly the lexicographic
/// order the resume design depends on: an ancestor sorts before every
/// node in its subtree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LexPath(Vec<usize>);

impl LexPath {
    /// The empty path, addressing the tree root.
    pub fn root() -> Self {
        LexPath(Vec::new())
    }

    pub fn new(indices: Vec<usize>) -> Self {
        LexPath(indices)
    }

    /// Extends this path by one child choice.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        LexPath(indices)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The top-level branch index, if any.
    pub fn first(&self) -> Option<usize> {
        self.0.first().copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// True if `self` matches all of `other`'s leading elements.
    ///
    /// Every path is a prefix of itself.
    pub fn is_prefix_of(&self, other: &LexPath) -> bool {
        other.0.len() >= self.0.len() && self.0 == other.0[..self.0.len()]
    }

    /// True if `self` is a prefix of `other` and strictly shorter, i.e.
    /// `self` is a proper ancestor of `other`.
    pub fn is_strict_prefix_of(&self, other: &LexPath) -> bool {
        self.0.len() < other.0.len() && self.is_prefix_of(other)
    }
}

impl From<Vec<usize>> for LexPath {
    fn from(indices: Vec<usize>) -> Self {
        LexPath(indices)
    }
}

impl fmt::Display for LexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, idx) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", idx)?;
        }
        write!(f, "]")
    }
}

/// Computes the child index to start iterating from at a branch.
///
/// When the branch's `path` is a proper ancestor of the resume cursor, the
/// cursor's index at this depth points at the first subtree that may still
/// contain unvisited leaves; every earlier sibling was completed by the
/// prior run and is skipped without a fetch. In every other case iteration
/// starts at 0.
pub fn resume_start_index(path: &LexPath, cursor: Option<&LexPath>) -> usize {
    match cursor {
        Some(c) if path.is_strict_prefix_of(c) => c.as_slice()[path.len()],
        _ => 0,
    }
}

/// The cursor to pass down to the child at `index`.
///
/// Only the child at exactly the resume index inherits the cursor. Later
/// siblings start fresh: the checkpoint cannot address them, since the
/// listing order is stable and everything before the checkpointed subtree
/// is known-complete.
pub fn sibling_cursor(cursor: Option<&LexPath>, index: usize, start_idx: usize) -> Option<LexPath> {
    if index == start_idx {
        cursor.cloned()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(indices: &[usize]) -> LexPath {
        LexPath::new(indices.to_vec())
    }

    #[test]
    fn test_lexicographic_order() {
        assert!(path(&[0]) < path(&[1]));
        assert!(path(&[0, 5]) < path(&[1]));
        assert!(path(&[1]) < path(&[1, 0]));
        assert!(path(&[1, 2]) < path(&[1, 10]));
        assert!(path(&[]) < path(&[0]));
    }

    #[test]
    fn test_sort_reproduces_preorder() {
        // Pre-order DFS of a two-branch tree
        let preorder = vec![
            path(&[0]),
            path(&[0, 0]),
            path(&[0, 1]),
            path(&[0, 1, 0]),
            path(&[0, 2]),
            path(&[1]),
            path(&[1, 0]),
        ];
        let mut shuffled = preorder.clone();
        shuffled.reverse();
        shuffled.sort();
        assert_eq!(shuffled, preorder);
    }

    #[test]
    fn test_prefix_relations() {
        assert!(path(&[0, 1]).is_prefix_of(&path(&[0, 1])));
        assert!(!path(&[0, 1]).is_strict_prefix_of(&path(&[0, 1])));
        assert!(path(&[0]).is_strict_prefix_of(&path(&[0, 1])));
        assert!(path(&[]).is_strict_prefix_of(&path(&[3])));
        assert!(!path(&[1]).is_prefix_of(&path(&[0, 1])));
        assert!(!path(&[0, 1, 2]).is_prefix_of(&path(&[0, 1])));
    }

    #[test]
    fn test_child_extends_path() {
        assert_eq!(path(&[0, 1]).child(4), path(&[0, 1, 4]));
        assert_eq!(LexPath::root().child(2), path(&[2]));
    }

    #[test]
    fn test_resume_start_index_on_cursor_spine() {
        let cursor = path(&[2, 1, 3]);
        assert_eq!(resume_start_index(&LexPath::root(), Some(&cursor)), 2);
        assert_eq!(resume_start_index(&path(&[2]), Some(&cursor)), 1);
        assert_eq!(resume_start_index(&path(&[2, 1]), Some(&cursor)), 3);
    }

    #[test]
    fn test_resume_start_index_off_spine() {
        let cursor = path(&[2, 1, 3]);
        // Not a prefix of the cursor: iterate from the beginning
        assert_eq!(resume_start_index(&path(&[3]), Some(&cursor)), 0);
        assert_eq!(resume_start_index(&path(&[2, 0]), Some(&cursor)), 0);
        // Exact match is not a strict prefix
        assert_eq!(resume_start_index(&path(&[2, 1, 3]), Some(&cursor)), 0);
    }

    #[test]
    fn test_resume_start_index_without_cursor() {
        assert_eq!(resume_start_index(&path(&[0, 1]), None), 0);
    }

    #[test]
    fn test_sibling_cursor_resets_after_resume_index() {
        let cursor = path(&[2, 1, 3]);
        assert_eq!(
            sibling_cursor(Some(&cursor), 1, 1),
            Some(cursor.clone())
        );
        assert_eq!(sibling_cursor(Some(&cursor), 2, 1), None);
        assert_eq!(sibling_cursor(Some(&cursor), 5, 1), None);
        assert_eq!(sibling_cursor(None, 0, 0), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(path(&[0, 12, 3]).to_string(), "[0.12.3]");
        assert_eq!(LexPath::root().to_string(), "[]");
    }
}
