//! # Identifier Allocation
//!
//! New notes get the first free identifier under their parent, following the
//! alternation rule: a child's segment kind is the opposite of its parent's last
//! segment. Top-level identifiers are numeric.
//!
//! ```text
//! (root) → 1, 2, 3 …
//! 1      → 1.a, 1.b … 1.z, 1.aa …
//! 1.a    → 1.a.1, 1.a.2 …
//! ```
//!
//! Allocation tries candidates in increment order and returns the first one that is
//! not already in the tree. Since the candidate space is unbounded and the tree is
//! finite, this always terminates.

use crate::tree::{Node, ZettelTree};
use crate::zettel_id::{Segment, SegmentKind, ZettelId};
use tracing::debug;

/// First candidate segment for a child of a parent whose last segment is given.
pub fn first_child_segment(parent_last: Option<&Segment>) -> Segment {
    match parent_last {
        Some(last) if last.is_numeric() => Segment::first(SegmentKind::Alphabetic),
        _ => Segment::first(SegmentKind::Numeric),
    }
}

/// Tries `parent.<segment>` starting at `start` and returns the first segment whose
/// identifier is not `taken`.
pub(crate) fn first_free<F>(parent: &ZettelId, start: Segment, taken: F) -> Segment
where
    F: Fn(&ZettelId) -> bool,
{
    let mut segment = start;
    while taken(&parent.child(segment.clone())) {
        segment = segment.increment();
    }
    segment
}

/// Next unused child identifier of `parent`.
pub fn next_child<D>(tree: &ZettelTree<D>, parent: &Node<D>) -> ZettelId {
    let parent_id = parent.zettel_id();
    let segment = first_free(
        parent_id,
        first_child_segment(parent_id.last()),
        |candidate| tree.contains(candidate),
    );
    let next = parent_id.child(segment);
    debug!(parent = %parent_id, next = %next, "allocated child id");
    next
}

/// Next unused top-level identifier: the smallest free integer starting at 1.
pub fn next_root<D>(tree: &ZettelTree<D>) -> ZettelId {
    let root = ZettelId::root();
    let segment = first_free(&root, Segment::first(SegmentKind::Numeric), |candidate| {
        tree.contains(candidate)
    });
    let next = root.child(segment);
    debug!(next = %next, "allocated root id");
    next
}
