//! # Subtree Renumbering
//!
//! Moving a note means moving its whole subtree: the note and every descendant get new
//! identifiers under the new parent. [`Remapper`] computes that renumbering as a
//! [`Remap`], an old → new mapping covering the moved node and all of its descendants
//! (path nodes without notes included).
//!
//! ## Collision Rules
//!
//! A candidate collides when it already exists in the tree *outside* the moved
//! subtree. Identifiers inside the moved subtree are exempt: they are being replaced,
//! so reusing one of them is safe.
//!
//! ## Search
//!
//! For [`Remapper::remap_under_parent`]:
//! 1. The new root candidate starts at `1` or `a` under the target parent, following
//!    the alternation rule.
//! 2. If the candidate collides, it is incremented and the search restarts. A different
//!    root changes every descendant prefix, so nothing from a failed attempt is reused.
//! 3. Otherwise the descendants are numbered top-down in their current display order,
//!    each generation starting at `1` or `a` and skipping collisions.
//!
//! The number of root candidates is capped ([`DEFAULT_MAX_ATTEMPTS`]). The cap is a
//! safety valve against pathological collision density; hitting it produces
//! [`RemapError::Exhausted`], never a partial mapping.
//!
//! [`Remapper::remap_to_explicit_id`] uses a caller-chosen root and fails with
//! [`RemapError::Collision`] right away if that root is taken.
//!
//! ## Preconditions
//!
//! Callers reject moves onto the node itself or into its own descendants before asking
//! for a remap. The remapper does not re-check.
//!
//! ## Applying a Remap
//!
//! A remap is plain data. [`Remap::writes`] expands it into one pending write per
//! document; performing those writes is the host's job, and the tree must be rebuilt
//! afterwards.

use crate::allocator::{first_child_segment, first_free};
use crate::tree::{Node, ZettelTree};
use crate::zettel_id::ZettelId;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;
use tracing::debug;

/// Default ceiling on root candidates tried by [`Remapper::remap_under_parent`].
pub const DEFAULT_MAX_ATTEMPTS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemapError {
    #[error("identifier {id} is already in use")]
    Collision { id: ZettelId },

    #[error("could not find a free identifier under {parent} within {attempts} attempts")]
    Exhausted { parent: String, attempts: usize },

    #[error("the new identifier is empty")]
    EmptyIdentifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemapEntry {
    pub from: ZettelId,
    pub to: ZettelId,
}

/// Old → new identifier mapping for a moved subtree, in top-down display order.
/// The first entry is always the moved node itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Remap {
    entries: Vec<RemapEntry>,
}

/// A document whose identifier field must be rewritten.
#[derive(Debug)]
pub struct PendingWrite<'a, D> {
    pub document: &'a D,
    pub from: &'a ZettelId,
    pub to: &'a ZettelId,
}

impl Remap {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RemapEntry> {
        self.entries.iter()
    }

    /// The moved node's own entry.
    pub fn root_entry(&self) -> Option<&RemapEntry> {
        self.entries.first()
    }

    pub fn get(&self, from: &ZettelId) -> Option<&ZettelId> {
        self.entries.iter().find(|e| &e.from == from).map(|e| &e.to)
    }

    /// True when every identifier maps onto itself.
    pub fn is_identity(&self) -> bool {
        self.entries.iter().all(|e| e.from == e.to)
    }

    /// Rendered `old → new` pairs.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|e| (e.from.to_string(), e.to.to_string()))
            .collect()
    }

    /// One pending write per document in the mapped nodes. Path nodes contribute
    /// nothing.
    pub fn writes<'a, D>(&'a self, tree: &'a ZettelTree<D>) -> Vec<PendingWrite<'a, D>> {
        let mut out = Vec::new();
        for entry in &self.entries {
            let Some(node) = tree.get(&entry.from) else {
                continue;
            };
            out.extend(node.documents().iter().map(|document| PendingWrite {
                document,
                from: &entry.from,
                to: &entry.to,
            }));
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remapper {
    max_attempts: usize,
}

impl Default for Remapper {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl Remapper {
    pub fn new(max_attempts: usize) -> Self {
        Self { max_attempts }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Renumbers `source` and its subtree as a new child of `target_parent`.
    ///
    /// `target_parent` may be the root identifier, which makes the moved node a
    /// top-level note.
    pub fn remap_under_parent<D>(
        &self,
        tree: &ZettelTree<D>,
        source: &Node<D>,
        target_parent: &ZettelId,
    ) -> Result<Remap, RemapError> {
        let exempt = exempt_ids(tree, source);
        let collides = |id: &ZettelId| tree.contains(id) && !exempt.contains(id);

        let mut candidate = first_child_segment(target_parent.last());
        for attempt in 1..=self.max_attempts {
            let new_root = target_parent.child(candidate.clone());
            if !collides(&new_root) {
                debug!(
                    source = %source.zettel_id(),
                    new_root = %new_root,
                    attempt,
                    "root candidate accepted"
                );
                return Ok(assign(tree, source, new_root, &collides));
            }
            debug!(candidate = %new_root, attempt, "root candidate collides");
            candidate = candidate.increment();
        }

        Err(RemapError::Exhausted {
            parent: describe_parent(target_parent),
            attempts: self.max_attempts,
        })
    }

    /// Renumbers `source` and its subtree so that `source` becomes `desired`.
    pub fn remap_to_explicit_id<D>(
        &self,
        tree: &ZettelTree<D>,
        source: &Node<D>,
        desired: &ZettelId,
    ) -> Result<Remap, RemapError> {
        if desired.is_root() {
            return Err(RemapError::EmptyIdentifier);
        }
        let exempt = exempt_ids(tree, source);
        let collides = |id: &ZettelId| tree.contains(id) && !exempt.contains(id);

        if collides(desired) {
            return Err(RemapError::Collision {
                id: desired.clone(),
            });
        }
        Ok(assign(tree, source, desired.clone(), &collides))
    }
}

fn exempt_ids<D>(tree: &ZettelTree<D>, source: &Node<D>) -> HashSet<ZettelId> {
    tree.subtree_ids(source).into_iter().collect()
}

fn describe_parent(parent: &ZettelId) -> String {
    if parent.is_root() {
        "the top level".to_string()
    } else {
        format!("'{}'", parent)
    }
}

fn assign<D, F>(tree: &ZettelTree<D>, source: &Node<D>, new_root: ZettelId, collides: &F) -> Remap
where
    F: Fn(&ZettelId) -> bool,
{
    let mut entries = vec![RemapEntry {
        from: source.zettel_id().clone(),
        to: new_root.clone(),
    }];
    assign_children(tree, source, &new_root, collides, &mut entries);
    Remap { entries }
}

fn assign_children<D, F>(
    tree: &ZettelTree<D>,
    node: &Node<D>,
    new_parent: &ZettelId,
    collides: &F,
    entries: &mut Vec<RemapEntry>,
) where
    F: Fn(&ZettelId) -> bool,
{
    let mut next = first_child_segment(new_parent.last());
    for child in tree.children(node) {
        let segment = first_free(new_parent, next, collides);
        next = segment.increment();
        let new_id = new_parent.child(segment);
        entries.push(RemapEntry {
            from: child.zettel_id().clone(),
            to: new_id.clone(),
        });
        assign_children(tree, child, &new_id, collides, entries);
    }
}
