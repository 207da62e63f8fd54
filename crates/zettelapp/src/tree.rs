//! # The Zettel Tree
//!
//! [`ZettelTree`] turns a flat list of `(identifier, document)` pairs into the hierarchy
//! the user navigates. The node set is exactly the set of all prefixes of the supplied
//! identifiers: a note at `1.a.2` implies the path nodes `1` and `1.a` even when no note
//! carries those identifiers.
//!
//! ## Representation
//!
//! Nodes live in an arena (`Vec<Node<D>>`) and refer to each other through [`NodeKey`]s.
//! Each node keeps its children as an explicit ordered sequence, sorted once after all
//! entries are inserted, so display order never depends on map iteration order.
//!
//! Alongside the arena the tree keeps an identifier → node index. Its key set doubles
//! as the existing-identifier set used for collision checks by the allocator and the
//! remapper.
//!
//! ## Lifecycle
//!
//! A tree is an immutable snapshot. There is no incremental update: whenever the notes
//! change, the caller builds a new tree (see [`crate::snapshot::TreeCache`]).
//!
//! ## Documents
//!
//! `D` is an opaque document handle supplied by the caller. Entries without an
//! identifier (or with one that parses to zero segments) are left out; they belong to
//! the "unfiled" collection the host exposes separately. Several documents may share
//! an identifier; they are all kept, in input order.

use crate::zettel_id::{Segment, SortOrder, ZettelId};
use std::collections::HashMap;
use tracing::debug;

/// Handle to a node inside one particular [`ZettelTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey(usize);

const ROOT: NodeKey = NodeKey(0);

#[derive(Debug, Clone)]
pub struct Node<D> {
    key: NodeKey,
    id: String,
    zettel_id: ZettelId,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
    documents: Vec<D>,
}

impl<D> Node<D> {
    fn new(key: NodeKey, zettel_id: ZettelId, parent: Option<NodeKey>) -> Self {
        Self {
            key,
            id: zettel_id.to_string(),
            zettel_id,
            parent,
            children: Vec::new(),
            documents: Vec::new(),
        }
    }

    pub fn key(&self) -> NodeKey {
        self.key
    }

    /// Canonical rendered identifier; empty for the root.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn zettel_id(&self) -> &ZettelId {
        &self.zettel_id
    }

    pub fn segments(&self) -> &[Segment] {
        self.zettel_id.segments()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Documents assigned exactly this identifier, in input order.
    pub fn documents(&self) -> &[D] {
        &self.documents
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

#[derive(Debug, Clone)]
pub struct ZettelTree<D> {
    nodes: Vec<Node<D>>,
    index: HashMap<ZettelId, NodeKey>,
    order: SortOrder,
}

impl<D> ZettelTree<D> {
    /// Builds a tree from `(identifier, document)` pairs.
    ///
    /// Never rejects an identifier: malformed input parses to whatever segments it
    /// contains and lands at that position.
    pub fn build<I, S>(entries: I, order: SortOrder) -> Self
    where
        I: IntoIterator<Item = (Option<S>, D)>,
        S: AsRef<str>,
    {
        let mut tree = Self {
            nodes: vec![Node::new(ROOT, ZettelId::root(), None)],
            index: HashMap::new(),
            order,
        };

        let mut filed = 0usize;
        let mut unfiled = 0usize;
        for (raw, document) in entries {
            let zettel_id = match raw {
                Some(raw) => ZettelId::parse(raw.as_ref()),
                None => ZettelId::root(),
            };
            if zettel_id.is_root() {
                unfiled += 1;
                continue;
            }

            let mut parent = ROOT;
            for prefix in zettel_id.prefixes() {
                parent = match tree.index.get(&prefix) {
                    Some(&key) => key,
                    None => tree.insert(parent, prefix),
                };
            }
            tree.nodes[parent.0].documents.push(document);
            filed += 1;
        }

        tree.sort_children();
        debug!(
            nodes = tree.len(),
            documents = filed,
            unfiled,
            ?order,
            "built zettel tree"
        );
        tree
    }

    fn insert(&mut self, parent: NodeKey, zettel_id: ZettelId) -> NodeKey {
        let key = NodeKey(self.nodes.len());
        self.index.insert(zettel_id.clone(), key);
        self.nodes.push(Node::new(key, zettel_id, Some(parent)));
        self.nodes[parent.0].children.push(key);
        key
    }

    fn sort_children(&mut self) {
        let order = self.order;
        for i in 0..self.nodes.len() {
            let mut children = std::mem::take(&mut self.nodes[i].children);
            children.sort_by(|a, b| {
                order.apply(self.nodes[a.0].zettel_id.cmp(&self.nodes[b.0].zettel_id))
            });
            self.nodes[i].children = children;
        }
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// The implicit root. It has no identifier and never holds documents.
    pub fn root(&self) -> &Node<D> {
        &self.nodes[ROOT.0]
    }

    /// Resolves a key obtained from this tree.
    pub fn node(&self, key: NodeKey) -> &Node<D> {
        &self.nodes[key.0]
    }

    pub fn get(&self, zettel_id: &ZettelId) -> Option<&Node<D>> {
        self.index.get(zettel_id).map(|&key| self.node(key))
    }

    pub fn get_str(&self, zettel_id: &str) -> Option<&Node<D>> {
        self.get(&ZettelId::parse(zettel_id))
    }

    /// Membership in the existing-identifier set.
    pub fn contains(&self, zettel_id: &ZettelId) -> bool {
        self.index.contains_key(zettel_id)
    }

    /// Every identifier in the tree (root excluded), in no particular order.
    pub fn existing_ids(&self) -> impl Iterator<Item = &ZettelId> {
        self.index.keys()
    }

    /// Number of nodes, root excluded.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn document_count(&self) -> usize {
        self.nodes.iter().map(|n| n.documents.len()).sum()
    }

    /// Children of `node` in display order.
    pub fn children<'a>(&'a self, node: &'a Node<D>) -> impl Iterator<Item = &'a Node<D>> + 'a {
        node.children.iter().map(move |&key| self.node(key))
    }

    pub fn parent(&self, node: &Node<D>) -> Option<&Node<D>> {
        node.parent.map(|key| self.node(key))
    }

    /// `node` followed by all of its descendants, pre-order, display order.
    pub fn subtree<'a>(&'a self, node: &'a Node<D>) -> Vec<&'a Node<D>> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(current.children.iter().rev().map(|&key| self.node(key)));
        }
        out
    }

    /// Identifiers of `node` and all of its descendants.
    pub fn subtree_ids(&self, node: &Node<D>) -> Vec<ZettelId> {
        self.subtree(node)
            .into_iter()
            .filter(|n| !n.is_root())
            .map(|n| n.zettel_id.clone())
            .collect()
    }

    /// All non-root nodes, pre-order, display order.
    pub fn iter(&self) -> impl Iterator<Item = &Node<D>> {
        self.subtree(self.root()).into_iter().skip(1)
    }

    /// Nodes that have at least one child, pre-order.
    pub fn nodes_with_children(&self) -> Vec<&Node<D>> {
        self.iter().filter(|n| n.has_children()).collect()
    }

    /// Depth of a node; top-level identifiers have depth 1.
    pub fn depth(&self, node: &Node<D>) -> usize {
        node.zettel_id.len()
    }
}
