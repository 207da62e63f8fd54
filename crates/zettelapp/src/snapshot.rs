//! Owned, versioned tree snapshot.
//!
//! The host keeps one [`TreeCache`] and calls [`TreeCache::invalidate`] whenever notes
//! change (an identifier edited, a note added, removed or renamed, a remap applied).
//! The next [`TreeCache::get_or_build`] rebuilds from the host's current data. There is
//! no incremental update and no shared mutable state.

use crate::tree::ZettelTree;
use tracing::trace;

#[derive(Debug)]
pub struct TreeCache<D> {
    tree: Option<ZettelTree<D>>,
    dirty: bool,
    generation: u64,
}

impl<D> Default for TreeCache<D> {
    fn default() -> Self {
        Self {
            tree: None,
            dirty: true,
            generation: 0,
        }
    }
}

impl<D> TreeCache<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the snapshot stale. The tree is dropped lazily on the next access.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty || self.tree.is_none()
    }

    /// Number of builds performed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the current tree, rebuilding with `build` first if stale.
    pub fn get_or_build<F>(&mut self, build: F) -> &ZettelTree<D>
    where
        F: FnOnce() -> ZettelTree<D>,
    {
        self.try_get_or_build(|| Ok::<_, std::convert::Infallible>(build()))
            .unwrap_or_else(|never| match never {})
    }

    /// Fallible variant of [`TreeCache::get_or_build`]. On error the cache stays dirty.
    pub fn try_get_or_build<F, E>(&mut self, build: F) -> Result<&ZettelTree<D>, E>
    where
        F: FnOnce() -> Result<ZettelTree<D>, E>,
    {
        let tree = match self.tree.take() {
            Some(tree) if !self.dirty => tree,
            _ => {
                let tree = build()?;
                self.generation += 1;
                trace!(generation = self.generation, "rebuilt tree snapshot");
                tree
            }
        };
        self.dirty = false;
        let tree: &ZettelTree<D> = self.tree.insert(tree);
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zettel_id::SortOrder;
    use std::cell::Cell;

    fn build(ids: &[&str]) -> ZettelTree<()> {
        ZettelTree::build(ids.iter().map(|id| (Some(*id), ())), SortOrder::Ascending)
    }

    #[test]
    fn test_builds_once_until_invalidated() {
        let builds = Cell::new(0);
        let mut cache = TreeCache::new();

        for _ in 0..3 {
            let tree = cache.get_or_build(|| {
                builds.set(builds.get() + 1);
                build(&["1"])
            });
            assert_eq!(tree.len(), 1);
        }
        assert_eq!(builds.get(), 1);
        assert_eq!(cache.generation(), 1);

        cache.invalidate();
        assert!(cache.is_dirty());
        let tree = cache.get_or_build(|| build(&["1", "2"]));
        assert_eq!(tree.len(), 2);
        assert_eq!(cache.generation(), 2);
    }

    #[test]
    fn test_failed_build_keeps_cache_dirty() {
        let mut cache: TreeCache<()> = TreeCache::new();
        let result = cache.try_get_or_build(|| Err::<ZettelTree<()>, _>("boom"));
        assert_eq!(result.err(), Some("boom"));
        assert!(cache.is_dirty());
        assert_eq!(cache.generation(), 0);
    }
}
