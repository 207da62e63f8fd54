//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as the single
//! entry point for all zettel operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the store, the configuration and the [`TreeCache`]
//! - **Builds** the tree lazily and hands it to commands
//! - **Invalidates** the cache after every operation that may have written
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or file formatting
//!
//! ## Generic Over NoteStore
//!
//! `ZettelApi<S: NoteStore>` is generic over the storage backend:
//! - Production: `ZettelApi<VaultStore>`
//! - Testing: `ZettelApi<InMemoryStore>`
//!
//! ## Testing Strategy
//!
//! API tests verify dispatch and cache behaviour. Command logic is tested in the
//! command modules.

use crate::commands::{self, helpers::build_tree};
use crate::config::ZettelConfig;
use crate::error::Result;
use crate::model::Note;
use crate::snapshot::TreeCache;
use crate::store::NoteStore;
use crate::tree::ZettelTree;
use crate::zettel_id::SortOrder;
use std::path::Path;

/// The main API facade for zettel operations.
pub struct ZettelApi<S: NoteStore> {
    store: S,
    config: ZettelConfig,
    cache: TreeCache<Note>,
}

impl<S: NoteStore> ZettelApi<S> {
    pub fn new(store: S, config: ZettelConfig) -> Self {
        Self {
            store,
            config,
            cache: TreeCache::new(),
        }
    }

    pub fn config(&self) -> &ZettelConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Overrides the configured sibling order for this session.
    pub fn set_sort_order(&mut self, order: SortOrder) {
        if self.config.sort_order != order {
            self.config.sort_order = order;
            self.cache.invalidate();
        }
    }

    /// Drops the cached tree; the next call rebuilds it from the store.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    pub fn tree_generation(&self) -> u64 {
        self.cache.generation()
    }

    /// The current tree, rebuilt from the store when stale.
    pub fn tree(&mut self) -> Result<&ZettelTree<Note>> {
        let (store, config) = (&self.store, &self.config);
        self.cache.try_get_or_build(|| build_tree(store, config))
    }

    pub fn list_tree(&mut self) -> Result<commands::CmdResult> {
        commands::tree::run(self.tree()?)
    }

    pub fn unfiled(&self) -> Result<commands::CmdResult> {
        commands::unfiled::run(&self.store, &self.config)
    }

    pub fn next_id(&mut self, parent: Option<&str>) -> Result<commands::CmdResult> {
        commands::next::run(self.tree()?, parent)
    }

    pub fn create_note(
        &mut self,
        parent: Option<&str>,
        title: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let tree = self
            .cache
            .try_get_or_build(|| build_tree(&self.store, &self.config))?;
        let result = commands::create::run(&mut self.store, tree, &self.config, parent, title);
        self.cache.invalidate();
        result
    }

    /// Creates the first note for an existing path node.
    pub fn create_note_at(
        &mut self,
        zettel_id: &str,
        title: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let tree = self
            .cache
            .try_get_or_build(|| build_tree(&self.store, &self.config))?;
        let result =
            commands::create::run_at(&mut self.store, tree, &self.config, zettel_id, title);
        self.cache.invalidate();
        result
    }

    pub fn delete(&mut self, source: &str, dry_run: bool) -> Result<commands::CmdResult> {
        let tree = self
            .cache
            .try_get_or_build(|| build_tree(&self.store, &self.config))?;
        let result = commands::delete::run(&mut self.store, tree, source, dry_run);
        if !dry_run {
            self.cache.invalidate();
        }
        result
    }

    pub fn rename(&mut self, path: &Path, title: &str) -> Result<commands::CmdResult> {
        let result = commands::rename::run(&mut self.store, path, title);
        self.cache.invalidate();
        result
    }

    pub fn move_note(
        &mut self,
        source: &str,
        target: Option<&str>,
        dry_run: bool,
    ) -> Result<commands::CmdResult> {
        let remapper = self.config.remapper();
        let tree = self
            .cache
            .try_get_or_build(|| build_tree(&self.store, &self.config))?;
        let result =
            commands::move_note::run(&mut self.store, tree, &remapper, source, target, dry_run);
        if !dry_run {
            self.cache.invalidate();
        }
        result
    }

    pub fn renumber(
        &mut self,
        source: &str,
        new_id: &str,
        dry_run: bool,
    ) -> Result<commands::CmdResult> {
        let remapper = self.config.remapper();
        let tree = self
            .cache
            .try_get_or_build(|| build_tree(&self.store, &self.config))?;
        let result =
            commands::renumber::run(&mut self.store, tree, &remapper, source, new_id, dry_run);
        if !dry_run {
            self.cache.invalidate();
        }
        result
    }

    pub fn set_id(&mut self, path: &Path, zettel_id: &str) -> Result<commands::CmdResult> {
        let tree = self
            .cache
            .try_get_or_build(|| build_tree(&self.store, &self.config))?;
        let result = commands::set_id::run(&mut self.store, tree, path, zettel_id);
        self.cache.invalidate();
        result
    }
}
