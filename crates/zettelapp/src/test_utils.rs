use crate::api::ZettelApi;
use crate::config::ZettelConfig;
use crate::frontmatter;
use crate::init::VAULT_DIR;
use crate::store::fs::VaultStore;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        fs::create_dir_all(root.join(VAULT_DIR)).expect("failed to create vault dir");
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Writes a note whose frontmatter carries `zettel_id`.
    pub fn note(&self, path: &str, zettel_id: &str) -> &Self {
        let content = frontmatter::set_property("", "zettel_id", zettel_id);
        self.file(path, &content)
    }

    pub fn file(&self, path: &str, content: &str) -> &Self {
        let full = self.root.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("failed to create note folder");
        }
        fs::write(full, content).expect("failed to write note");
        self
    }

    pub fn read(&self, path: impl AsRef<Path>) -> String {
        fs::read_to_string(self.root.join(path)).expect("failed to read note")
    }

    pub fn zettel_id_of(&self, path: impl AsRef<Path>) -> Option<String> {
        frontmatter::read_property(&self.read(path), "zettel_id").expect("bad frontmatter")
    }

    pub fn store(&self) -> VaultStore {
        VaultStore::new(self.root.clone())
    }

    pub fn api(&self) -> ZettelApi<VaultStore> {
        self.api_with(ZettelConfig::default())
    }

    pub fn api_with(&self, config: ZettelConfig) -> ZettelApi<VaultStore> {
        let store = VaultStore::new(self.root.clone()).with_id_property(config.id_property());
        ZettelApi::new(store, config)
    }
}
