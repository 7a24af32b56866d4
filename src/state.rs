use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::files::FileStorage;
use crate::store::{JsonFileStore, MetadataStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn MetadataStore>,
    pub files: Arc<FileStorage>,
}

impl AppState {
    /// Create data directories and an empty metadata document if needed.
    pub fn new(config: Config) -> Result<Self> {
        let store = JsonFileStore::new(config.metadata_path());
        Self::with_store(config, Arc::new(store))
    }

    /// Use an explicit metadata backend, e.g. [`crate::store::MemoryStore`].
    pub fn with_store(config: Config, store: Arc<dyn MetadataStore>) -> Result<Self> {
        let files = FileStorage::from_config(&config);
        files.initialize()?;
        store.initialize()?;

        Ok(Self {
            config,
            store,
            files: Arc::new(files),
        })
    }
}
