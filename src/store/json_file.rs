use parking_lot::Mutex;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{validate_all, MetadataStore};
use crate::error::{Error, Result};
use crate::models::UploadRecord;

/// Metadata store backed by a single pretty-printed JSON array.
///
/// Each insert reads the whole document, appends, and rewrites it through a
/// temp file + rename, so a crash mid-write never leaves a half-written array.
/// Writers within this process are serialized; separate processes sharing the
/// same file can still lose updates.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Open the store at `path`, creating an empty document if needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(path);
        store.initialize()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn load(&self) -> Result<Vec<UploadRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path).map_err(|e| Error::store_read(&self.path, e))?;
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&data).map_err(|e| Error::store_read(&self.path, e))
    }

    fn persist(&self, records: &[UploadRecord]) -> Result<()> {
        let data =
            serde_json::to_string_pretty(records).map_err(|e| Error::store_write(&self.path, e))?;
        let tmp_path = self.tmp_path();

        let written = write_synced(&tmp_path, data.as_bytes())
            .and_then(|()| fs::rename(&tmp_path, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(Error::store_write(&self.path, e));
        }
        Ok(())
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

impl MetadataStore for JsonFileStore {
    fn initialize(&self) -> Result<()> {
        let _guard = self.write_lock.lock();
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::store_write(&self.path, e))?;
        }
        if self.path.exists() {
            return Ok(());
        }
        tracing::info!("Creating empty metadata store at {}", self.path.display());
        self.persist(&[])
    }

    fn insert(&self, record: UploadRecord) -> Result<UploadRecord> {
        record.validate()?;

        let _guard = self.write_lock.lock();
        let mut records = self.load()?;
        records.push(record.clone());
        self.persist(&records)?;

        tracing::debug!(
            "Stored metadata for {} ({} records)",
            record.file_name,
            records.len()
        );
        Ok(record)
    }

    fn read_all(&self) -> Result<Vec<UploadRecord>> {
        self.load()
    }

    fn replace_all(&self, records: &[UploadRecord]) -> Result<()> {
        validate_all(records)?;

        let _guard = self.write_lock.lock();
        self.persist(records)
    }
}
