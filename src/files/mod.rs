//! On-disk storage for uploaded image bytes.

pub mod naming;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};

pub use naming::content_type_for;

/// A successfully written image
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub file_name: String,
    pub path: PathBuf,
}

pub struct FileStorage {
    dir: PathBuf,
    max_bytes: usize,
    allowed_content_types: Vec<String>,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: usize, allowed_content_types: Vec<String>) -> Self {
        Self {
            dir: dir.into(),
            max_bytes,
            allowed_content_types,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.uploads_dir(),
            config.max_upload_bytes,
            config.allowed_content_types.clone(),
        )
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| Error::store_write(&self.dir, e))
    }

    /// Reject payloads with a disallowed type or size. Nothing is written.
    pub fn check(&self, content_type: Option<&str>, len: usize) -> Result<()> {
        let mime = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase())
            .unwrap_or_default();
        if !self.allowed_content_types.iter().any(|t| *t == mime) {
            return Err(Error::validation(
                "photo",
                format!(
                    "invalid file type '{mime}', allowed: {}",
                    self.allowed_content_types.join(", ")
                ),
            ));
        }
        if len == 0 {
            return Err(Error::validation("photo", "file is empty"));
        }
        if len > self.max_bytes {
            return Err(Error::validation(
                "photo",
                format!("file is {len} bytes, limit is {}", self.max_bytes),
            ));
        }
        Ok(())
    }

    /// Validate and write `bytes` under a fresh unique name.
    pub fn save(
        &self,
        original_name: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<StoredFile> {
        self.check(content_type, bytes.len())?;

        let file_name = naming::unique_name(original_name);
        let path = self.dir.join(&file_name);
        let written = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .and_then(|mut file| {
                file.write_all(bytes)?;
                file.sync_all()
            });
        if let Err(e) = written {
            let _ = fs::remove_file(&path);
            return Err(Error::store_write(path, e));
        }

        tracing::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(StoredFile { file_name, path })
    }

    /// Undo a `save` whose metadata could not be recorded.
    pub fn discard(&self, stored: &StoredFile) {
        if let Err(e) = fs::remove_file(&stored.path) {
            tracing::warn!("Failed to remove orphaned upload {}: {e}", stored.path.display());
        }
    }

    /// Path of a stored image, if `name` refers to one.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        if !naming::is_plain_name(name) {
            return Err(Error::NotFound(name.to_string()));
        }
        let path = self.dir.join(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(Error::NotFound(name.to_string()))
        }
    }
}
