//! Durable, ordered persistence of [`UploadRecord`]s.
//!
//! The store knows nothing about presentation order: it returns records in
//! insertion order and leaves ranking to [`crate::ranking`].

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::models::UploadRecord;

/// Backing resource for upload metadata.
///
/// Every write is all-or-nothing: a failed `insert` or `replace_all` leaves
/// the previously persisted sequence untouched.
pub trait MetadataStore: Send + Sync {
    /// Create the backing resource with an empty sequence if it is absent.
    /// Safe to call on every start.
    fn initialize(&self) -> Result<()>;

    /// Validate, append, and persist one record. Returns it unchanged.
    fn insert(&self, record: UploadRecord) -> Result<UploadRecord>;

    /// Every stored record in insertion order.
    fn read_all(&self) -> Result<Vec<UploadRecord>>;

    /// Replace the whole sequence in one write.
    fn replace_all(&self, records: &[UploadRecord]) -> Result<()>;
}

pub(crate) fn validate_all(records: &[UploadRecord]) -> Result<()> {
    records.iter().try_for_each(UploadRecord::validate)
}
