use parking_lot::RwLock;

use super::{validate_all, MetadataStore};
use crate::error::Result;
use crate::models::UploadRecord;

/// In-memory store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<UploadRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<UploadRecord>) -> Result<Self> {
        validate_all(&records)?;
        Ok(Self {
            records: RwLock::new(records),
        })
    }
}

impl MetadataStore for MemoryStore {
    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn insert(&self, record: UploadRecord) -> Result<UploadRecord> {
        record.validate()?;
        self.records.write().push(record.clone());
        Ok(record)
    }

    fn read_all(&self) -> Result<Vec<UploadRecord>> {
        Ok(self.records.read().clone())
    }

    fn replace_all(&self, records: &[UploadRecord]) -> Result<()> {
        validate_all(records)?;
        *self.records.write() = records.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;

    #[test]
    fn test_memory_store_appends_in_order() {
        let store = MemoryStore::new();
        let a = UploadRecord::new("a.jpg", Coordinates::new(1.0, 1.0).unwrap());
        let b = UploadRecord::new("b.jpg", Coordinates::new(2.0, 2.0).unwrap());
        store.insert(a.clone()).unwrap();
        store.insert(b.clone()).unwrap();

        assert_eq!(store.read_all().unwrap(), vec![a, b]);
    }

    #[test]
    fn test_memory_store_rejects_invalid_seed() {
        let mut bad = UploadRecord::new("a.jpg", Coordinates::new(1.0, 1.0).unwrap());
        bad.latitude = 91.0;
        assert!(MemoryStore::with_records(vec![bad]).is_err());
    }
}
