use crate::models::UploadRecord;

/// Most recent upload first.
pub fn by_recency(records: &[UploadRecord]) -> Vec<UploadRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
    sorted
}
