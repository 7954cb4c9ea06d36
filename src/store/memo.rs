//! Memo log backend
//!
//! An embedded append-only record store. Every `store` appends a new
//! [`MemoRecord`] with a fixed label; nothing is ever updated in place or
//! deleted. The file handle is acquired and released around each operation,
//! and appends are fsynced before returning.
//!
//! Known modeled defect, kept deliberately for behavior parity: the key is
//! accepted and ignored on both paths. Writes always append, and reads always
//! return the FIRST record in file order, regardless of how many records
//! exist or what key the caller asked for.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use image::DynamicImage;

use super::backend::ImageBackend;
use super::codec;
use super::errors::{StoreError, StoreResult};
use super::record::MemoRecord;

/// Label written into every appended record
pub const MEMO_LABEL: &str = "memoPlus";

/// Append-only memo log backend
#[derive(Debug)]
pub struct MemoBackend {
    log_path: PathBuf,
}

impl MemoBackend {
    /// Create a backend over the log file at `log_path`.
    ///
    /// The file is created lazily on first append.
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Appends a record to the log with fsync enforcement.
    fn append(&self, record: &MemoRecord) -> StoreResult<()> {
        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| StoreError::Io(e.to_string()))?;

        file.write_all(&record.serialize())
            .map_err(|e| StoreError::Io(e.to_string()))?;

        // fsync - the single-record append must be durable before returning
        file.sync_all().map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(())
    }

    /// Returns the first record in file order, verifying its checksum.
    ///
    /// `Ok(None)` means the log does not exist yet or is empty.
    fn first_record(&self) -> StoreResult<Option<MemoRecord>> {
        let log = match fs::read(&self.log_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };
        if log.is_empty() {
            return Ok(None);
        }

        let (record, _) = MemoRecord::deserialize(&log)
            .map_err(|e| StoreError::DecodeFailed(e.to_string()))?;
        Ok(Some(record))
    }

    /// Number of records currently in the log.
    ///
    /// Scans the whole file; checksum failures abort the count.
    pub fn record_count(&self) -> StoreResult<usize> {
        let log = match fs::read(&self.log_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };

        let mut count = 0;
        let mut offset = 0;
        while offset < log.len() {
            let (_, consumed) = MemoRecord::deserialize(&log[offset..])
                .map_err(|e| StoreError::DecodeFailed(e.to_string()))?;
            offset += consumed;
            count += 1;
        }
        Ok(count)
    }
}

impl ImageBackend for MemoBackend {
    fn store(&self, _key: &str, image: &DynamicImage) -> StoreResult<()> {
        let jpeg = codec::encode_jpeg(image)?;
        let record = MemoRecord::new(MEMO_LABEL, Some(jpeg));
        self.append(&record)
    }

    fn retrieve(&self, key: &str) -> StoreResult<DynamicImage> {
        // First record wins; the key only labels the NotFound error.
        let record = self
            .first_record()?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        let bytes = record
            .memo_image
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        codec::decode(&bytes)
    }
}
