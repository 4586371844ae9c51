//! In-process record store standing in for the HTTP backend.

use crate::kernel::services::ports::{RemoteError, RemoteFileService, RemoteFuture, RemoteResult};
use crate::models::{FileRecord, RecordId, RecordPatch};
use serde::Deserialize;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// json-server `db.json` layout.
#[derive(Debug, Deserialize)]
struct DbDocument {
    #[serde(default)]
    files: Vec<FileRecord>,
}

#[derive(Default)]
pub struct MemoryFileService {
    records: Mutex<Vec<FileRecord>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryFileService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<FileRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub fn from_db_json(path: &Path) -> std::io::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let doc: DbDocument = serde_json::from_str(&data)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(Self::with_records(doc.files))
    }

    /// Makes subsequent `list` calls fail, simulating an unreachable backend.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Vec<FileRecord> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<FileRecord>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_writes(&self) -> RemoteResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RemoteError::Transport("connection refused".to_string()));
        }
        Ok(())
    }
}

impl RemoteFileService for MemoryFileService {
    fn list(&self) -> RemoteFuture<'_, Vec<FileRecord>> {
        Box::pin(async move {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(RemoteError::Transport("connection refused".to_string()));
            }
            Ok(self.snapshot())
        })
    }

    fn create(&self, record: FileRecord) -> RemoteFuture<'_, FileRecord> {
        Box::pin(async move {
            self.check_writes()?;
            let mut records = self.lock();
            if records.iter().any(|r| r.id == record.id) {
                return Err(RemoteError::Status {
                    status: 409,
                    url: format!("memory:/files/{}", record.id),
                });
            }
            records.push(record.clone());
            Ok(record)
        })
    }

    fn update(&self, id: RecordId, patch: RecordPatch) -> RemoteFuture<'_, FileRecord> {
        Box::pin(async move {
            self.check_writes()?;
            let mut records = self.lock();
            let record = records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| RemoteError::NotFound(id.clone()))?;
            patch.apply_to(record);
            Ok(record.clone())
        })
    }

    fn describe(&self) -> String {
        "offline".to_string()
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/memory.rs"]
mod tests;
