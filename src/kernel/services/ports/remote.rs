//! Remote file service contract.

use crate::models::{FileRecord, RecordId, RecordPatch};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

pub type RemoteFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

pub type Result<T> = std::result::Result<T, RemoteError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("no record with id {0}")]
    NotFound(RecordId),
}

/// Backend persisting the record list.
///
/// `create` and `update` resolve to the record as the backend stored it.
pub trait RemoteFileService: Send + Sync {
    fn list(&self) -> RemoteFuture<'_, Vec<FileRecord>>;

    fn create(&self, record: FileRecord) -> RemoteFuture<'_, FileRecord>;

    fn update(&self, id: RecordId, patch: RecordPatch) -> RemoteFuture<'_, FileRecord>;

    /// Short label for the status line, e.g. the base URL.
    fn describe(&self) -> String;
}
