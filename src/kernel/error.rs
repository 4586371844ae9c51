use crate::models::RecordId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("failed to load files: {0}")]
    RemoteRead(String),
    #[error("failed to save to remote: {0}")]
    RemoteWrite(String),
    #[error("no record with id {0}")]
    NotFoundLocal(RecordId),
    #[error("name must not be empty")]
    InvalidName,
}

