//! File store error types

use presetflow_core::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileStoreError {
    #[error("Store file error: {0}")]
    Format(String),

    #[error("Lock acquisition failed: {0}")]
    Lock(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<FileStoreError> for StoreError {
    fn from(err: FileStoreError) -> Self {
        match err {
            FileStoreError::Store(inner) => inner,
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, FileStoreError>;
