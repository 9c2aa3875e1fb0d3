//! プリセット関連のエラー型

use crate::store::StoreError;
use thiserror::Error;

/// プリセットの解決・バインド・マニフェストのパースで返されるエラー
#[derive(Error, Debug)]
pub enum PresetError {
    /// プリセットが存在しない、または呼び出し元から見えない
    /// （両者は同じ表示になる）
    #[error("preset.kubermatic.k8c.io \"{0}\" not found")]
    NotFound(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("KDL parse error: {0}")]
    KdlParse(#[from] kdl::KdlError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid manifest: {0}")]
    InvalidConfig(String),
}

impl PresetError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, PresetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = PresetError::NotFound("test-2".to_string());
        assert_eq!(err.to_string(), "preset.kubermatic.k8c.io \"test-2\" not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_store_error_passes_through() {
        let err: PresetError = StoreError::Unavailable("connection refused".to_string()).into();
        assert_eq!(err.to_string(), "preset store unavailable: connection refused");
        assert!(!err.is_not_found());
    }
}
