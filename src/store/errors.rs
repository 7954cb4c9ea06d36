//! # Storage Errors
//!
//! Every backend operation returns `StoreResult`. The original behavior this
//! crate models swallowed all failures; here they are kept distinguishable:
//! absence, bad key, codec failure, and I/O failure are separate variants.

use thiserror::Error;

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("No image stored under key: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Image encode failed: {0}")]
    EncodeFailed(String),

    #[error("Image decode failed: {0}")]
    DecodeFailed(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl StoreError {
    /// Whether this error means "nothing stored" as opposed to a real failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(StoreError::NotFound("keyImage".into()).is_not_found());
        assert!(!StoreError::DecodeFailed("truncated".into()).is_not_found());
        assert!(!StoreError::Io("disk".into()).is_not_found());
    }

    #[test]
    fn test_display_includes_key() {
        let err = StoreError::NotFound("keyImage".into());
        assert!(err.to_string().contains("keyImage"));
    }
}
