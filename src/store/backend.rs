//! # Backend Trait and Selector

use image::DynamicImage;

use super::errors::StoreResult;

/// Backend trait for image persistence
pub trait ImageBackend: Send + Sync + std::fmt::Debug {
    /// Persist an image under a key
    fn store(&self, key: &str, image: &DynamicImage) -> StoreResult<()>;

    /// Load the image stored under a key
    fn retrieve(&self, key: &str) -> StoreResult<DynamicImage>;
}

/// Which concrete backend a gateway call targets.
///
/// Chosen per call by the caller; the selection itself is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// JSON key-value preference map
    Prefs,
    /// One PNG file per key under the images directory
    FileSystem,
    /// Append-only memo record log
    MemoDb,
}

impl BackendKind {
    /// Stable name used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Prefs => "prefs",
            BackendKind::FileSystem => "file_system",
            BackendKind::MemoDb => "memo_db",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
