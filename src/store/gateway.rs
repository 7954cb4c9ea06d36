//! Storage gateway
//!
//! One uniform store/retrieve surface over the three backends. Dispatch is a
//! match on [`BackendKind`]; the backends themselves are trait objects behind
//! [`ImageBackend`], constructed once from the injected config.

use image::DynamicImage;

use crate::config::GatewayConfig;
use crate::observability::{log_event, Event, Severity};

use super::backend::{BackendKind, ImageBackend};
use super::errors::StoreResult;
use super::file::FileBackend;
use super::memo::MemoBackend;
use super::prefs::PrefsBackend;

/// Uniform store/retrieve interface over the three backends
#[derive(Debug)]
pub struct StorageGateway {
    prefs: PrefsBackend,
    files: FileBackend,
    memos: MemoBackend,
}

impl StorageGateway {
    /// Build a gateway from explicit storage roots.
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            prefs: PrefsBackend::new(config.prefs_path()),
            files: FileBackend::new(config.images_dir()),
            memos: MemoBackend::new(config.memo_log_path()),
        }
    }

    fn backend(&self, kind: BackendKind) -> &dyn ImageBackend {
        match kind {
            BackendKind::Prefs => &self.prefs,
            BackendKind::FileSystem => &self.files,
            BackendKind::MemoDb => &self.memos,
        }
    }

    /// Persist an image under `key` through the selected backend.
    pub fn store(&self, image: &DynamicImage, key: &str, kind: BackendKind) -> StoreResult<()> {
        match self.backend(kind).store(key, image) {
            Ok(()) => {
                log_event(
                    Severity::Info,
                    Event::StoreCompleted,
                    &[("backend", kind.as_str()), ("key", key)],
                );
                Ok(())
            }
            Err(e) => {
                let detail = e.to_string();
                log_event(
                    Severity::Error,
                    Event::StoreFailed,
                    &[
                        ("backend", kind.as_str()),
                        ("key", key),
                        ("detail", detail.as_str()),
                    ],
                );
                Err(e)
            }
        }
    }

    /// Load the image stored under `key` from the selected backend.
    ///
    /// Absence is `StoreError::NotFound`, kept distinct from corrupt data
    /// (`DecodeFailed`) and I/O failure (`Io`).
    pub fn retrieve(&self, key: &str, kind: BackendKind) -> StoreResult<DynamicImage> {
        match self.backend(kind).retrieve(key) {
            Ok(image) => {
                log_event(
                    Severity::Info,
                    Event::RetrieveCompleted,
                    &[("backend", kind.as_str()), ("key", key)],
                );
                Ok(image)
            }
            Err(e) => {
                // NotFound is an expected outcome, not an operation failure
                let severity = if e.is_not_found() {
                    Severity::Warn
                } else {
                    Severity::Error
                };
                let detail = e.to_string();
                log_event(
                    severity,
                    Event::RetrieveFailed,
                    &[
                        ("backend", kind.as_str()),
                        ("key", key),
                        ("detail", detail.as_str()),
                    ],
                );
                Err(e)
            }
        }
    }

    /// Direct access to the memo backend, for log inspection.
    pub fn memo_backend(&self) -> &MemoBackend {
        &self.memos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::errors::StoreError;
    use image::{GenericImageView, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn sample_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([90, 90, 90, 255]),
        ))
    }

    fn gateway_in(temp: &TempDir) -> StorageGateway {
        StorageGateway::new(&GatewayConfig::new(temp.path()))
    }

    #[test]
    fn test_dispatch_reaches_each_backend() {
        let temp = TempDir::new().unwrap();
        let gateway = gateway_in(&temp);
        let image = sample_image(4, 4);

        for kind in [BackendKind::Prefs, BackendKind::FileSystem, BackendKind::MemoDb] {
            gateway.store(&image, "keyImage", kind).unwrap();
            let loaded = gateway.retrieve("keyImage", kind).unwrap();
            assert_eq!(loaded.dimensions(), (4, 4), "backend {}", kind);
        }
    }

    #[test]
    fn test_backends_do_not_leak_into_each_other() {
        let temp = TempDir::new().unwrap();
        let gateway = gateway_in(&temp);

        gateway
            .store(&sample_image(4, 4), "keyImage", BackendKind::FileSystem)
            .unwrap();

        let result = gateway.retrieve("keyImage", BackendKind::Prefs);
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }
}
