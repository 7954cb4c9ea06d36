//! snapkeep - multi-backend image persistence
//!
//! Persist an in-memory image through one of three interchangeable storage
//! backends (a key-value preference map, flat PNG files, or an embedded
//! append-only memo log) and load it back. The backend is selected per call;
//! all failure modes are distinguishable through [`StoreError`].
//!
//! ```no_run
//! use image::DynamicImage;
//! use snapkeep::{BackendKind, GatewayConfig, StorageGateway};
//!
//! # fn demo(picked: DynamicImage) -> snapkeep::StoreResult<()> {
//! let config = GatewayConfig::new("./snapkeep-data");
//! let gateway = StorageGateway::new(&config);
//!
//! gateway.store(&picked, "keyImage", BackendKind::FileSystem)?;
//! let loaded = gateway.retrieve("keyImage", BackendKind::FileSystem)?;
//! # let _ = loaded;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod observability;
pub mod store;

pub use config::GatewayConfig;
pub use store::{
    BackendKind, FileBackend, ImageBackend, MemoBackend, PrefsBackend, StorageGateway, StoreError,
    StoreResult,
};
