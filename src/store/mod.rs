//! # Image storage subsystem
//!
//! One gateway, three interchangeable backends:
//!
//! - [`PrefsBackend`] — JSON key-value preference map, values base64 PNG
//! - [`FileBackend`] — one PNG file per key, atomic replace
//! - [`MemoBackend`] — append-only checksummed record log, JPEG payloads
//!
//! # Semantics worth knowing
//!
//! - Prefs and file backends are key-scoped and overwrite in place.
//! - The memo backend ignores the key on both paths: stores always append,
//!   retrieves always return the first record in file order. This mirrors the
//!   behavior being modeled and is kept on purpose; see the module docs in
//!   [`memo`].
//! - Absence, bad keys, codec failures, and I/O failures are distinct
//!   [`StoreError`] variants.

pub mod backend;
pub mod checksum;
pub mod codec;
pub mod errors;
pub mod file;
pub mod gateway;
pub mod memo;
pub mod prefs;
pub mod record;

pub use backend::{BackendKind, ImageBackend};
pub use errors::{StoreError, StoreResult};
pub use file::FileBackend;
pub use gateway::StorageGateway;
pub use memo::{MemoBackend, MEMO_LABEL};
pub use prefs::PrefsBackend;
pub use record::MemoRecord;
