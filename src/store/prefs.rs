//! Preference map backend
//!
//! A JSON key-value file standing in for a platform defaults store. Values
//! are base64-encoded PNG bytes. The whole map is loaded and rewritten per
//! operation, so repeated stores under the same key overwrite in place.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::DynamicImage;

use super::backend::ImageBackend;
use super::codec;
use super::errors::{StoreError, StoreResult};

/// Preference map backend
#[derive(Debug)]
pub struct PrefsBackend {
    prefs_path: PathBuf,
}

impl PrefsBackend {
    /// Create a backend over the map file at `prefs_path`.
    ///
    /// The file is created on first store.
    pub fn new(prefs_path: PathBuf) -> Self {
        Self { prefs_path }
    }

    /// Loads the preference map, or an empty map if the file is absent.
    ///
    /// BTreeMap keeps the on-disk key order deterministic.
    fn load_map(&self) -> StoreResult<BTreeMap<String, String>> {
        let contents = match fs::read(&self.prefs_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };

        serde_json::from_slice(&contents).map_err(|e| StoreError::DecodeFailed(e.to_string()))
    }

    /// Writes the map back atomically (temp file + rename).
    fn save_map(&self, map: &BTreeMap<String, String>) -> StoreResult<()> {
        if let Some(parent) = self.prefs_path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let json =
            serde_json::to_vec_pretty(map).map_err(|e| StoreError::EncodeFailed(e.to_string()))?;

        let tmp_path = self.prefs_path.with_extension("json.tmp");
        fs::write(&tmp_path, &json).map_err(|e| StoreError::Io(e.to_string()))?;
        fs::rename(&tmp_path, &self.prefs_path).map_err(|e| StoreError::Io(e.to_string()))
    }
}

impl ImageBackend for PrefsBackend {
    fn store(&self, key: &str, image: &DynamicImage) -> StoreResult<()> {
        let png = codec::encode_png(image)?;

        let mut map = self.load_map()?;
        map.insert(key.to_string(), STANDARD.encode(&png));
        self.save_map(&map)
    }

    fn retrieve(&self, key: &str) -> StoreResult<DynamicImage> {
        let map = self.load_map()?;
        let encoded = map
            .get(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        let png = STANDARD
            .decode(encoded)
            .map_err(|e| StoreError::DecodeFailed(e.to_string()))?;
        codec::decode(&png)
    }
}
