//! Flat file backend
//!
//! One PNG file per key: `<images-dir>/<key>.png`. Writes go to a temp file
//! in the same directory and are renamed over the target, so an interrupted
//! store never leaves a half-written image behind.

use std::fs;
use std::path::PathBuf;

use image::DynamicImage;

use super::backend::ImageBackend;
use super::codec;
use super::errors::{StoreError, StoreResult};

/// Flat file backend
#[derive(Debug)]
pub struct FileBackend {
    images_dir: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `images_dir`.
    pub fn new(images_dir: PathBuf) -> Self {
        Self { images_dir }
    }

    /// The key doubles as a filename component, so it must not escape the
    /// images directory.
    fn validate_key(key: &str) -> StoreResult<()> {
        if key.is_empty()
            || key.contains('/')
            || key.contains('\\')
            || key.contains("..")
            || key.contains('\0')
        {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(())
    }

    fn path_for_key(&self, key: &str) -> StoreResult<PathBuf> {
        Self::validate_key(key)?;
        Ok(self.images_dir.join(format!("{}.png", key)))
    }
}

impl ImageBackend for FileBackend {
    fn store(&self, key: &str, image: &DynamicImage) -> StoreResult<()> {
        let target = self.path_for_key(key)?;
        let png = codec::encode_png(image)?;

        fs::create_dir_all(&self.images_dir).map_err(|e| StoreError::Io(e.to_string()))?;

        // Atomic all-or-nothing replace
        let tmp_path = self.images_dir.join(format!("{}.png.tmp", key));
        fs::write(&tmp_path, &png).map_err(|e| StoreError::Io(e.to_string()))?;
        fs::rename(&tmp_path, &target).map_err(|e| StoreError::Io(e.to_string()))
    }

    fn retrieve(&self, key: &str) -> StoreResult<DynamicImage> {
        let path = self.path_for_key(key)?;

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(key.to_string()))
            }
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };

        codec::decode(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn sample_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([0, 120, 240, 255]),
        ))
    }

    fn backend_in(temp: &TempDir) -> FileBackend {
        FileBackend::new(temp.path().join("images"))
    }

    #[test]
    fn test_roundtrip_is_pixel_identical() {
        let temp = TempDir::new().unwrap();
        let backend = backend_in(&temp);
        let original = sample_image(5, 5);

        backend.store("keyImage", &original).unwrap();
        let loaded = backend.retrieve("keyImage").unwrap();

        assert_eq!(loaded.to_rgba8().as_raw(), original.to_rgba8().as_raw());
    }

    #[test]
    fn test_store_writes_png_at_expected_path() {
        let temp = TempDir::new().unwrap();
        let backend = backend_in(&temp);

        backend.store("keyImage", &sample_image(4, 4)).unwrap();

        let expected = temp.path().join("images").join("keyImage.png");
        assert!(expected.exists());

        // The file itself is a decodable PNG
        let bytes = fs::read(&expected).unwrap();
        assert!(image::load_from_memory(&bytes).is_ok());
    }

    #[test]
    fn test_retrieve_before_store_is_not_found() {
        let temp = TempDir::new().unwrap();
        let backend = backend_in(&temp);

        let result = backend.retrieve("keyImage");
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_store_overwrites_in_place() {
        let temp = TempDir::new().unwrap();
        let backend = backend_in(&temp);

        backend.store("keyImage", &sample_image(4, 4)).unwrap();
        backend.store("keyImage", &sample_image(10, 2)).unwrap();

        let loaded = backend.retrieve("keyImage").unwrap();
        assert_eq!(loaded.dimensions(), (10, 2));

        // Still exactly one image file (plus no leftover temp file)
        let entries: Vec<_> = fs::read_dir(temp.path().join("images"))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_traversal_keys_rejected() {
        let temp = TempDir::new().unwrap();
        let backend = backend_in(&temp);

        for key in ["", "../escape", "a/b", "a\\b"] {
            let result = backend.store(key, &sample_image(2, 2));
            assert!(
                matches!(result, Err(StoreError::InvalidKey(_))),
                "key {:?} should be rejected",
                key
            );
        }
    }

    #[test]
    fn test_corrupt_file_is_decode_failure() {
        let temp = TempDir::new().unwrap();
        let backend = backend_in(&temp);

        backend.store("keyImage", &sample_image(4, 4)).unwrap();

        let path = temp.path().join("images").join("keyImage.png");
        fs::write(&path, b"garbage bytes").unwrap();

        let result = backend.retrieve("keyImage");
        assert!(matches!(result, Err(StoreError::DecodeFailed(_))));
    }
}
