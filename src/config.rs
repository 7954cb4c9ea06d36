//! Gateway configuration
//!
//! Storage roots are injected explicitly rather than reached for as ambient
//! process-wide state. All three backends live under one data directory:
//!
//! ```text
//! <data-dir>/prefs.json    preference map
//! <data-dir>/images/       one PNG per key
//! <data-dir>/memos.dat     append-only memo log
//! ```

use std::path::{Path, PathBuf};

use directories::UserDirs;
use serde::{Deserialize, Serialize};

/// Configuration for constructing a [`StorageGateway`](crate::StorageGateway).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Root directory all three backends store under
    pub data_dir: PathBuf,
}

impl GatewayConfig {
    /// Config rooted at an explicit directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Config rooted at `<user documents>/<app_name>`, the analogue of the
    /// platform document directory. `None` when the platform exposes no
    /// user directories.
    pub fn in_user_documents(app_name: &str) -> Option<Self> {
        let user_dirs = UserDirs::new()?;
        let documents = user_dirs.document_dir()?;
        Some(Self::new(documents.join(app_name)))
    }

    /// Path of the preference map file.
    pub fn prefs_path(&self) -> PathBuf {
        self.data_dir.join("prefs.json")
    }

    /// Directory the file backend writes PNGs into.
    pub fn images_dir(&self) -> PathBuf {
        self.data_dir.join("images")
    }

    /// Path of the memo record log.
    pub fn memo_log_path(&self) -> PathBuf {
        self.data_dir.join("memos.dat")
    }

    /// The configured root.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
