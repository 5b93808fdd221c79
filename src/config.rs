use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const PDFIUM_PATH_ENV: &str = "PDF_THUMBNAIL_PDFIUM_PATH";
pub const CACHE_DIR_ENV: &str = "PDF_THUMBNAIL_CACHE_DIR";

/// Optional overrides for where PDFium lives and where thumbnails go.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ThumbnailConfig {
    /// PDFium library file to bind before the default search paths
    pub pdfium_library_path: Option<PathBuf>,
    /// Output directory for thumbnails
    pub cache_dir: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ThumbnailConfig {
    /// Read a JSON config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Apply `PDF_THUMBNAIL_*` environment overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var_os(key))
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<std::ffi::OsString>) -> Self {
        if let Some(path) = lookup(PDFIUM_PATH_ENV).filter(|v| !v.is_empty()) {
            self.pdfium_library_path = Some(PathBuf::from(path));
        }
        if let Some(dir) = lookup(CACHE_DIR_ENV).filter(|v| !v.is_empty()) {
            self.cache_dir = Some(PathBuf::from(dir));
        }
        self
    }
}
