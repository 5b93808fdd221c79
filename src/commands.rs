//! Tauri commands for thumbnail generation.
//!
//! These commands expose the thumbnail generator to the WebView frontend via IPC.
//! Both resolve with the result shape or reject with `{ code, message }`.
//!
//! Note: pdfium-render's Pdfium struct is not Send+Sync, so we don't store
//! it in app state. Each call binds PDFium inside its own blocking worker.

use crate::config::{ConfigError, ThumbnailConfig};
use crate::error::{Result, ThumbnailError};
use crate::thumbnail::{ThumbnailGenerator, ThumbnailResult};
use std::path::PathBuf;
use tauri::{AppHandle, Manager, State};

const CONFIG_FILE: &str = "thumbnail.json";

/// Application state: where PDFium lives and where thumbnails go.
pub struct AppState {
    pub config: ThumbnailConfig,
    pub cache_dir: PathBuf,
}

impl AppState {
    /// Read `thumbnail.json` from the app config dir and settle the cache dir.
    ///
    /// A malformed config file is an error; a missing one means defaults.
    pub fn load(app: &AppHandle) -> std::result::Result<Self, ConfigError> {
        let config = match app.path().app_config_dir() {
            Ok(dir) => ThumbnailConfig::load(&dir.join(CONFIG_FILE)).map_err(|e| {
                log::error!("invalid {}: {}", CONFIG_FILE, e);
                e
            })?,
            Err(e) => {
                log::warn!("app config dir unavailable: {}", e);
                ThumbnailConfig::default()
            }
        }
        .with_env_overrides();

        let default_cache_dir = app
            .path()
            .app_cache_dir()
            .unwrap_or_else(|_| std::env::temp_dir())
            .join("thumbnails");
        let cache_dir = config.cache_dir.clone().unwrap_or(default_cache_dir);

        Ok(Self { config, cache_dir })
    }
}

/// Render a single page to a JPEG thumbnail.
///
/// # Arguments
/// * `file_path` - Absolute path, `file:` URL or `content:` URI
/// * `page` - 0-based page index
/// * `quality` - JPEG quality, 0-100
#[tauri::command]
pub async fn generate(
    file_path: String,
    page: i32,
    quality: i32,
    state: State<'_, AppState>,
) -> Result<ThumbnailResult> {
    let config = state.config.clone();
    let cache_dir = state.cache_dir.clone();
    run_blocking(move || {
        ThumbnailGenerator::with_pdfium(&config, &cache_dir)?.generate(&file_path, page, quality)
    })
    .await
}

/// Render every page to JPEG thumbnails, in page order.
#[tauri::command]
pub async fn generate_all_pages(
    file_path: String,
    quality: i32,
    state: State<'_, AppState>,
) -> Result<Vec<ThumbnailResult>> {
    let config = state.config.clone();
    let cache_dir = state.cache_dir.clone();
    run_blocking(move || {
        ThumbnailGenerator::with_pdfium(&config, &cache_dir)?.generate_all(&file_path, quality)
    })
    .await
}

/// Keep rendering off the IPC event loop.
async fn run_blocking<T, F>(job: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tauri::async_runtime::spawn_blocking(job)
        .await
        .map_err(|e| ThumbnailError::Worker(e.to_string()))?
        .map_err(|e| {
            log::error!("[{}] {}", e.code(), e);
            e
        })
}
