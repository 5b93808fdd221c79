// PDF Thumbnail - Native Tauri Backend
//
// Renders PDF pages into JPEG thumbnails using PDFium and hands back
// their file URIs and native page dimensions.

#[cfg(feature = "app")]
mod commands;
pub mod config;
pub mod error;
pub mod pdf;
pub mod source;
pub mod thumbnail;

#[cfg(test)]
mod test_support;

pub use config::{ConfigError, ThumbnailConfig};
pub use error::{Result, ThumbnailError};
pub use source::{ContentProvider, DocumentResolver};
pub use thumbnail::{ThumbnailGenerator, ThumbnailResult};

#[cfg(feature = "app")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::Manager;

    tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::default()
                .level(log::LevelFilter::Info)
                .build(),
        )
        .setup(|app| {
            let state = commands::AppState::load(app.handle())?;
            log::info!("[PdfThumbnail] writing thumbnails to {:?}", state.cache_dir);
            app.manage(state);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::generate,
            commands::generate_all_pages,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
