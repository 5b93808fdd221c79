//! Resolution of document references to readable file handles.
//!
//! A reference is an absolute local path, a `file:` URL, or a `content:`
//! URI served by a platform [`ContentProvider`]. Anything else is treated as
//! a missing file.

use crate::error::{Result, ThumbnailError};
use std::fs::File;
use std::path::Path;
use url::Url;

/// Platform facility that opens `content:` URIs for reading.
pub trait ContentProvider: Send + Sync {
    fn open(&self, uri: &Url) -> std::io::Result<File>;
}

/// Turns the reference strings handed over by the host into open files.
#[derive(Default)]
pub struct DocumentResolver {
    content: Option<Box<dyn ContentProvider>>,
}

impl DocumentResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the provider used for `content:` URIs.
    pub fn with_content_provider(mut self, provider: impl ContentProvider + 'static) -> Self {
        self.content = Some(Box::new(provider));
        self
    }

    /// Open `document_ref` read-only.
    ///
    /// The returned handle is owned by the caller and closed when dropped.
    pub fn open(&self, document_ref: &str) -> Result<File> {
        let not_found = || ThumbnailError::FileNotFound(document_ref.to_string());

        // Absolute paths never parse as URLs, so only scheme'd refs land here
        if let Ok(url) = Url::parse(document_ref) {
            match url.scheme() {
                "file" => {
                    let path = url.to_file_path().map_err(|_| not_found())?;
                    return open_read_only(&path).ok_or_else(not_found);
                }
                "content" => {
                    let provider = self.content.as_ref().ok_or_else(not_found)?;
                    return provider.open(&url).map_err(|e| {
                        log::debug!("content provider could not open {}: {}", url, e);
                        not_found()
                    });
                }
                _ => return Err(not_found()),
            }
        }

        if document_ref.starts_with('/') {
            return open_read_only(Path::new(document_ref)).ok_or_else(not_found);
        }

        Err(not_found())
    }
}

fn open_read_only(path: &Path) -> Option<File> {
    match File::open(path) {
        Ok(file) => match file.metadata() {
            Ok(meta) if meta.is_file() => Some(file),
            _ => None,
        },
        Err(e) => {
            log::debug!("could not open {:?}: {}", path, e);
            None
        }
    }
}
