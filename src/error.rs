//! Error taxonomy surfaced to the bridge.
//!
//! Every failure maps onto one of three stable codes the host runtime can
//! switch on: `FILE_NOT_FOUND`, `INVALID_PAGE` or `INTERNAL_ERROR`.

use serde::ser::SerializeStruct;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while generating thumbnails.
#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error("File {0} not found")]
    FileNotFound(String),

    #[error("Page number {page} is invalid, file has {page_count} pages")]
    InvalidPage { page: i32, page_count: u32 },

    #[error("Failed to initialize PDFium: {0}")]
    PdfiumBinding(String),

    #[error("Failed to load PDF: {0}")]
    Load(String),

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Worker failed: {0}")]
    Worker(String),
}

impl ThumbnailError {
    pub const FILE_NOT_FOUND: &'static str = "FILE_NOT_FOUND";
    pub const INVALID_PAGE: &'static str = "INVALID_PAGE";
    pub const INTERNAL_ERROR: &'static str = "INTERNAL_ERROR";

    /// Stable code the bridge rejects with.
    pub fn code(&self) -> &'static str {
        match self {
            Self::FileNotFound(_) => Self::FILE_NOT_FOUND,
            Self::InvalidPage { .. } => Self::INVALID_PAGE,
            Self::PdfiumBinding(_)
            | Self::Load(_)
            | Self::Render(_)
            | Self::Encode(_)
            | Self::Io(_)
            | Self::Worker(_) => Self::INTERNAL_ERROR,
        }
    }
}

impl Serialize for ThumbnailError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ThumbnailError", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

pub type Result<T> = std::result::Result<T, ThumbnailError>;
