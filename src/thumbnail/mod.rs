//! Thumbnail generation: page selection, flattening, JPEG output.

mod generator;
mod output;

pub use generator::*;
pub use output::*;

use serde::{Deserialize, Serialize};

/// One written thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailResult {
    /// `file://` URI of the JPEG
    pub uri: String,
    /// Native render width of the page in pixels
    pub width: i32,
    /// Native render height of the page in pixels
    pub height: i32,
}
