//! PDF rasterization using pdfium-render.
//!
//! This module provides:
//! - Binding to the PDFium library from the usual deployment locations
//! - Display-quality page rendering at native page size
//! - Compositing rendered pages onto an opaque white background

mod compose;
mod renderer;

pub use compose::*;
pub use renderer::*;
