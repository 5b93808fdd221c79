//! Core PDF rasterizer implementation using pdfium-render.
//!
//! Note: pdfium-render's Pdfium struct is not Send+Sync, so a rasterizer is
//! bound on-demand within each operation rather than stored in shared state.

use crate::error::{Result, ThumbnailError};
use image::RgbaImage;
use pdfium_render::prelude::*;
use std::fs::File;
use std::path::Path;

/// Converts open PDF files into documents that can be rasterized.
pub trait Rasterizer {
    /// Take ownership of `file` and parse it. The handle is released when the
    /// returned document is dropped.
    fn open(&self, file: File) -> Result<Box<dyn RasterDocument + '_>>;
}

/// An open document, valid for the lifetime of its rasterizer.
pub trait RasterDocument {
    fn page_count(&self) -> u32;

    /// Render the page at `index` at its native size (1px per PDF point).
    fn render_page(&self, index: u32) -> Result<RgbaImage>;
}

/// Rasterizer backed by a PDFium binding.
pub struct PdfiumRasterizer {
    pdfium: Pdfium,
}

impl PdfiumRasterizer {
    /// Bind PDFium, trying `library_path` first when given.
    pub fn bind(library_path: Option<&Path>) -> Result<Self> {
        Ok(Self {
            pdfium: bind_pdfium(library_path)?,
        })
    }
}

impl Rasterizer for PdfiumRasterizer {
    fn open(&self, file: File) -> Result<Box<dyn RasterDocument + '_>> {
        let document = self
            .pdfium
            .load_pdf_from_reader(file, None)
            .map_err(|e| ThumbnailError::Load(e.to_string()))?;
        Ok(Box::new(PdfiumDocument { document }))
    }
}

struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl RasterDocument for PdfiumDocument<'_> {
    fn page_count(&self) -> u32 {
        self.document.pages().len() as u32
    }

    fn render_page(&self, index: u32) -> Result<RgbaImage> {
        let page_index = u16::try_from(index)
            .map_err(|_| ThumbnailError::Render(format!("page index {} out of range", index)))?;
        let page = self
            .document
            .pages()
            .get(page_index)
            .map_err(|e| ThumbnailError::Render(e.to_string()))?;

        let (width, height) = native_size(page.width().value, page.height().value);

        // Screen presentation, not print fidelity
        let config = PdfRenderConfig::new()
            .set_target_width(width as i32)
            .set_target_height(height as i32)
            .use_print_quality(false)
            .set_clear_color(PdfColor::new(255, 255, 255, 255))
            .render_form_data(true)
            .render_annotations(true);

        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| ThumbnailError::Render(e.to_string()))?;

        log::debug!("rendered page {} at {}x{}", index, width, height);

        Ok(bitmap.as_image().into_rgba8())
    }
}

/// Pixel size of a page rendered at one pixel per point.
pub fn native_size(width_points: f32, height_points: f32) -> (u32, u32) {
    let px = |points: f32| (points.round() as u32).max(1);
    (px(width_points), px(height_points))
}

/// Bind to the PDFium library and return a usable Pdfium instance.
///
/// Search order: the explicit `library_path`, the platform library next to
/// the executable, the macOS bundle Frameworks dir, then the system library.
pub fn bind_pdfium(library_path: Option<&Path>) -> Result<Pdfium> {
    if let Some(path) = library_path {
        match Pdfium::bind_to_library(path) {
            Ok(bindings) => {
                log::debug!("loaded configured PDFium library: {:?}", path);
                return Ok(Pdfium::new(bindings));
            }
            Err(e) => log::warn!("failed configured PDFium library {:?}: {:?}", path, e),
        }
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let dir = exe_dir.to_string_lossy();
            let candidate = Pdfium::pdfium_platform_library_name_at_path(&*dir);
            if Path::new(&candidate).exists() {
                match Pdfium::bind_to_library(&candidate) {
                    Ok(bindings) => {
                        log::debug!("loaded bundled PDFium library: {:?}", candidate);
                        return Ok(Pdfium::new(bindings));
                    }
                    Err(e) => log::warn!("failed bundled PDFium library: {:?}", e),
                }
            }

            // exe is Contents/MacOS/<app>, library sits in Contents/Frameworks
            #[cfg(target_os = "macos")]
            {
                let frameworks = exe_dir.join("..").join("Frameworks").join("libpdfium.dylib");
                if let Ok(canonical_path) = frameworks.canonicalize() {
                    match Pdfium::bind_to_library(&canonical_path) {
                        Ok(bindings) => {
                            log::debug!("loaded bundled PDFium library: {:?}", canonical_path);
                            return Ok(Pdfium::new(bindings));
                        }
                        Err(e) => log::warn!("failed bundled PDFium library: {:?}", e),
                    }
                }
            }
        }
    }

    Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|e| {
            ThumbnailError::PdfiumBinding(format!(
                "could not load the PDFium library ({:?}); set pdfiumLibraryPath or install it system-wide",
                e
            ))
        })
}
