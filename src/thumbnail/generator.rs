use super::output::{clamp_quality, file_uri, write_thumbnail};
use super::ThumbnailResult;
use crate::config::ThumbnailConfig;
use crate::error::{Result, ThumbnailError};
use crate::pdf::{composite_over_white, PdfiumRasterizer, RasterDocument, Rasterizer};
use crate::source::DocumentResolver;
use std::path::{Path, PathBuf};

/// Renders PDF pages into JPEG thumbnails inside a cache directory.
///
/// Every call opens its own document handle and releases it, together with
/// all intermediate rasters, before returning on every path.
pub struct ThumbnailGenerator<R: Rasterizer> {
    rasterizer: R,
    resolver: DocumentResolver,
    cache_dir: PathBuf,
}

impl ThumbnailGenerator<PdfiumRasterizer> {
    /// Bind PDFium as configured. `default_cache_dir` is used unless the
    /// config overrides it.
    pub fn with_pdfium(config: &ThumbnailConfig, default_cache_dir: &Path) -> Result<Self> {
        let rasterizer = PdfiumRasterizer::bind(config.pdfium_library_path.as_deref())?;
        let cache_dir = config
            .cache_dir
            .clone()
            .unwrap_or_else(|| default_cache_dir.to_path_buf());
        Ok(Self::new(rasterizer, cache_dir))
    }
}

impl<R: Rasterizer> ThumbnailGenerator<R> {
    pub fn new(rasterizer: R, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            rasterizer,
            resolver: DocumentResolver::new(),
            cache_dir: cache_dir.into(),
        }
    }

    pub fn with_resolver(mut self, resolver: DocumentResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Render the zero-based `page` of `document_ref`.
    pub fn generate(&self, document_ref: &str, page: i32, quality: i32) -> Result<ThumbnailResult> {
        let quality = clamp_quality(quality);
        let document = self.open(document_ref)?;

        let page_count = document.page_count();
        let index = u32::try_from(page)
            .ok()
            .filter(|index| *index < page_count)
            .ok_or(ThumbnailError::InvalidPage { page, page_count })?;

        let result = self.render(document.as_ref(), document_ref, index, quality)?;
        log::info!("thumbnail for page {} of {} written", page, document_ref);
        Ok(result)
    }

    /// Render every page of `document_ref`, in page order.
    ///
    /// The first failing page aborts the whole call.
    pub fn generate_all(&self, document_ref: &str, quality: i32) -> Result<Vec<ThumbnailResult>> {
        let quality = clamp_quality(quality);
        let document = self.open(document_ref)?;

        let results = (0..document.page_count())
            .map(|index| self.render(document.as_ref(), document_ref, index, quality))
            .collect::<Result<Vec<_>>>()?;
        log::info!("{} thumbnails for {} written", results.len(), document_ref);
        Ok(results)
    }

    fn open(&self, document_ref: &str) -> Result<Box<dyn RasterDocument + '_>> {
        let file = self.resolver.open(document_ref)?;
        self.rasterizer.open(file)
    }

    fn render(
        &self,
        document: &dyn RasterDocument,
        document_ref: &str,
        index: u32,
        quality: u8,
    ) -> Result<ThumbnailResult> {
        let rendered = document.render_page(index)?;
        let (width, height) = rendered.dimensions();
        let flattened = composite_over_white(rendered);
        let path = write_thumbnail(&self.cache_dir, document_ref, index, &flattened, quality)?;

        Ok(ThumbnailResult {
            uri: file_uri(&path)?,
            width: width as i32,
            height: height as i32,
        })
    }
}
