//! Fixtures shared by the unit tests.

use crate::config::ThumbnailConfig;
use crate::error::{Result, ThumbnailError};
use crate::pdf::{PdfiumRasterizer, RasterDocument, Rasterizer};
use image::{Rgba, RgbaImage};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A page of a fixture PDF, sized in points.
pub struct FixturePage {
    width: i64,
    height: i64,
    black_rect: Option<(i64, i64, i64, i64)>,
}

impl FixturePage {
    pub fn blank(width: i64, height: i64) -> Self {
        Self { width, height, black_rect: None }
    }

    /// `rect` is `(x, y, width, height)` in PDF user space.
    pub fn with_black_rect(width: i64, height: i64, rect: (i64, i64, i64, i64)) -> Self {
        Self { width, height, black_rect: Some(rect) }
    }
}

/// Real PDFium binding for tests marked `#[ignore = "requires libpdfium"]`.
///
/// Honours `PDF_THUMBNAIL_PDFIUM_PATH`. A failed binding fails the test.
pub fn pdfium() -> PdfiumRasterizer {
    let config = ThumbnailConfig::default().with_env_overrides();
    match PdfiumRasterizer::bind(config.pdfium_library_path.as_deref()) {
        Ok(rasterizer) => rasterizer,
        Err(e) => panic!("PDFium unavailable: {}", e),
    }
}

/// Author a real PDF with lopdf.
pub fn write_pdf(dir: &Path, name: &str, pages: &[FixturePage]) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::new();
    for page in pages {
        let operations = match page.black_rect {
            Some((x, y, w, h)) => vec![
                Operation::new("rg", vec![0.into(), 0.into(), 0.into()]),
                Operation::new("re", vec![x.into(), y.into(), w.into(), h.into()]),
                Operation::new("f", vec![]),
            ],
            None => vec![],
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), page.width.into(), page.height.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    doc.save(&path).unwrap();
    path
}

/// In-process rasterizer reading a tiny text format, one page per line:
///
/// - `WxH` opaque white page
/// - `WxH transparent` fully transparent page
/// - `WxH noise` opaque high-entropy page
/// - `fail` page whose rendering errors
///
/// The first line must be `fake-pdf`.
#[derive(Default, Clone)]
pub struct FakeRasterizer {
    open_documents: Arc<AtomicUsize>,
}

impl FakeRasterizer {
    /// Documents opened and not yet dropped.
    pub fn open_documents(&self) -> usize {
        self.open_documents.load(Ordering::SeqCst)
    }
}

impl Rasterizer for FakeRasterizer {
    fn open(&self, mut file: File) -> Result<Box<dyn RasterDocument + '_>> {
        let mut raw = String::new();
        file.read_to_string(&mut raw)?;
        let mut lines = raw.lines();
        if lines.next() != Some("fake-pdf") {
            return Err(ThumbnailError::Load("missing fake-pdf header".into()));
        }
        let pages = lines.map(str::to_owned).collect();
        self.open_documents.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeDocument {
            _file: file,
            pages,
            open_documents: self.open_documents.clone(),
        }))
    }
}

struct FakeDocument {
    _file: File,
    pages: Vec<String>,
    open_documents: Arc<AtomicUsize>,
}

impl Drop for FakeDocument {
    fn drop(&mut self) {
        self.open_documents.fetch_sub(1, Ordering::SeqCst);
    }
}

impl RasterDocument for FakeDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn render_page(&self, index: u32) -> Result<RgbaImage> {
        let line = self
            .pages
            .get(index as usize)
            .ok_or_else(|| ThumbnailError::Render(format!("no page {}", index)))?;
        let mut parts = line.split_whitespace();
        let size = parts.next().unwrap_or_default();
        let (w, h) = size
            .split_once('x')
            .and_then(|(w, h)| Some((w.parse::<u32>().ok()?, h.parse::<u32>().ok()?)))
            .ok_or_else(|| ThumbnailError::Render(format!("cannot render page {}", index)))?;

        Ok(match parts.next() {
            Some("transparent") => RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 0])),
            Some("noise") => RgbaImage::from_fn(w, h, |x, y| {
                let v = (x.wrapping_mul(31) ^ y.wrapping_mul(17)).wrapping_add(x * y) as u8;
                Rgba([v, v.wrapping_add(90), v.wrapping_mul(5), 255])
            }),
            _ => RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255])),
        })
    }
}

/// Write a fake document understood by [`FakeRasterizer`].
pub fn write_fake(dir: &Path, name: &str, pages: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut body = String::from("fake-pdf\n");
    for page in pages {
        body.push_str(page);
        body.push('\n');
    }
    std::fs::write(&path, body).unwrap();
    path
}
