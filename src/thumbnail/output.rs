//! Naming and writing of thumbnail files.

use crate::error::Result;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use rand::Rng;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use url::Url;

/// Fresh names drawn before giving up on a crowded cache dir.
const MAX_NAME_ATTEMPTS: usize = 16;

/// Map a caller supplied quality onto the encoder's 1..=100 scale.
pub fn clamp_quality(quality: i32) -> u8 {
    let clamped = quality.clamp(1, 100);
    if clamped != quality {
        log::warn!("JPEG quality {} out of range, using {}", quality, clamped);
    }
    clamped as u8
}

/// `<basename>-thumbnail-<page>-<nonce>.jpg`, where basename is the last path
/// segment of `document_ref` with dots replaced by dashes.
pub fn output_file_name(document_ref: &str, page: u32, nonce: i32) -> String {
    let basename = document_ref.rsplit('/').next().unwrap_or_default();
    format!("{}-thumbnail-{}-{}.jpg", basename.replace('.', "-"), page, nonce)
}

/// Encode `image` as JPEG into a new, uniquely named file in `cache_dir`.
///
/// The file is removed again if encoding fails part way.
pub fn write_thumbnail(
    cache_dir: &Path,
    document_ref: &str,
    page: u32,
    image: &RgbImage,
    quality: u8,
) -> Result<PathBuf> {
    fs::create_dir_all(cache_dir)?;
    let (path, file) = create_unique(cache_dir, document_ref, page)?;

    if let Err(e) = encode_jpeg(file, image, quality) {
        if let Err(rm) = fs::remove_file(&path) {
            log::warn!("could not remove partial thumbnail {:?}: {}", path, rm);
        }
        return Err(e);
    }

    log::debug!("wrote thumbnail {:?} (quality {})", path, quality);
    Ok(path)
}

fn encode_jpeg(file: File, image: &RgbImage, quality: u8) -> Result<()> {
    let mut writer = BufWriter::new(file);
    JpegEncoder::new_with_quality(&mut writer, quality).encode_image(image)?;
    writer.flush()?;
    Ok(())
}

fn create_unique(cache_dir: &Path, document_ref: &str, page: u32) -> Result<(PathBuf, File)> {
    let mut rng = rand::thread_rng();
    for _ in 0..MAX_NAME_ATTEMPTS {
        let nonce = rng.gen_range(0..i32::MAX);
        let path = cache_dir.join(output_file_name(document_ref, page, nonce));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Err(io::Error::new(
        ErrorKind::AlreadyExists,
        format!("no free thumbnail name in {:?}", cache_dir),
    )
    .into())
}

/// `file://` URI for a written thumbnail.
pub fn file_uri(path: &Path) -> Result<String> {
    let absolute = if path.is_relative() {
        std::env::current_dir()?.join(path)
    } else {
        path.to_path_buf()
    };
    Url::from_file_path(&absolute)
        .map(String::from)
        .map_err(|()| {
            io::Error::new(
                ErrorKind::InvalidInput,
                format!("cannot express {:?} as a file URI", absolute),
            )
            .into()
        })
}
