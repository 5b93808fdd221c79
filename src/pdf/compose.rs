use image::{imageops, DynamicImage, Rgba, RgbImage, RgbaImage};

/// Flatten a rendered page onto opaque white.
///
/// Some PDFs render with a transparent backdrop which turns black once the
/// alpha channel is dropped for JPEG. The page is alpha-over composited onto a
/// white canvas of the same size and the source raster is consumed.
pub fn composite_over_white(rendered: RgbaImage) -> RgbImage {
    let (width, height) = rendered.dimensions();
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut canvas, &rendered, 0, 0);
    drop(rendered);
    DynamicImage::ImageRgba8(canvas).into_rgb8()
}
