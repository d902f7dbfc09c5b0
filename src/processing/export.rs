//! Re-encoding the current result for download.

use std::io::Cursor;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage, RgbaImage};
use tracing::debug;
use crate::utils::{EditorError, EditorResult, EncodedImage, ImageFormat};

pub const EXPORT_BASENAME: &str = "photophonia-edited";
pub const JPEG_QUALITY: u8 = 92;

/// `photophonia-edited.<ext>`
pub fn default_export_name(format: ImageFormat) -> String {
    format!("{}.{}", EXPORT_BASENAME, format.export_extension())
}

/// Decodes the payload and encodes it as `format`.
///
/// JPEG has no alpha channel, so transparent areas are flattened onto white.
pub fn encode_for_export(image: &EncodedImage, format: ImageFormat) -> EditorResult<Vec<u8>> {
    // Model results carry whatever MIME type the model chose.
    ImageFormat::from_mime_type(image.mime_type())?;
    let bytes = image.decode_bytes()?;
    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| EditorError::decode(format!("Failed to decode {}: {}", image.mime_type(), e)))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut out = Cursor::new(Vec::new());
    let written = match format {
        ImageFormat::PNG => PngEncoder::new(&mut out)
            .write_image(rgba.as_raw(), width, height, ExtendedColorType::Rgba8),
        ImageFormat::WebP => WebPEncoder::new_lossless(&mut out)
            .write_image(rgba.as_raw(), width, height, ExtendedColorType::Rgba8),
        ImageFormat::JPEG => {
            let flat = flatten_on_white(&rgba);
            JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
                .write_image(flat.as_raw(), width, height, ExtendedColorType::Rgb8)
        }
    };
    written.map_err(|e| EditorError::export(format!("Failed to encode {:?}: {}", format, e)))?;

    let out = out.into_inner();
    debug!("Encoded {}x{} export as {:?} ({} bytes)", width, height, format, out.len());
    Ok(out)
}

fn flatten_on_white(rgba: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let blend = |c: u8| {
            let (c, a) = (u32::from(c), u32::from(a));
            ((c * a + 255 * (255 - a) + 127) / 255) as u8
        };
        image::Rgb([blend(r), blend(g), blend(b)])
    })
}
