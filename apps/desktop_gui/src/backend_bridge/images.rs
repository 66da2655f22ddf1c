//! Artwork image decoding for texture upload.

use client_core::expansion::EXPANDED_IMAGE_WIDTH;

/// Decoded RGBA pixels, ready for `egui::ColorImage`.
#[derive(Debug, Clone)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

/// Decodes and downscales so the longest side fits the expanded display
/// width; the default size is drawn from the same texture.
pub fn decode_preview_image(bytes: &[u8]) -> Result<PreviewImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let max_side = EXPANDED_IMAGE_WIDTH as u32;
    let resized = if dynamic.width() > max_side || dynamic.height() > max_side {
        dynamic.thumbnail(max_side, max_side)
    } else {
        dynamic
    }
    .to_rgba8();
    let width = resized.width() as usize;
    let height = resized.height() as usize;
    Ok(PreviewImage {
        width,
        height,
        rgba: resized.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([200, 10, 10, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).expect("encode png");
        out.into_inner()
    }

    #[test]
    fn keeps_small_images_at_native_size() {
        let preview = decode_preview_image(&png_bytes(40, 30)).expect("decode");
        assert_eq!((preview.width, preview.height), (40, 30));
        assert_eq!(preview.rgba.len(), 40 * 30 * 4);
    }

    #[test]
    fn downscales_large_images_preserving_aspect() {
        let preview = decode_preview_image(&png_bytes(1200, 600)).expect("decode");
        assert_eq!(preview.width, 600);
        assert_eq!(preview.height, 300);
    }

    #[test]
    fn rejects_non_image_bytes() {
        assert!(decode_preview_image(b"<html>not an image</html>").is_err());
    }
}
