//! Wire image encoding: base64 text <-> owned RGB raster.

use base64::{prelude::BASE64_STANDARD, Engine};
use image::{codecs::jpeg::JpegEncoder, RgbImage};

use crate::domain::errors::{DomainError, DomainResult};

/// Quality of re-encoded JPEG output.
pub const JPEG_QUALITY: u8 = 90;

/// Decodes a base64 JPEG/PNG payload into a 3-channel raster.
pub fn decode(base64_text: &str) -> DomainResult<RgbImage> {
    let bytes = BASE64_STANDARD
        .decode(base64_text.trim())
        .map_err(|e| DomainError::Decode(format!("invalid base64: {e}")))?;

    let image = image::load_from_memory(&bytes)
        .map_err(|e| DomainError::Decode(format!("unsupported image data: {e}")))?;

    Ok(image.to_rgb8())
}

/// Encodes a raster as base64 JPEG.
pub fn encode(image: &RgbImage) -> DomainResult<String> {
    if image.width() == 0 || image.height() == 0 {
        return Err(DomainError::Encode(format!(
            "cannot encode a {}x{} image",
            image.width(),
            image.height()
        )));
    }

    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
        .encode_image(image)
        .map_err(|e| DomainError::Encode(e.to_string()))?;

    Ok(BASE64_STANDARD.encode(buf))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ImageFormat, Rgb};
    use std::io::Cursor;

    pub(crate) fn png_base64(image: &RgbImage) -> String {
        let mut buf = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        BASE64_STANDARD.encode(buf)
    }

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, 128])
        })
    }

    #[test]
    fn decodes_png_payload() {
        let original = gradient(64, 48);
        let decoded = decode(&png_base64(&original)).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn rejects_malformed_base64() {
        let err = decode("%%% not base64 %%%").unwrap_err();
        assert!(matches!(err, DomainError::Decode(_)));
        assert!(err.is_client_fault());
    }

    #[test]
    fn rejects_non_image_bytes() {
        let text = BASE64_STANDARD.encode(b"definitely not an image container");
        let err = decode(&text).unwrap_err();
        assert!(matches!(err, DomainError::Decode(_)));
    }

    #[test]
    fn rejects_zero_sized_raster() {
        let err = encode(&RgbImage::new(0, 0)).unwrap_err();
        assert!(matches!(err, DomainError::Encode(_)));
        assert!(!err.is_client_fault());
    }

    #[test]
    fn jpeg_round_trip_stays_close() {
        let first = decode(&png_base64(&gradient(96, 64))).unwrap();
        let second = decode(&encode(&first).unwrap()).unwrap();

        assert_eq!(second.dimensions(), first.dimensions());
        let total: u64 = first
            .as_raw()
            .iter()
            .zip(second.as_raw())
            .map(|(a, b)| a.abs_diff(*b) as u64)
            .sum();
        let mean = total as f64 / first.as_raw().len() as f64;
        assert!(mean < 4.0, "mean abs error {mean}");
    }
}
