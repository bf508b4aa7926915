use crate::utils::write_file_or_cleanup;
use image::{DynamicImage, ImageFormat};
use shared::error::{artifact_err, ExportError};
use std::io::Cursor;
use std::path::Path;

/// Decodes any supported image and encodes it as JPEG. Alpha, palette and
/// 16 bit sources are reduced to 8 bit RGB first.
pub fn convert_to_jpeg(bytes: &[u8]) -> Result<Vec<u8>, ExportError> {
    let img = image::load_from_memory(bytes)
        .map_err(|err| artifact_err!("Can't decode image: {err}"))?;
    let rgb = match img {
        DynamicImage::ImageRgb8(_) => img,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    };
    let mut out = Cursor::new(Vec::new());
    rgb.write_to(&mut out, ImageFormat::Jpeg)
        .map_err(|err| artifact_err!("Can't encode image: {err}"))?;
    Ok(out.into_inner())
}

pub async fn save_image(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let jpeg = convert_to_jpeg(bytes)?;
    write_file_or_cleanup(path, &jpeg).await
        .map_err(|err| artifact_err!("Failed to write {}: {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn png_with_alpha() -> Vec<u8> {
        let img = RgbaImage::from_pixel(4, 4, Rgba([200, 10, 10, 128]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img).write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_rgba_png_converted() {
        let jpeg = convert_to_jpeg(&png_with_alpha()).unwrap();
        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 4));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(convert_to_jpeg(b"<html>not found</html>").is_err());
    }

    #[tokio::test]
    async fn test_save_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poster.jpg");
        save_image(&path, &png_with_alpha()).await.unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(&[0xFF, 0xD8]));
    }
}
