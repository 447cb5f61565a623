use super::error::{Result, ThumbnailError};
use super::thumbnail_format::ThumbnailFormat;
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use log::{debug, warn};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// JPEG 編碼器接受的最低品質
const MIN_JPEG_QUALITY: u8 = 1;

/// 將畫面編碼後寫入檔案
///
/// 失敗時會移除寫到一半的檔案
pub fn write_thumbnail(
    frame: &DynamicImage,
    format: ThumbnailFormat,
    quality: u8,
    path: &Path,
) -> Result<()> {
    debug!(
        "編碼 {format} {}x{} (quality={quality}) -> {}",
        frame.width(),
        frame.height(),
        path.display()
    );

    let result = encode_to_file(frame, format, quality, path);

    if result.is_err() && path.exists() {
        if let Err(e) = fs::remove_file(path) {
            warn!("無法移除不完整的縮圖 {}: {e}", path.display());
        }
    }

    result
}

fn encode_to_file(
    frame: &DynamicImage,
    format: ThumbnailFormat,
    quality: u8,
    path: &Path,
) -> Result<()> {
    let file = File::create(path).map_err(|e| ThumbnailError::encode_write(path, e))?;
    let mut writer = BufWriter::new(file);

    let encoded = match format {
        ThumbnailFormat::Jpeg => {
            let encoder =
                JpegEncoder::new_with_quality(&mut writer, quality.clamp(MIN_JPEG_QUALITY, 100));
            DynamicImage::ImageRgb8(frame.to_rgb8()).write_with_encoder(encoder)
        }
        ThumbnailFormat::Png => frame.write_with_encoder(PngEncoder::new(&mut writer)),
        ThumbnailFormat::WebP => DynamicImage::ImageRgba8(frame.to_rgba8())
            .write_with_encoder(WebPEncoder::new_lossless(&mut writer)),
    };
    encoded.map_err(|e| ThumbnailError::encode_write(path, e))?;

    writer
        .flush()
        .map_err(|e| ThumbnailError::encode_write(path, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};
    use tempfile::TempDir;

    fn sample_frame() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(64, 48, |x, y| {
            image::Rgba([(x * 4) as u8, (y * 5) as u8, 200, 255])
        }))
    }

    #[test]
    fn test_write_each_format() {
        let temp_dir = TempDir::new().unwrap();

        for (format, expected) in [
            (ThumbnailFormat::Jpeg, ImageFormat::Jpeg),
            (ThumbnailFormat::Png, ImageFormat::Png),
            (ThumbnailFormat::WebP, ImageFormat::WebP),
        ] {
            let path = temp_dir
                .path()
                .join(format!("thumb.{}", format.extension()));
            write_thumbnail(&sample_frame(), format, 80, &path).unwrap();

            let bytes = fs::read(&path).unwrap();
            assert_eq!(image::guess_format(&bytes).unwrap(), expected);

            let decoded = image::load_from_memory(&bytes).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (64, 48));
        }
    }

    #[test]
    fn test_jpeg_quality_zero_is_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("low.jpg");
        write_thumbnail(&sample_frame(), ThumbnailFormat::Jpeg, 0, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_jpeg_quality_affects_size() {
        let temp_dir = TempDir::new().unwrap();
        let low = temp_dir.path().join("low.jpg");
        let high = temp_dir.path().join("high.jpg");
        write_thumbnail(&sample_frame(), ThumbnailFormat::Jpeg, 5, &low).unwrap();
        write_thumbnail(&sample_frame(), ThumbnailFormat::Jpeg, 100, &high).unwrap();

        let low_size = fs::metadata(&low).unwrap().len();
        let high_size = fs::metadata(&high).unwrap().len();
        assert!(low_size < high_size);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("thumb.png");

        let result = write_thumbnail(&sample_frame(), ThumbnailFormat::Png, 100, &path);
        assert!(matches!(
            result,
            Err(ThumbnailError::EncodeWriteFailed { .. })
        ));
        assert!(!path.exists());
    }
}
