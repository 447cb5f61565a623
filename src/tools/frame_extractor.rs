use super::error::{Result, ThumbnailError};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::process::Command;

/// MINI 尺寸的外框（保持比例縮放至此範圍內）
pub const MINI_MAX_WIDTH: u32 = 512;
pub const MINI_MAX_HEIGHT: u32 = 384;

/// MICRO 尺寸（正方形置中裁切）
pub const MICRO_SIZE: u32 = 96;

/// 縮圖尺寸等級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    #[default]
    Mini,
    Micro,
}

impl SizeClass {
    /// ffmpeg 的縮放濾鏡；MINI 不放大小於外框的畫面
    #[must_use]
    pub fn ffmpeg_scale_filter(self) -> String {
        match self {
            Self::Mini => format!(
                "scale='min({MINI_MAX_WIDTH},iw)':'min({MINI_MAX_HEIGHT},ih)':force_original_aspect_ratio=decrease"
            ),
            Self::Micro => format!(
                "scale={MICRO_SIZE}:{MICRO_SIZE}:force_original_aspect_ratio=increase,crop={MICRO_SIZE}:{MICRO_SIZE}"
            ),
        }
    }

    /// 將已解碼的影像縮放到此尺寸等級
    #[must_use]
    pub fn fit(self, image: &DynamicImage) -> DynamicImage {
        match self {
            Self::Mini => {
                if image.width() <= MINI_MAX_WIDTH && image.height() <= MINI_MAX_HEIGHT {
                    image.clone()
                } else {
                    image.thumbnail(MINI_MAX_WIDTH, MINI_MAX_HEIGHT)
                }
            }
            Self::Micro => image.resize_to_fill(MICRO_SIZE, MICRO_SIZE, FilterType::Triangle),
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mini => write!(f, "MINI ({MINI_MAX_WIDTH}x{MINI_MAX_HEIGHT})"),
            Self::Micro => write!(f, "MICRO ({MICRO_SIZE}x{MICRO_SIZE})"),
        }
    }
}

/// 從來源檔案取得一張代表性畫面
pub trait FrameExtractor: Send + Sync {
    fn extract_frame(&self, source: &Path, size: SizeClass) -> Result<DynamicImage>;
}

/// 使用 ffmpeg 的 `thumbnail` 濾鏡挑選影片的代表畫面
#[derive(Debug, Clone)]
pub struct FfmpegFrameExtractor {
    program: String,
}

impl Default for FfmpegFrameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegFrameExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("ffmpeg")
    }

    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn build_args(source: &Path, size: SizeClass) -> Vec<String> {
        let filter = format!("thumbnail,{}", size.ffmpeg_scale_filter());

        vec![
            "-hide_banner".to_string(),
            "-nostdin".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-i".to_string(),
            source.to_string_lossy().to_string(),
            "-an".to_string(),
            "-sn".to_string(),
            "-dn".to_string(),
            "-vf".to_string(),
            filter,
            "-frames:v".to_string(),
            "1".to_string(),
            "-f".to_string(),
            "image2pipe".to_string(),
            "-c:v".to_string(),
            "png".to_string(),
            "-".to_string(),
        ]
    }
}

impl FrameExtractor for FfmpegFrameExtractor {
    fn extract_frame(&self, source: &Path, size: SizeClass) -> Result<DynamicImage> {
        if !source.is_file() {
            return Err(ThumbnailError::frame_extraction(source, "source file not found"));
        }

        debug!("擷取影片畫面: {} ({size})", source.display());

        let output = Command::new(&self.program)
            .args(Self::build_args(source, size))
            .output()
            .map_err(|e| {
                ThumbnailError::frame_extraction(source, format!("failed to run {}: {e}", self.program))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ThumbnailError::frame_extraction(source, stderr.trim()));
        }

        if output.stdout.is_empty() {
            return Err(ThumbnailError::frame_extraction(source, "no video frame decoded"));
        }

        image::load_from_memory_with_format(&output.stdout, ImageFormat::Png)
            .map_err(|e| ThumbnailError::frame_extraction(source, e.to_string()))
    }
}

/// 直接解碼圖片檔並縮放
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFileFrameExtractor;

impl FrameExtractor for ImageFileFrameExtractor {
    fn extract_frame(&self, source: &Path, size: SizeClass) -> Result<DynamicImage> {
        debug!("解碼圖片: {} ({size})", source.display());

        let image = image::open(source)
            .map_err(|e| ThumbnailError::frame_extraction(source, e.to_string()))?;
        Ok(size.fit(&image))
    }
}
