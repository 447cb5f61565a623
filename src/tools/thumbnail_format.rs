use super::error::{Result, ThumbnailError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 縮圖輸出格式，數值代碼與 method channel 的 `thumbnailFormat` 一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailFormat {
    #[default]
    Jpeg,
    Png,
    #[serde(rename = "webp")]
    WebP,
}

impl ThumbnailFormat {
    pub const ALL: [Self; 3] = [Self::Jpeg, Self::Png, Self::WebP];

    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            1 => Ok(Self::Jpeg),
            2 => Ok(Self::Png),
            3 => Ok(Self::WebP),
            other => Err(ThumbnailError::UnsupportedFormat(other)),
        }
    }

    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Jpeg => 1,
            Self::Png => 2,
            Self::WebP => 3,
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::WebP => "webp",
        }
    }

    /// 是否會使用品質參數（PNG 與 WebP 皆為無損輸出）
    #[must_use]
    pub const fn is_lossy(self) -> bool {
        matches!(self, Self::Jpeg)
    }
}

impl fmt::Display for ThumbnailFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jpeg => write!(f, "JPEG"),
            Self::Png => write!(f, "PNG"),
            Self::WebP => write!(f, "WEBP"),
        }
    }
}

/// 驗證品質參數並轉為 `u8`
pub fn parse_quality(quality: i64) -> Result<u8> {
    u8::try_from(quality)
        .ok()
        .filter(|q| *q <= 100)
        .ok_or(ThumbnailError::InvalidQuality(quality))
}
