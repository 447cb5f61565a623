use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("thumbnail quality must be within 0..=100, got {0}")]
    InvalidQuality(i64),

    #[error("unsupported thumbnail format code: {0}")]
    UnsupportedFormat(i64),

    #[error("failed to extract a frame from {path}: {reason}")]
    FrameExtractionFailed { path: PathBuf, reason: String },

    #[error("failed to encode or write {path}: {source}")]
    EncodeWriteFailed {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ThumbnailError {
    /// 對應 method channel 回傳的錯誤代碼
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::InvalidQuality(_) => "invalid_quality",
            Self::UnsupportedFormat(_) => "unsupported_format",
            Self::FrameExtractionFailed { .. } => "frame_extraction_failed",
            Self::EncodeWriteFailed { .. } => "encode_write_failed",
        }
    }

    pub(crate) fn frame_extraction(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FrameExtractionFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn encode_write(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::EncodeWriteFailed {
            path: path.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ThumbnailError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            ThumbnailError::InvalidInput("empty".into()),
            ThumbnailError::InvalidQuality(101),
            ThumbnailError::UnsupportedFormat(99),
            ThumbnailError::frame_extraction("/a.mp4", "corrupt"),
            ThumbnailError::encode_write("/a.jpg", std::io::Error::other("disk full")),
        ];
        let mut codes: Vec<&str> = errors.iter().map(ThumbnailError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_encode_write_keeps_source() {
        let err = ThumbnailError::encode_write("/a.jpg", std::io::Error::other("disk full"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("disk full"));
    }
}
