use super::method_call::{ArgumentError, MethodCall, MethodResponse};
use crate::tools::{
    FfmpegFrameExtractor, FrameExtractor, ImageFileFrameExtractor, ThumbnailError,
    ThumbnailMaterializer, ThumbnailRequest,
};
use log::{debug, error, warn};
use std::fmt;
use thiserror::Error;

pub const METHOD_PICK_IMAGE: &str = "pickImage";
pub const METHOD_PICK_VIDEO: &str = "pickVideo";
pub const METHOD_GENERATE_IMAGE_THUMBNAIL: &str = "generateImageThumbnail";
pub const METHOD_GENERATE_VIDEO_THUMBNAIL: &str = "generateVideoThumbnail";

pub const ARG_SOURCE: &str = "source";
pub const ARG_VIDEO_FILE_PATH: &str = "videoFilePath";
pub const ARG_IMAGE_FILE_PATH: &str = "imageFilePath";
pub const ARG_THUMB_FILE_PATH: &str = "thumbFilePath";
pub const ARG_THUMBNAIL_FORMAT: &str = "thumbnailFormat";
pub const ARG_THUMBNAIL_QUALITY: &str = "thumbnailQuality";

const CODE_INVALID_ARGUMENTS: &str = "invalid_arguments";
const CODE_INVALID_SOURCE: &str = "invalid_source";
const CODE_UNKNOWN_METHOD: &str = "unknown_method";

/// 挑選來源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickSource {
    Camera,
    Gallery,
}

impl PickSource {
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Camera),
            1 => Some(Self::Gallery),
            _ => None,
        }
    }
}

impl fmt::Display for PickSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Camera => write!(f, "camera"),
            Self::Gallery => write!(f, "gallery"),
        }
    }
}

/// 縮圖要由哪種擷取器處理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ThumbnailSource {
    Video,
    Image,
}

impl ThumbnailSource {
    const fn path_argument(self) -> &'static str {
        match self {
            Self::Video => ARG_VIDEO_FILE_PATH,
            Self::Image => ARG_IMAGE_FILE_PATH,
        }
    }
}

/// 單次呼叫失敗的原因
#[derive(Debug, Error)]
enum DispatchError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Thumbnail(#[from] ThumbnailError),

    #[error("invalid {method} source: {code}")]
    InvalidSource { method: String, code: i64 },

    #[error("unknown method {0}")]
    UnknownMethod(String),
}

impl DispatchError {
    const fn code(&self) -> &'static str {
        match self {
            Self::Argument(_) => CODE_INVALID_ARGUMENTS,
            Self::Thumbnail(e) => e.code(),
            Self::InvalidSource { .. } => CODE_INVALID_SOURCE,
            Self::UnknownMethod(_) => CODE_UNKNOWN_METHOD,
        }
    }
}

/// method channel 路由
///
/// 參數在邊界轉為強型別，所有失敗都以 `MethodResponse::Error` 回傳
pub struct MethodDispatcher {
    materializer: ThumbnailMaterializer,
    video_extractor: Box<dyn FrameExtractor>,
    image_extractor: Box<dyn FrameExtractor>,
}

impl MethodDispatcher {
    #[must_use]
    pub fn new(materializer: ThumbnailMaterializer) -> Self {
        Self::with_extractors(
            materializer,
            Box::new(FfmpegFrameExtractor::new()),
            Box::new(ImageFileFrameExtractor),
        )
    }

    #[must_use]
    pub fn with_extractors(
        materializer: ThumbnailMaterializer,
        video_extractor: Box<dyn FrameExtractor>,
        image_extractor: Box<dyn FrameExtractor>,
    ) -> Self {
        Self {
            materializer,
            video_extractor,
            image_extractor,
        }
    }

    pub fn dispatch(&self, call: &MethodCall) -> MethodResponse {
        debug!("收到呼叫: {}", call.method);

        let result = match call.method.as_str() {
            METHOD_PICK_IMAGE | METHOD_PICK_VIDEO => Self::handle_pick(call),
            METHOD_GENERATE_VIDEO_THUMBNAIL => self.handle_thumbnail(call, ThumbnailSource::Video),
            METHOD_GENERATE_IMAGE_THUMBNAIL => self.handle_thumbnail(call, ThumbnailSource::Image),
            other => Err(DispatchError::UnknownMethod(other.to_string())),
        };

        result.unwrap_or_else(|e| {
            error!("{} 失敗 [{}]: {e}", call.method, e.code());
            MethodResponse::error(e.code(), e.to_string())
        })
    }

    /// 挑選功能由宿主平台提供，這裡只驗證來源
    fn handle_pick(call: &MethodCall) -> Result<MethodResponse, DispatchError> {
        let code = call.int_argument(ARG_SOURCE)?;
        let source = PickSource::from_code(code).ok_or_else(|| DispatchError::InvalidSource {
            method: call.method.clone(),
            code,
        })?;

        warn!("{} ({source}) 需由宿主平台處理", call.method);
        Ok(MethodResponse::NotImplemented)
    }

    fn handle_thumbnail(
        &self,
        call: &MethodCall,
        source: ThumbnailSource,
    ) -> Result<MethodResponse, DispatchError> {
        let source_path = call.string_argument(source.path_argument())?;
        let output_directory = call.string_argument(ARG_THUMB_FILE_PATH)?;
        let format_code = call.int_argument(ARG_THUMBNAIL_FORMAT)?;
        let quality = call.int_argument(ARG_THUMBNAIL_QUALITY)?;

        let request =
            ThumbnailRequest::from_raw(source_path, output_directory, format_code, quality)?;

        let extractor = match source {
            ThumbnailSource::Video => self.video_extractor.as_ref(),
            ThumbnailSource::Image => self.image_extractor.as_ref(),
        };

        let path = self.materializer.materialize(extractor, &request)?;
        Ok(MethodResponse::success(path.to_string_lossy().to_string()))
    }
}
