mod base_name;
mod cache_purger;
mod error;
mod frame_extractor;
mod image_encoder;
mod materializer;
mod media_scanner;
mod path_validator;
mod thumbnail_format;

pub use base_name::{
    derive_base_name, last_path_segment, resolve_source_path, strip_extension,
};
pub use cache_purger::{PurgeReport, purge_directory_files};
pub use error::{Result, ThumbnailError};
pub use frame_extractor::{
    FfmpegFrameExtractor, FrameExtractor, ImageFileFrameExtractor, MICRO_SIZE, MINI_MAX_HEIGHT,
    MINI_MAX_WIDTH, SizeClass,
};
pub use image_encoder::write_thumbnail;
pub use materializer::{
    CacheConfig, CachePurgeMode, LEGACY_CACHE_DIR, THUMB_CACHE_DIR, ThumbnailMaterializer,
    ThumbnailRequest,
};
pub use media_scanner::{MediaFileInfo, scan_image_files, scan_video_files};
pub use path_validator::{validate_directory_exists, validate_file_exists};
pub use thumbnail_format::{ThumbnailFormat, parse_quality};
