pub mod load;
pub mod save;
pub mod types;

pub use types::{
    Config, DEFAULT_THUMBNAIL_QUALITY, FileTypeTable, Language, MAX_RECENT_PATHS,
    ThumbnailSettings, UserSettings,
};
