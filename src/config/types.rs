use crate::tools::{CacheConfig, CachePurgeMode, SizeClass, ThumbnailFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// 最近使用路徑的保留數量
pub const MAX_RECENT_PATHS: usize = 10;

/// 預設快取資料夾名稱（位於系統暫存資料夾下）
pub const DEFAULT_CACHE_DIR_NAME: &str = "video_thumbnailer";

pub const DEFAULT_THUMBNAIL_QUALITY: u8 = 75;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileTypeTable {
    #[serde(rename = "VIDEO_FILE")]
    pub video_file: Vec<String>,
    #[serde(rename = "IMAGE_FILE")]
    pub image_file: Vec<String>,
}

impl FileTypeTable {
    fn extensions_set(extensions: &[String]) -> HashSet<String> {
        extensions.iter().map(|ext| ext.to_lowercase()).collect()
    }

    fn has_extension(extensions: &HashSet<String>, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.contains(&format!(".{}", ext.to_lowercase())))
    }

    #[must_use]
    pub fn is_video_file(&self, path: &Path) -> bool {
        Self::has_extension(&Self::extensions_set(&self.video_file), path)
    }

    #[must_use]
    pub fn is_image_file(&self, path: &Path) -> bool {
        Self::has_extension(&Self::extensions_set(&self.image_file), path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "zh-TW")]
    ZhTw,
}

impl Language {
    pub const ALL: [Self; 2] = [Self::EnUs, Self::ZhTw];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::ZhTw => "zh-TW",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnUs => write!(f, "English"),
            Self::ZhTw => write!(f, "繁體中文"),
        }
    }
}

/// 縮圖相關設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailSettings {
    pub default_format: ThumbnailFormat,
    pub default_quality: u8,
    pub size_class: SizeClass,
    pub purge_mode: CachePurgeMode,
    /// 未設定時使用系統暫存資料夾
    pub cache_root: Option<PathBuf>,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            default_format: ThumbnailFormat::Jpeg,
            default_quality: DEFAULT_THUMBNAIL_QUALITY,
            size_class: SizeClass::Mini,
            purge_mode: CachePurgeMode::ThumbDirectory,
            cache_root: None,
        }
    }
}

impl ThumbnailSettings {
    #[must_use]
    pub fn cache_root(&self) -> PathBuf {
        self.cache_root
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_CACHE_DIR_NAME))
    }

    #[must_use]
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::new(self.cache_root()).with_purge_mode(self.purge_mode)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub language: Language,
    pub thumbnail: ThumbnailSettings,
    pub recent_paths: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub file_type_table: FileTypeTable,
    pub settings: UserSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_settings_partial_json_uses_defaults() {
        let settings: UserSettings =
            serde_json::from_str(r#"{"language":"zh-TW","thumbnail":{"default_format":"png"}}"#)
                .unwrap();

        assert_eq!(settings.language, Language::ZhTw);
        assert_eq!(settings.thumbnail.default_format, ThumbnailFormat::Png);
        assert_eq!(settings.thumbnail.default_quality, DEFAULT_THUMBNAIL_QUALITY);
        assert_eq!(settings.thumbnail.purge_mode, CachePurgeMode::ThumbDirectory);
        assert!(settings.recent_paths.is_empty());
    }

    #[test]
    fn test_cache_config_from_settings() {
        let settings = ThumbnailSettings {
            cache_root: Some(PathBuf::from("/data/cache")),
            purge_mode: CachePurgeMode::LegacyTempFiles,
            ..ThumbnailSettings::default()
        };

        let cache = settings.cache_config();
        assert_eq!(cache.cache_root, PathBuf::from("/data/cache"));
        assert_eq!(cache.purge_mode, CachePurgeMode::LegacyTempFiles);
        assert_eq!(cache.thumb_dir(), PathBuf::from("/data/cache/ThumbFiles"));
    }

    #[test]
    fn test_default_cache_root_in_temp_dir() {
        let root = ThumbnailSettings::default().cache_root();
        assert!(root.starts_with(std::env::temp_dir()));
        assert!(root.ends_with(DEFAULT_CACHE_DIR_NAME));
    }

    #[test]
    fn test_language_serde() {
        assert_eq!(serde_json::to_string(&Language::ZhTw).unwrap(), "\"zh-TW\"");
        assert_eq!(Language::EnUs.as_str(), "en-US");
    }
}
