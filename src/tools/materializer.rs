//! 縮圖產生核心
//!
//! 流程：
//! 1. 由來源路徑推導檔名
//! 2. 取得代表畫面（失敗時不會動到檔案系統）
//! 3. 決定輸出資料夾（快取資料夾會先清除）
//! 4. 編碼並寫入 `<資料夾>/<檔名>.<副檔名>`

use super::base_name::{derive_base_name, resolve_source_path};
use super::cache_purger::purge_directory_files;
use super::error::{Result, ThumbnailError};
use super::frame_extractor::{FrameExtractor, SizeClass};
use super::image_encoder::write_thumbnail;
use super::thumbnail_format::{ThumbnailFormat, parse_quality};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// 快取縮圖資料夾名稱
pub const THUMB_CACHE_DIR: &str = "ThumbFiles";

/// 舊版清除的資料夾名稱
pub const LEGACY_CACHE_DIR: &str = "TempFiles";

/// 快取資料夾已存在時要清除哪個資料夾
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePurgeMode {
    /// 清除實際寫入縮圖的 `ThumbFiles`
    #[default]
    ThumbDirectory,
    /// 檢查 `ThumbFiles` 是否存在，但清除的是 `TempFiles`（舊版行為）
    LegacyTempFiles,
}

impl fmt::Display for CachePurgeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThumbDirectory => write!(f, "{THUMB_CACHE_DIR}"),
            Self::LegacyTempFiles => write!(f, "{LEGACY_CACHE_DIR} (legacy)"),
        }
    }
}

/// 快取資料夾設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub cache_root: PathBuf,
    pub purge_mode: CachePurgeMode,
}

impl CacheConfig {
    pub fn new(cache_root: impl Into<PathBuf>) -> Self {
        Self {
            cache_root: cache_root.into(),
            purge_mode: CachePurgeMode::default(),
        }
    }

    #[must_use]
    pub fn with_purge_mode(mut self, purge_mode: CachePurgeMode) -> Self {
        self.purge_mode = purge_mode;
        self
    }

    #[must_use]
    pub fn thumb_dir(&self) -> PathBuf {
        self.cache_root.join(THUMB_CACHE_DIR)
    }

    #[must_use]
    pub fn legacy_dir(&self) -> PathBuf {
        self.cache_root.join(LEGACY_CACHE_DIR)
    }

    fn purge_target(&self) -> PathBuf {
        match self.purge_mode {
            CachePurgeMode::ThumbDirectory => self.thumb_dir(),
            CachePurgeMode::LegacyTempFiles => self.legacy_dir(),
        }
    }
}

/// 單次縮圖請求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailRequest {
    pub source_path: String,
    pub output_directory: Option<PathBuf>,
    pub format: ThumbnailFormat,
    pub quality: u8,
}

impl ThumbnailRequest {
    pub fn new(
        source_path: impl Into<String>,
        output_directory: Option<PathBuf>,
        format: ThumbnailFormat,
        quality: u8,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            output_directory,
            format,
            quality,
        }
    }

    /// 由 method channel 的原始參數建立請求
    ///
    /// 依序檢查來源路徑、格式代碼、品質
    pub fn from_raw(
        source_path: Option<&str>,
        output_directory: Option<&str>,
        format_code: i64,
        quality: i64,
    ) -> Result<Self> {
        let source_path = source_path.unwrap_or_default();
        validate_source(source_path)?;
        let format = ThumbnailFormat::from_code(format_code)?;
        let quality = parse_quality(quality)?;

        Ok(Self::new(
            source_path,
            output_directory.map(PathBuf::from),
            format,
            quality,
        ))
    }
}

fn validate_source(source_path: &str) -> Result<()> {
    if source_path.is_empty() {
        return Err(ThumbnailError::InvalidInput(
            "source path must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// 縮圖產生器
///
/// 寫入快取資料夾時以互斥鎖保護「清除 + 寫入」，避免並行請求互相刪除檔案
pub struct ThumbnailMaterializer {
    cache: CacheConfig,
    size_class: SizeClass,
    cache_lock: Mutex<()>,
}

impl ThumbnailMaterializer {
    pub const fn new(cache: CacheConfig) -> Self {
        Self {
            cache,
            size_class: SizeClass::Mini,
            cache_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn with_size_class(mut self, size_class: SizeClass) -> Self {
        self.size_class = size_class;
        self
    }

    #[must_use]
    pub const fn cache(&self) -> &CacheConfig {
        &self.cache
    }

    #[must_use]
    pub const fn size_class(&self) -> SizeClass {
        self.size_class
    }

    /// 產生縮圖並回傳寫入的絕對路徑
    pub fn materialize<E>(&self, extractor: &E, request: &ThumbnailRequest) -> Result<PathBuf>
    where
        E: FrameExtractor + ?Sized,
    {
        validate_source(&request.source_path)?;
        if request.quality > 100 {
            return Err(ThumbnailError::InvalidQuality(i64::from(request.quality)));
        }

        let base_name = derive_base_name(&request.source_path);
        if base_name.is_empty() {
            return Err(ThumbnailError::InvalidInput(format!(
                "cannot derive a file name from {}",
                request.source_path
            )));
        }

        let source = resolve_source_path(&request.source_path);
        let frame = extractor.extract_frame(Path::new(source.as_ref()), self.size_class)?;
        let file_name = format!("{base_name}.{}", request.format.extension());

        let output_path = match &request.output_directory {
            Some(directory) => {
                ensure_output_directory(directory)?;
                let output_path = absolute_output_path(&directory.join(&file_name))?;
                write_thumbnail(&frame, request.format, request.quality, &output_path)?;
                output_path
            }
            None => {
                let _guard = self
                    .cache_lock
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);

                let directory = self.prepare_cache_directory()?;
                let output_path = absolute_output_path(&directory.join(&file_name))?;
                write_thumbnail(&frame, request.format, request.quality, &output_path)?;
                output_path
            }
        };

        info!(
            "縮圖已建立: {} -> {}",
            request.source_path,
            output_path.display()
        );
        Ok(output_path)
    }

    /// 已存在時依清除模式清空，不存在時建立
    fn prepare_cache_directory(&self) -> Result<PathBuf> {
        let thumb_dir = self.cache.thumb_dir();

        if thumb_dir.exists() {
            let target = self.cache.purge_target();
            match purge_directory_files(&target) {
                Ok(report) => debug!(
                    "清除快取 {}: 刪除 {} 個檔案",
                    target.display(),
                    report.removed
                ),
                Err(e) => warn!("無法清除快取 {}: {e}", target.display()),
            }
        } else {
            ensure_output_directory(&thumb_dir)?;
        }

        Ok(thumb_dir)
    }
}

fn ensure_output_directory(directory: &Path) -> Result<()> {
    if !directory.is_dir() {
        debug!("建立輸出資料夾: {}", directory.display());
        fs::create_dir_all(directory).map_err(|e| ThumbnailError::encode_write(directory, e))?;
    }
    Ok(())
}

fn absolute_output_path(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| ThumbnailError::encode_write(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, mpsc};
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    struct StubExtractor {
        calls: AtomicUsize,
    }

    impl StubExtractor {
        const fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl FrameExtractor for StubExtractor {
        fn extract_frame(&self, _source: &Path, _size: SizeClass) -> Result<DynamicImage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(DynamicImage::ImageRgb8(RgbImage::new(32, 24)))
        }
    }

    /// 擷取完成時通知測試執行緒
    struct SignallingExtractor {
        extracted: mpsc::Sender<()>,
    }

    impl FrameExtractor for SignallingExtractor {
        fn extract_frame(&self, _source: &Path, _size: SizeClass) -> Result<DynamicImage> {
            let _ = self.extracted.send(());
            Ok(DynamicImage::ImageRgb8(RgbImage::new(32, 24)))
        }
    }

    #[test]
    fn test_from_raw_checks_source_first() {
        let result = ThumbnailRequest::from_raw(Some(""), None, 99, 500);
        assert!(matches!(result, Err(ThumbnailError::InvalidInput(_))));

        let result = ThumbnailRequest::from_raw(None, None, 1, 50);
        assert!(matches!(result, Err(ThumbnailError::InvalidInput(_))));
    }

    #[test]
    fn test_from_raw_only_rejects_empty_source() {
        let request = ThumbnailRequest::from_raw(Some(" "), None, 1, 50).unwrap();
        assert_eq!(request.source_path, " ");
    }

    #[test]
    fn test_from_raw_rejects_format_and_quality() {
        let result = ThumbnailRequest::from_raw(Some("/a.mp4"), None, 99, 50);
        assert!(matches!(result, Err(ThumbnailError::UnsupportedFormat(99))));

        let result = ThumbnailRequest::from_raw(Some("/a.mp4"), None, 1, 101);
        assert!(matches!(result, Err(ThumbnailError::InvalidQuality(101))));
    }

    #[test]
    fn test_from_raw_valid() {
        let request = ThumbnailRequest::from_raw(Some("/a.mp4"), Some("/out"), 3, 75).unwrap();
        assert_eq!(request.format, ThumbnailFormat::WebP);
        assert_eq!(request.quality, 75);
        assert_eq!(request.output_directory, Some(PathBuf::from("/out")));
    }

    #[test]
    fn test_empty_source_skips_extraction() {
        let temp_dir = TempDir::new().unwrap();
        let extractor = StubExtractor::new();
        let materializer = ThumbnailMaterializer::new(CacheConfig::new(temp_dir.path()));

        let request = ThumbnailRequest::new("", None, ThumbnailFormat::Jpeg, 80);
        let result = materializer.materialize(&extractor, &request);

        assert!(matches!(result, Err(ThumbnailError::InvalidInput(_))));
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
        assert!(!materializer.cache().thumb_dir().exists());
    }

    #[test]
    fn test_cache_directory_created() {
        let temp_dir = TempDir::new().unwrap();
        let materializer = ThumbnailMaterializer::new(CacheConfig::new(temp_dir.path()));

        let request = ThumbnailRequest::new("/videos/movie.mp4", None, ThumbnailFormat::Png, 80);
        let path = materializer
            .materialize(&StubExtractor::new(), &request)
            .unwrap();

        assert_eq!(path, temp_dir.path().join(THUMB_CACHE_DIR).join("movie.png"));
        assert!(path.is_file());
    }

    #[test]
    fn test_file_uri_source() {
        let temp_dir = TempDir::new().unwrap();
        let materializer = ThumbnailMaterializer::new(CacheConfig::new(temp_dir.path()));

        let request =
            ThumbnailRequest::new("file:///videos/clip.mov", None, ThumbnailFormat::Jpeg, 50);
        let path = materializer
            .materialize(&StubExtractor::new(), &request)
            .unwrap();

        assert_eq!(path.file_name().unwrap(), "clip.jpg");
    }

    #[test]
    fn test_percent_encoded_file_uri_is_decoded() {
        let temp_dir = TempDir::new().unwrap();
        let photo = temp_dir.path().join("my photo.png");
        RgbImage::from_pixel(64, 48, image::Rgb([90, 120, 150]))
            .save(&photo)
            .unwrap();

        let materializer = ThumbnailMaterializer::new(CacheConfig::new(temp_dir.path()));
        let source = format!("file://{}/my%20photo.png", temp_dir.path().display());
        let request = ThumbnailRequest::new(source, None, ThumbnailFormat::Png, 100);

        let path = materializer
            .materialize(&crate::tools::ImageFileFrameExtractor, &request)
            .unwrap();

        assert_eq!(path, temp_dir.path().join(THUMB_CACHE_DIR).join("my photo.png"));
        assert!(path.is_file());
    }

    #[test]
    fn test_purge_target_by_mode() {
        let config = CacheConfig::new("/cache");
        assert_eq!(config.purge_target(), PathBuf::from("/cache/ThumbFiles"));

        let legacy = config.with_purge_mode(CachePurgeMode::LegacyTempFiles);
        assert_eq!(legacy.purge_target(), PathBuf::from("/cache/TempFiles"));
    }

    #[test]
    fn test_cache_write_waits_for_lock() {
        let temp_dir = TempDir::new().unwrap();
        let materializer = Arc::new(ThumbnailMaterializer::new(CacheConfig::new(
            temp_dir.path(),
        )));
        let (tx, rx) = mpsc::channel();

        let guard = materializer.cache_lock.lock().unwrap();

        let worker = {
            let materializer = Arc::clone(&materializer);
            thread::spawn(move || {
                let extractor = SignallingExtractor { extracted: tx };
                let request =
                    ThumbnailRequest::new("/videos/locked.mp4", None, ThumbnailFormat::Png, 80);
                materializer.materialize(&extractor, &request)
            })
        };

        // 擷取已完成，但持有鎖期間不得清除或寫入快取資料夾
        rx.recv().unwrap();
        thread::sleep(Duration::from_millis(200));
        assert!(!materializer.cache().thumb_dir().exists());

        drop(guard);
        let path = worker.join().unwrap().unwrap();
        assert_eq!(path, temp_dir.path().join(THUMB_CACHE_DIR).join("locked.png"));
        assert!(path.is_file());
    }
}
