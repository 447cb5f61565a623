//! 單一檔案縮圖產生元件
//!
//! 影片以 ffmpeg 擷取代表畫面，圖片直接解碼縮放

mod main;

pub use main::{MediaKind, ThumbnailGenerator};
