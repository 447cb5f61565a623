//! 資料夾批次縮圖元件
//!
//! 掃描資料夾內所有影片，平行產生縮圖到指定的輸出資料夾

mod batch_runner;
mod main;

pub use batch_runner::{BatchItemResult, BatchOptions, BatchResult, generate_batch};
pub use main::BatchThumbnailGenerator;
