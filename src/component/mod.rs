//! 功能元件模組
//!
//! 每個子模組實現一個獨立的功能，包含主要邏輯和專用工具

pub mod batch_generator;
pub mod method_call_runner;
pub mod prompts;
pub mod thumbnail_generator;

pub use batch_generator::BatchThumbnailGenerator;
pub use method_call_runner::MethodCallRunner;
pub use thumbnail_generator::{MediaKind, ThumbnailGenerator};
