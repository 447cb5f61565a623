//! Method channel 介面
//!
//! 以方法名稱與 JSON 參數呼叫縮圖功能，結果為 success / error / notImplemented

mod call_file;
mod dispatcher;
mod method_call;

pub use call_file::{CallOutcome, load_method_calls, run_method_calls};
pub use dispatcher::{
    ARG_IMAGE_FILE_PATH, ARG_SOURCE, ARG_THUMB_FILE_PATH, ARG_THUMBNAIL_FORMAT,
    ARG_THUMBNAIL_QUALITY, ARG_VIDEO_FILE_PATH, METHOD_GENERATE_IMAGE_THUMBNAIL,
    METHOD_GENERATE_VIDEO_THUMBNAIL, METHOD_PICK_IMAGE, METHOD_PICK_VIDEO, MethodDispatcher,
    PickSource,
};
pub use method_call::{ArgumentError, MethodCall, MethodResponse};
