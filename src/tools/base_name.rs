//! 由來源路徑推導縮圖檔名

use percent_encoding::percent_decode_str;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

const FILE_URI_PREFIX: &str = "file://";

/// 最後一個副檔名，且點號前至少要有一個字元（`.hidden` 不視為副檔名）
static REGEX_TRAILING_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)\.[^./]+$").expect("Invalid regex"));

/// 將來源轉為本機路徑
///
/// `file://` URI 會去除前綴並解碼 `%XX`；一般路徑原樣返回
#[must_use]
pub fn resolve_source_path(source: &str) -> Cow<'_, str> {
    match source.strip_prefix(FILE_URI_PREFIX) {
        Some(path) => percent_decode_str(path).decode_utf8_lossy(),
        None => Cow::Borrowed(source),
    }
}

/// 取得路徑最後一段，忽略結尾的分隔符號
#[must_use]
pub fn last_path_segment(path: &str) -> Option<&str> {
    path.split('/').rev().find(|segment| !segment.is_empty())
}

/// 移除最後一個副檔名
///
/// `movie.mp4` → `movie`，`archive.tar.gz` → `archive.tar`，
/// `noext` 與 `.hidden` 維持不變
#[must_use]
pub fn strip_extension(name: &str) -> &str {
    REGEX_TRAILING_EXTENSION
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map_or(name, |stem| stem.as_str())
}

/// 推導縮圖的基本檔名；來源沒有可用的路徑段時回傳空字串
#[must_use]
pub fn derive_base_name(source: &str) -> String {
    let path = resolve_source_path(source);
    last_path_segment(&path)
        .map(strip_extension)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_base_name_simple() {
        assert_eq!(derive_base_name("movie.mp4"), "movie");
    }

    #[test]
    fn test_derive_base_name_only_final_extension() {
        assert_eq!(derive_base_name("archive.tar.gz"), "archive.tar");
    }

    #[test]
    fn test_derive_base_name_no_extension() {
        assert_eq!(derive_base_name("noext"), "noext");
    }

    #[test]
    fn test_derive_base_name_leading_dot_kept() {
        assert_eq!(derive_base_name(".hidden"), ".hidden");
        assert_eq!(derive_base_name("/videos/.hidden"), ".hidden");
    }

    #[test]
    fn test_derive_base_name_uses_last_segment() {
        assert_eq!(derive_base_name("/sdcard/DCIM/clip.v2.mov"), "clip.v2");
        assert_eq!(derive_base_name("/sdcard/DCIM/clip/"), "clip");
    }

    #[test]
    fn test_derive_base_name_dotted_directory() {
        assert_eq!(derive_base_name("/media/v1.0/raw"), "raw");
    }

    #[test]
    fn test_derive_base_name_file_uri() {
        assert_eq!(derive_base_name("file:///storage/movie.mp4"), "movie");
    }

    #[test]
    fn test_derive_base_name_decodes_file_uri() {
        assert_eq!(derive_base_name("file:///storage/My%20Movie.mp4"), "My Movie");
        assert_eq!(derive_base_name("file:///storage/%E5%BD%B1%E7%89%87.mkv"), "影片");
    }

    #[test]
    fn test_plain_path_is_not_decoded() {
        assert_eq!(derive_base_name("/videos/100%20.mp4"), "100%20");
        assert_eq!(resolve_source_path("/videos/a%20b.mp4"), "/videos/a%20b.mp4");
        assert_eq!(resolve_source_path("file:///videos/a%20b.mp4"), "/videos/a b.mp4");
    }

    #[test]
    fn test_derive_base_name_trailing_dot() {
        assert_eq!(derive_base_name("name."), "name.");
    }

    #[test]
    fn test_derive_base_name_empty() {
        assert_eq!(derive_base_name(""), "");
        assert_eq!(derive_base_name("/"), "");
    }
}
