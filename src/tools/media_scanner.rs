use crate::config::FileTypeTable;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct MediaFileInfo {
    pub path: PathBuf,
    pub size: u64,
}

/// 遞迴掃描影片檔案，按大小排序（由小到大）
#[must_use]
pub fn scan_video_files(directory: &Path, file_type_table: &FileTypeTable) -> Vec<MediaFileInfo> {
    scan_matching_files(directory, |path| file_type_table.is_video_file(path))
}

/// 遞迴掃描圖片檔案，按大小排序（由小到大）
#[must_use]
pub fn scan_image_files(directory: &Path, file_type_table: &FileTypeTable) -> Vec<MediaFileInfo> {
    scan_matching_files(directory, |path| file_type_table.is_image_file(path))
}

fn scan_matching_files(directory: &Path, matches: impl Fn(&Path) -> bool) -> Vec<MediaFileInfo> {
    let mut files: Vec<MediaFileInfo> = WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| matches(entry.path()))
        .filter_map(|entry| {
            let metadata = entry.metadata().ok()?;
            Some(MediaFileInfo {
                path: entry.into_path(),
                size: metadata.len(),
            })
        })
        .collect();

    files.sort_by_key(|file| file.size);
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_video_files_filters_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested");
        fs::create_dir(&nested).unwrap();

        fs::write(temp_dir.path().join("big.MP4"), vec![0u8; 300]).unwrap();
        fs::write(nested.join("small.mkv"), vec![0u8; 10]).unwrap();
        fs::write(temp_dir.path().join("notes.txt"), b"text").unwrap();
        fs::write(temp_dir.path().join("photo.jpg"), b"jpg").unwrap();

        let table = Config::load_embedded_file_type_table().unwrap();
        let files = scan_video_files(temp_dir.path(), &table);

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, nested.join("small.mkv"));
        assert_eq!(files[1].size, 300);
    }

    #[test]
    fn test_scan_image_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("photo.jpg"), b"jpg").unwrap();
        fs::write(temp_dir.path().join("clip.mp4"), b"mp4").unwrap();

        let table = Config::load_embedded_file_type_table().unwrap();
        let files = scan_image_files(temp_dir.path(), &table);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, temp_dir.path().join("photo.jpg"));
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let table = Config::load_embedded_file_type_table().unwrap();
        assert!(scan_video_files(temp_dir.path(), &table).is_empty());
    }
}
