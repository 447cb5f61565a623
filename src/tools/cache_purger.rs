use log::{debug, warn};
use std::fs;
use std::io;
use std::path::Path;

/// 清除結果統計
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PurgeReport {
    pub removed: usize,
    pub failed: usize,
}

/// 刪除資料夾中直接包含的檔案（不處理子資料夾）
///
/// 資料夾不存在時回傳空統計；單一檔案刪除失敗只記錄警告
pub fn purge_directory_files(directory: &Path) -> io::Result<PurgeReport> {
    let mut report = PurgeReport::default();

    if !directory.is_dir() {
        return Ok(report);
    }

    for entry in fs::read_dir(directory)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("無法讀取 {} 的項目: {e}", directory.display());
                report.failed += 1;
                continue;
            }
        };

        if !entry.file_type().is_ok_and(|t| t.is_file()) {
            continue;
        }

        match fs::remove_file(entry.path()) {
            Ok(()) => report.removed += 1,
            Err(e) => {
                warn!("無法刪除快取檔案 {}: {e}", entry.path().display());
                report.failed += 1;
            }
        }
    }

    debug!(
        "已清除 {}: 刪除 {} 個，失敗 {} 個",
        directory.display(),
        report.removed,
        report.failed
    );

    Ok(report)
}
