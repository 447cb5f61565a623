use crate::tools::{
    FrameExtractor, ThumbnailFormat, ThumbnailMaterializer, ThumbnailRequest, derive_base_name,
};
use indicatif::ProgressBar;
use log::{error, warn};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// 單一檔案的處理結果
#[derive(Debug)]
pub struct BatchItemResult {
    pub source: PathBuf,
    pub output: Option<PathBuf>,
    pub error_message: Option<String>,
}

/// 批次處理統計
#[derive(Debug, Default)]
pub struct BatchResult {
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
    pub items: Vec<BatchItemResult>,
}

/// 批次輸出設定
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub output_directory: PathBuf,
    /// 設定時，位於此資料夾下的來源會在輸出資料夾中保留相同的子資料夾結構
    pub source_root: Option<PathBuf>,
    pub format: ThumbnailFormat,
    pub quality: u8,
}

impl BatchOptions {
    #[must_use]
    pub fn output_directory_for(&self, source: &Path) -> PathBuf {
        let relative = self
            .source_root
            .as_deref()
            .and_then(|root| source.parent()?.strip_prefix(root).ok());

        match relative {
            Some(relative) => self.output_directory.join(relative),
            None => self.output_directory.clone(),
        }
    }

    #[must_use]
    pub fn output_path_for(&self, source: &Path) -> PathBuf {
        let base_name = derive_base_name(&source.to_string_lossy());
        self.output_directory_for(source)
            .join(format!("{base_name}.{}", self.format.extension()))
    }
}

/// 每個來源的處理計畫
enum BatchPlan<'a> {
    Generate { source: &'a Path, directory: PathBuf },
    /// 輸出路徑已被較早的來源使用
    Conflict { source: &'a Path, output: PathBuf, owner: &'a Path },
}

/// 依輸入順序決定輸出位置；同一路徑只保留給第一個來源
fn plan_outputs<'a>(sources: &'a [PathBuf], options: &BatchOptions) -> Vec<BatchPlan<'a>> {
    let mut owners: HashMap<PathBuf, &'a Path> = HashMap::new();

    sources
        .iter()
        .map(|source| {
            let output = options.output_path_for(source);
            match owners.get(&output) {
                Some(&owner) => BatchPlan::Conflict {
                    source,
                    output,
                    owner,
                },
                None => {
                    owners.insert(output, source);
                    BatchPlan::Generate {
                        source,
                        directory: options.output_directory_for(source),
                    }
                }
            }
        })
        .collect()
}

/// 平行產生縮圖，一律寫入指定的輸出資料夾（不使用快取資料夾）
///
/// 輸出路徑相同的來源只有第一個會產生，其餘記為失敗
pub fn generate_batch<E>(
    materializer: &ThumbnailMaterializer,
    extractor: &E,
    sources: &[PathBuf],
    options: &BatchOptions,
    shutdown_signal: &AtomicBool,
    progress: &ProgressBar,
) -> BatchResult
where
    E: FrameExtractor + ?Sized,
{
    let plans = plan_outputs(sources, options);

    let items: Vec<Option<BatchItemResult>> = plans
        .par_iter()
        .map(|plan| {
            if shutdown_signal.load(Ordering::SeqCst) {
                return None;
            }

            let item = match plan {
                BatchPlan::Generate { source, directory } => {
                    generate_one(materializer, extractor, source, directory, options)
                }
                BatchPlan::Conflict {
                    source,
                    output,
                    owner,
                } => {
                    warn!(
                        "輸出檔名衝突，略過 {}: {} 已由 {} 使用",
                        source.display(),
                        output.display(),
                        owner.display()
                    );
                    BatchItemResult {
                        source: source.to_path_buf(),
                        output: None,
                        error_message: Some(format!(
                            "output {} is already used by {}",
                            output.display(),
                            owner.display()
                        )),
                    }
                }
            };
            progress.inc(1);
            Some(item)
        })
        .collect();

    let mut result = BatchResult::default();
    for item in items {
        match item {
            None => result.skipped += 1,
            Some(item) => {
                if item.output.is_some() {
                    result.successful += 1;
                } else {
                    result.failed += 1;
                }
                result.items.push(item);
            }
        }
    }

    result
}

fn generate_one<E>(
    materializer: &ThumbnailMaterializer,
    extractor: &E,
    source: &Path,
    directory: &Path,
    options: &BatchOptions,
) -> BatchItemResult
where
    E: FrameExtractor + ?Sized,
{
    let request = ThumbnailRequest::new(
        source.to_string_lossy(),
        Some(directory.to_path_buf()),
        options.format,
        options.quality,
    );

    match materializer.materialize(extractor, &request) {
        Ok(path) => BatchItemResult {
            source: source.to_path_buf(),
            output: Some(path),
            error_message: None,
        },
        Err(e) => {
            error!("縮圖產生失敗 {}: {e}", source.display());
            BatchItemResult {
                source: source.to_path_buf(),
                output: None,
                error_message: Some(e.to_string()),
            }
        }
    }
}
