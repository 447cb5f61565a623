use super::batch_runner::{BatchOptions, BatchResult, generate_batch};
use crate::component::prompts::{
    prompt_format, prompt_path_with_history, prompt_quality, prompt_required_output_dir,
};
use crate::config::Config;
use crate::config::save::{add_recent_path, save_settings};
use crate::tools::{
    FfmpegFrameExtractor, ThumbnailMaterializer, scan_video_files, validate_directory_exists,
};
use anyhow::Result;
use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rust_i18n::t;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 資料夾批次縮圖產生元件
pub struct BatchThumbnailGenerator {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl BatchThumbnailGenerator {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style(t!("batch.title")).cyan().bold());

        let Some(input_path) = prompt_path_with_history(&self.config, &t!("batch.prompt_input"))?
        else {
            return Ok(());
        };
        let input_dir = PathBuf::from(&input_path);
        validate_directory_exists(&input_dir)?;

        {
            let mut settings = self.config.settings.clone();
            add_recent_path(&mut settings, &input_path);
            if let Err(e) = save_settings(&settings) {
                warn!("無法儲存路徑歷史: {e}");
            }
        }

        let output_dir = PathBuf::from(prompt_required_output_dir()?);

        println!("{}", style(t!("batch.scanning")).dim());
        let videos = scan_video_files(&input_dir, &self.config.file_type_table);
        if videos.is_empty() {
            println!("{}", style(t!("batch.no_videos")).yellow());
            return Ok(());
        }
        println!(
            "{}",
            style(t!("batch.found", count = videos.len())).green()
        );

        let defaults = &self.config.settings.thumbnail;
        let Some(format) = prompt_format(defaults.default_format)? else {
            return Ok(());
        };
        let quality = prompt_quality(format, defaults.default_quality)?;

        let confirmed = Confirm::new()
            .with_prompt(t!("batch.confirm"))
            .default(true)
            .interact()?;
        if !confirmed {
            println!("{}", style(t!("common.cancelled")).yellow());
            return Ok(());
        }

        let sources: Vec<PathBuf> = videos.into_iter().map(|video| video.path).collect();
        let options = BatchOptions {
            output_directory: output_dir,
            source_root: Some(input_dir),
            format,
            quality,
        };
        let materializer = ThumbnailMaterializer::new(defaults.cache_config())
            .with_size_class(defaults.size_class);

        let progress_bar = ProgressBar::new(sources.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        progress_bar.set_message(t!("batch.progress").to_string());

        let result = generate_batch(
            &materializer,
            &FfmpegFrameExtractor::new(),
            &sources,
            &options,
            &self.shutdown_signal,
            &progress_bar,
        );

        if self.shutdown_signal.load(Ordering::SeqCst) {
            progress_bar.abandon_with_message(t!("common.interrupted").to_string());
        } else {
            progress_bar.finish_with_message(t!("common.done").to_string());
        }

        info!(
            "批次縮圖完成: 成功 {} 失敗 {} 跳過 {}",
            result.successful, result.failed, result.skipped
        );
        self.display_summary(&result);

        Ok(())
    }

    fn display_summary(&self, result: &BatchResult) {
        println!();
        println!("{}", style(t!("batch.summary_title")).cyan().bold());
        println!(
            "  {} {}",
            t!("batch.summary_success"),
            style(result.successful).green()
        );
        if result.failed > 0 {
            println!(
                "  {} {}",
                t!("batch.summary_failed"),
                style(result.failed).red()
            );
            for item in result.items.iter().filter(|item| item.output.is_none()) {
                println!(
                    "    {} {}",
                    style(item.source.display()).dim(),
                    item.error_message.as_deref().unwrap_or_default()
                );
            }
        }
        if result.skipped > 0 {
            println!(
                "  {} {}",
                t!("batch.summary_skipped"),
                style(result.skipped).yellow()
            );
        }
    }
}
