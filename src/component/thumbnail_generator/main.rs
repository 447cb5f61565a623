use crate::component::prompts::{
    prompt_format, prompt_optional_output_dir, prompt_path_with_history, prompt_quality,
};
use crate::config::Config;
use crate::config::save::{add_recent_path, save_settings};
use crate::tools::{
    FfmpegFrameExtractor, FrameExtractor, ImageFileFrameExtractor, ThumbnailMaterializer,
    ThumbnailRequest, validate_file_exists,
};
use anyhow::Result;
use console::style;
use log::warn;
use rust_i18n::t;
use std::path::{Path, PathBuf};

/// 縮圖來源類型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Image,
}

/// 單一檔案縮圖產生元件
pub struct ThumbnailGenerator {
    config: Config,
    kind: MediaKind,
}

impl ThumbnailGenerator {
    pub const fn new(config: Config, kind: MediaKind) -> Self {
        Self { config, kind }
    }

    pub fn run(&self) -> Result<()> {
        let title = match self.kind {
            MediaKind::Video => t!("thumbnail.title_video"),
            MediaKind::Image => t!("thumbnail.title_image"),
        };
        println!("{}", style(title).cyan().bold());

        let prompt = match self.kind {
            MediaKind::Video => t!("thumbnail.prompt_video"),
            MediaKind::Image => t!("thumbnail.prompt_image"),
        };
        let Some(source_path) = prompt_path_with_history(&self.config, &prompt)? else {
            return Ok(());
        };
        validate_file_exists(Path::new(&source_path))?;
        self.remember_path(&source_path);

        let output_directory = prompt_optional_output_dir()?;

        let defaults = &self.config.settings.thumbnail;
        let Some(format) = prompt_format(defaults.default_format)? else {
            return Ok(());
        };
        let quality = prompt_quality(format, defaults.default_quality)?;

        let request = ThumbnailRequest::new(
            source_path,
            output_directory.map(PathBuf::from),
            format,
            quality,
        );

        let materializer = ThumbnailMaterializer::new(defaults.cache_config())
            .with_size_class(defaults.size_class);

        let extractor: Box<dyn FrameExtractor> = match self.kind {
            MediaKind::Video => Box::new(FfmpegFrameExtractor::new()),
            MediaKind::Image => Box::new(ImageFileFrameExtractor),
        };

        println!("{}", style(t!("thumbnail.generating")).dim());
        let path = materializer.materialize(extractor.as_ref(), &request)?;

        println!(
            "\n{} {}",
            style(t!("thumbnail.done")).green().bold(),
            path.display()
        );

        Ok(())
    }

    fn remember_path(&self, path: &str) {
        let mut settings = self.config.settings.clone();
        add_recent_path(&mut settings, path);
        if let Err(e) = save_settings(&settings) {
            warn!("無法儲存路徑歷史: {e}");
        }
    }
}
