//! 元件共用的輸入提示

use crate::config::Config;
use crate::tools::ThumbnailFormat;
use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use rust_i18n::t;
use std::path::Path;

/// 從最近使用的路徑中選擇，或輸入新路徑；ESC 回傳 `None`
pub fn prompt_path_with_history(config: &Config, prompt: &str) -> Result<Option<String>> {
    let recent_paths = &config.settings.recent_paths;

    if recent_paths.is_empty() {
        let path: String = Input::new().with_prompt(prompt).interact_text()?;
        return Ok(Some(path.trim().to_string()));
    }

    let mut options: Vec<String> = recent_paths
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let indicator = if Path::new(p).exists() { "✓" } else { "✗" };
            format!("{} [{}] {}", i + 1, indicator, p)
        })
        .collect();
    options.push(t!("prompt.new_path").to_string());

    println!("{}", style(t!("common.esc_hint")).dim());

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("prompt.select_path"))
        .items(&options)
        .default(0)
        .interact_opt()?;

    match selection {
        None => Ok(None),
        Some(idx) if idx < recent_paths.len() => Ok(Some(recent_paths[idx].clone())),
        Some(_) => {
            let path: String = Input::new().with_prompt(prompt).interact_text()?;
            Ok(Some(path.trim().to_string()))
        }
    }
}

/// 輸出資料夾，留空表示使用快取資料夾
pub fn prompt_optional_output_dir() -> Result<Option<String>> {
    let path: String = Input::new()
        .with_prompt(t!("prompt.output_dir_optional"))
        .allow_empty(true)
        .interact_text()?;

    let path = path.trim();
    Ok((!path.is_empty()).then(|| path.to_string()))
}

pub fn prompt_required_output_dir() -> Result<String> {
    let path: String = Input::new()
        .with_prompt(t!("prompt.output_dir"))
        .interact_text()?;
    Ok(path.trim().to_string())
}

/// 選擇輸出格式；ESC 回傳 `None`
pub fn prompt_format(default: ThumbnailFormat) -> Result<Option<ThumbnailFormat>> {
    let items: Vec<String> = ThumbnailFormat::ALL
        .iter()
        .map(ToString::to_string)
        .collect();

    let default_index = ThumbnailFormat::ALL
        .iter()
        .position(|&f| f == default)
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("prompt.format"))
        .items(&items)
        .default(default_index)
        .interact_opt()?;

    Ok(selection.map(|idx| ThumbnailFormat::ALL[idx]))
}

/// 輸入品質（0-100）；PNG 與 WebP 不使用品質參數，直接回傳預設值
pub fn prompt_quality(format: ThumbnailFormat, default: u8) -> Result<u8> {
    if !format.is_lossy() {
        return Ok(default.min(100));
    }

    let quality: u8 = Input::new()
        .with_prompt(t!("prompt.quality"))
        .default(default.min(100))
        .validate_with(|value: &u8| -> std::result::Result<(), String> {
            if *value <= 100 {
                Ok(())
            } else {
                Err(t!("prompt.quality_range").to_string())
            }
        })
        .interact_text()?;
    Ok(quality)
}
