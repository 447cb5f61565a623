use crate::component::MediaKind;
use crate::config::save::save_settings;
use crate::config::types::{Config, Language};
use crate::menu::handlers::{run_batch_generator, run_method_call_runner, run_thumbnail_generator};
use crate::tools::{CachePurgeMode, SizeClass, ThumbnailFormat};
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use rust_i18n::t;
use std::fmt::Display;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style(t!("main_menu.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let options = vec![
        t!("main_menu.opt_video"),
        t!("main_menu.opt_image"),
        t!("main_menu.opt_batch"),
        t!("main_menu.opt_runner"),
        t!("main_menu.opt_settings"),
        t!("main_menu.exit"),
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("main_menu.prompt"))
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_thumbnail_generator(term, config, MediaKind::Video)?;
            Ok(true)
        }
        Some(1) => {
            run_thumbnail_generator(term, config, MediaKind::Image)?;
            Ok(true)
        }
        Some(2) => {
            run_batch_generator(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(3) => {
            run_method_call_runner(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(4) => {
            show_settings_menu(term, config)?;
            Ok(true)
        }
        Some(5) | None => Ok(false), // ESC pressed - exit
        _ => unreachable!(),
    }
}

/// 設定選單
fn show_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    loop {
        term.clear_screen()?;

        println!("{}", style(t!("settings.title")).cyan().bold());
        println!("{}", style(t!("common.esc_hint")).dim());

        let options = vec![
            t!("settings.opt_format"),
            t!("settings.opt_quality"),
            t!("settings.opt_size"),
            t!("settings.opt_purge"),
            t!("settings.opt_language"),
            t!("settings.back"),
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("settings.prompt"))
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            Some(0) => show_format_menu(term, config)?,
            Some(1) => show_quality_input(term, config)?,
            Some(2) => show_size_class_menu(term, config)?,
            Some(3) => show_purge_mode_menu(term, config)?,
            Some(4) => show_language_menu(term, config)?,
            Some(5) | None => break, // ESC or back
            _ => unreachable!(),
        }
    }

    Ok(())
}

/// 顯示選項並回傳選擇的值；ESC 回傳 `None`
fn select_setting<T: Copy + PartialEq>(
    term: &Term,
    title: &str,
    current: &dyn Display,
    values: &[T],
    labels: &[String],
    selected: T,
) -> Result<Option<T>> {
    term.clear_screen()?;

    println!("{}", style(title).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());
    println!("\n{} {}", style(t!("settings.current")).dim(), current);
    println!();

    let default_index = values.iter().position(|&v| v == selected).unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.select_prompt"))
        .items(labels)
        .default(default_index)
        .interact_on_opt(term)?;

    Ok(selection.map(|idx| values[idx]))
}

fn announce_saved(value: &dyn Display) {
    println!("\n{} {}", style(t!("settings.saved")).green(), value);
    std::thread::sleep(std::time::Duration::from_secs(1));
}

/// 預設輸出格式
fn show_format_menu(term: &Term, config: &mut Config) -> Result<()> {
    let current = config.settings.thumbnail.default_format;
    let labels: Vec<String> = ThumbnailFormat::ALL.iter().map(ToString::to_string).collect();

    let Some(selected) = select_setting(
        term,
        &t!("settings.format.title"),
        &current,
        &ThumbnailFormat::ALL,
        &labels,
        current,
    )?
    else {
        return Ok(());
    };

    if selected != current {
        config.settings.thumbnail.default_format = selected;
        save_settings(&config.settings)?;
        announce_saved(&selected);
    }

    Ok(())
}

/// 預設品質
fn show_quality_input(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;
    println!("{}", style(t!("settings.quality.title")).cyan().bold());

    let current = config.settings.thumbnail.default_quality;
    let quality: u8 = Input::new()
        .with_prompt(t!("prompt.quality"))
        .default(current)
        .validate_with(|value: &u8| -> std::result::Result<(), String> {
            if *value <= 100 {
                Ok(())
            } else {
                Err(t!("prompt.quality_range").to_string())
            }
        })
        .interact_text_on(term)?;

    if quality != current {
        config.settings.thumbnail.default_quality = quality;
        save_settings(&config.settings)?;
        announce_saved(&quality);
    }

    Ok(())
}

/// 縮圖尺寸
fn show_size_class_menu(term: &Term, config: &mut Config) -> Result<()> {
    let current = config.settings.thumbnail.size_class;
    let values = [SizeClass::Mini, SizeClass::Micro];
    let labels: Vec<String> = values.iter().map(ToString::to_string).collect();

    let Some(selected) = select_setting(
        term,
        &t!("settings.size.title"),
        &current,
        &values,
        &labels,
        current,
    )?
    else {
        return Ok(());
    };

    if selected != current {
        config.settings.thumbnail.size_class = selected;
        save_settings(&config.settings)?;
        announce_saved(&selected);
    }

    Ok(())
}

/// 快取清除模式
fn show_purge_mode_menu(term: &Term, config: &mut Config) -> Result<()> {
    let current = config.settings.thumbnail.purge_mode;
    let values = [CachePurgeMode::ThumbDirectory, CachePurgeMode::LegacyTempFiles];
    let labels = vec![
        t!("settings.purge.thumb_directory").to_string(),
        t!("settings.purge.legacy_temp_files").to_string(),
    ];

    let title = t!(
        "settings.purge.title",
        path = config.settings.thumbnail.cache_root().display()
    );

    let Some(selected) = select_setting(
        term,
        &title,
        &current,
        &values,
        &labels,
        current,
    )?
    else {
        return Ok(());
    };

    if selected != current {
        config.settings.thumbnail.purge_mode = selected;
        save_settings(&config.settings)?;
        announce_saved(&selected);
    }

    Ok(())
}

/// 語言設定選單
fn show_language_menu(term: &Term, config: &mut Config) -> Result<()> {
    let current = config.settings.language;
    let labels: Vec<String> = Language::ALL.iter().map(ToString::to_string).collect();

    let Some(selected) = select_setting(
        term,
        &t!("settings.language.title"),
        &current,
        &Language::ALL,
        &labels,
        current,
    )?
    else {
        return Ok(());
    };

    if selected != current {
        config.settings.language = selected;
        rust_i18n::set_locale(selected.as_str());
        save_settings(&config.settings)?;
        announce_saved(&selected);
    }

    Ok(())
}
