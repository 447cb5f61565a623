use crate::component::{BatchThumbnailGenerator, MediaKind, MethodCallRunner, ThumbnailGenerator};
use crate::config::Config;
use crate::config::load::SETTINGS_FILE;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use log::warn;
use rust_i18n::t;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

fn report_error(e: &anyhow::Error) {
    eprintln!("{} {:#}", style(t!("common.error_prefix")).red().bold(), e);
}

/// 元件會自行儲存路徑歷史，這裡同步回記憶體中的設定
fn refresh_recent_paths(config: &mut Config) {
    match Config::load_settings(Path::new(SETTINGS_FILE)) {
        Ok(settings) => config.settings.recent_paths = settings.recent_paths,
        Err(e) => warn!("無法重新載入設定: {e:#}"),
    }
}

pub fn run_thumbnail_generator(term: &Term, config: &mut Config, kind: MediaKind) -> Result<()> {
    let generator = ThumbnailGenerator::new(config.clone(), kind);

    if let Err(e) = generator.run() {
        report_error(&e);
    }

    refresh_recent_paths(config);
    pause(term)?;
    Ok(())
}

pub fn run_batch_generator(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let generator = BatchThumbnailGenerator::new(config.clone(), Arc::clone(shutdown_signal));

    if let Err(e) = generator.run() {
        report_error(&e);
    }

    refresh_recent_paths(config);
    pause(term)?;
    Ok(())
}

pub fn run_method_call_runner(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let runner = MethodCallRunner::new(config.clone(), Arc::clone(shutdown_signal));

    if let Err(e) = runner.run() {
        report_error(&e);
    }

    refresh_recent_paths(config);
    pause(term)?;
    Ok(())
}
