use crate::channel::{
    CallOutcome, MethodDispatcher, MethodResponse, load_method_calls, run_method_calls,
};
use crate::component::prompts::prompt_path_with_history;
use crate::config::Config;
use crate::tools::{ThumbnailMaterializer, validate_file_exists};
use anyhow::Result;
use console::style;
use rust_i18n::t;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// 執行 JSON 檔中的 method channel 呼叫
pub struct MethodCallRunner {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl MethodCallRunner {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style(t!("runner.title")).cyan().bold());

        let Some(path) = prompt_path_with_history(&self.config, &t!("runner.prompt_file"))? else {
            return Ok(());
        };
        let path = PathBuf::from(path);
        validate_file_exists(&path)?;

        let calls = load_method_calls(&path)?;
        println!(
            "{}",
            style(t!("runner.loaded", count = calls.len())).green()
        );

        let thumbnail = &self.config.settings.thumbnail;
        let dispatcher = MethodDispatcher::new(
            ThumbnailMaterializer::new(thumbnail.cache_config())
                .with_size_class(thumbnail.size_class),
        );

        let outcomes = run_method_calls(&dispatcher, &calls, &self.shutdown_signal);
        for (index, outcome) in outcomes.iter().enumerate() {
            Self::print_outcome(index + 1, outcome);
        }

        if outcomes.len() < calls.len() {
            println!(
                "{}",
                style(t!("runner.skipped", count = calls.len() - outcomes.len())).yellow()
            );
        }

        Ok(())
    }

    fn print_outcome(index: usize, outcome: &CallOutcome) {
        let label = style(format!("[{index}] {}", outcome.method)).bold();
        match &outcome.response {
            MethodResponse::Success { value } => {
                println!("{label} {} {value}", style("OK").green());
            }
            MethodResponse::Error { code, message } => {
                println!("{label} {} {message}", style(code).red());
            }
            MethodResponse::NotImplemented => {
                println!("{label} {}", style(t!("runner.not_implemented")).yellow());
            }
        }
    }
}
