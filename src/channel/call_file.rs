use super::dispatcher::MethodDispatcher;
use super::method_call::{MethodCall, MethodResponse};
use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// 單筆呼叫與其結果
#[derive(Debug, Clone, Serialize)]
pub struct CallOutcome {
    pub method: String,
    pub response: MethodResponse,
}

/// 讀取 JSON 檔中的呼叫清單（陣列或單一物件）
pub fn load_method_calls(path: &Path) -> Result<Vec<MethodCall>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("無法讀取呼叫檔案: {}", path.display()))?;

    if content.trim_start().starts_with('[') {
        serde_json::from_str(&content)
            .with_context(|| format!("無法解析呼叫清單: {}", path.display()))
    } else {
        let call: MethodCall = serde_json::from_str(&content)
            .with_context(|| format!("無法解析呼叫: {}", path.display()))?;
        Ok(vec![call])
    }
}

/// 依序執行呼叫，收到中斷信號時停止
pub fn run_method_calls(
    dispatcher: &MethodDispatcher,
    calls: &[MethodCall],
    shutdown_signal: &AtomicBool,
) -> Vec<CallOutcome> {
    let mut outcomes = Vec::with_capacity(calls.len());

    for call in calls {
        if shutdown_signal.load(Ordering::SeqCst) {
            info!("收到中斷信號，剩餘 {} 筆呼叫未執行", calls.len() - outcomes.len());
            break;
        }

        outcomes.push(CallOutcome {
            method: call.method.clone(),
            response: dispatcher.dispatch(call),
        });
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{CacheConfig, ThumbnailMaterializer};
    use tempfile::TempDir;

    #[test]
    fn test_load_array_and_single_object() {
        let temp_dir = TempDir::new().unwrap();

        let array_path = temp_dir.path().join("calls.json");
        fs::write(
            &array_path,
            r#"[{"method":"pickImage","arguments":{"source":0}},{"method":"pickVideo"}]"#,
        )
        .unwrap();
        let calls = load_method_calls(&array_path).unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].method, "pickVideo");

        let single_path = temp_dir.path().join("call.json");
        fs::write(&single_path, r#"  {"method":"pickImage"}"#).unwrap();
        assert_eq!(load_method_calls(&single_path).unwrap().len(), 1);
    }

    #[test]
    fn test_load_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "[{").unwrap();
        assert!(load_method_calls(&path).is_err());
        assert!(load_method_calls(&temp_dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_run_stops_on_shutdown() {
        let temp_dir = TempDir::new().unwrap();
        let dispatcher =
            MethodDispatcher::new(ThumbnailMaterializer::new(CacheConfig::new(temp_dir.path())));
        let calls: Vec<MethodCall> =
            serde_json::from_str(r#"[{"method":"unknown"},{"method":"unknown"}]"#).unwrap();

        let outcomes = run_method_calls(&dispatcher, &calls, &AtomicBool::new(false));
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].response.error_code(), Some("unknown_method"));

        let outcomes = run_method_calls(&dispatcher, &calls, &AtomicBool::new(true));
        assert!(outcomes.is_empty());
    }
}
