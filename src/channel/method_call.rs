use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// 一次 method channel 呼叫
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    /// 字串參數；缺少或為 `null` 時回傳 `None`
    pub fn string_argument(&self, key: &str) -> Result<Option<&str>, ArgumentError> {
        match self.arguments.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(ArgumentError::wrong_type(key, "string", other)),
        }
    }

    /// 必要的整數參數
    pub fn int_argument(&self, key: &str) -> Result<i64, ArgumentError> {
        match self.arguments.get(key) {
            None | Some(Value::Null) => Err(ArgumentError::Missing(key.to_string())),
            Some(value) => value
                .as_i64()
                .ok_or_else(|| ArgumentError::wrong_type(key, "integer", value)),
        }
    }
}

/// 參數型別錯誤
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("missing argument `{0}`")]
    Missing(String),

    #[error("argument `{key}` must be a {expected}, got {actual}")]
    WrongType {
        key: String,
        expected: &'static str,
        actual: String,
    },
}

impl ArgumentError {
    fn wrong_type(key: &str, expected: &'static str, actual: &Value) -> Self {
        Self::WrongType {
            key: key.to_string(),
            expected,
            actual: actual.to_string(),
        }
    }
}

/// 呼叫結果，對應 method channel 的 success / error / notImplemented
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodResponse {
    Success { value: Value },
    Error { code: String, message: String },
    NotImplemented,
}

impl MethodResponse {
    pub fn success(value: impl Into<Value>) -> Self {
        Self::Success {
            value: value.into(),
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Error { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }
}
