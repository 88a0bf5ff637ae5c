//! # エラーレスポンス
//!
//! ログイン・サインアップの失敗時に返すレスポンスボディ。
//!
//! ## 形式
//!
//! | ステータス | `name` | `message` |
//! |-----------|--------|-----------|
//! | 400 | `MissingParamError` | `Missing param: <field>` |
//! | 400 | `InvalidParamError` | `Invalid param: <field>` |
//! | 401 | `UnauthorizedError` | なし |
//! | 500 | `ServerError` | なし |
//!
//! 500 は内部情報を漏らさないため、原因に関わらず同じボディを返す。

use serde::{Deserialize, Serialize};

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub name:    String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    fn new(name: &str, message: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            message,
        }
    }

    /// 必須パラメータが未指定
    pub fn missing_param(field: &str) -> Self {
        Self::new("MissingParamError", Some(format!("Missing param: {field}")))
    }

    /// パラメータの値が不正
    pub fn invalid_param(field: &str) -> Self {
        Self::new("InvalidParamError", Some(format!("Invalid param: {field}")))
    }

    /// 認証失敗
    pub fn unauthorized() -> Self {
        Self::new("UnauthorizedError", None)
    }

    /// 内部エラー
    pub fn server_error() -> Self {
        Self::new("ServerError", None)
    }
}
