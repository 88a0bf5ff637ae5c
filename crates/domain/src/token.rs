//! # アクセストークン
//!
//! 認証成功時に呼び出し元へ返す不透明な文字列。
//! ドメイン層は中身の構造（JWT かどうか等）を関知しない。

use std::fmt;

use serde::{Deserialize, Serialize};

/// アクセストークン
///
/// JSON には文字列としてそのまま出力される。
/// Debug 出力では値をマスクする。
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
