//! # パスワード
//!
//! ログイン・サインアップで受け取る平文パスワードと、保存用ハッシュを表す。
//!
//! | 型 | 用途 |
//! |---|------|
//! | [`PlainPassword`] | リクエストで受け取った入力値 |
//! | [`PasswordHash`] | アカウントに保存される PHC 形式のハッシュ |
//! | [`PasswordVerifyResult`] | 照合結果 |

use std::fmt;

/// 平文パスワード
///
/// Debug 出力では値をマスクする。ログにスパンとして出力されても漏れない。
#[derive(Clone, PartialEq, Eq)]
pub struct PlainPassword(String);

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainPassword([REDACTED])")
    }
}

impl PlainPassword {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 未入力かどうか
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// パスワードハッシュ
///
/// 形式（Argon2id など）はこの型では解釈しない。照合はインフラ層の責務。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// パスワード照合結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVerifyResult {
    Match,
    Mismatch,
}

impl PasswordVerifyResult {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }

    pub fn is_mismatch(&self) -> bool {
        !self.is_match()
    }
}

impl From<bool> for PasswordVerifyResult {
    fn from(matched: bool) -> Self {
        if matched { Self::Match } else { Self::Mismatch }
    }
}
