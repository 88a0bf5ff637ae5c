//! # Auth Service エラー定義
//!
//! ユースケースが返すエラーを定義する。
//!
//! `MissingParam` / `InvalidParam` は入力不足に加えて、ユースケースの組み立て不備
//! （リポジトリ未注入など）も表す。ルーターはどのエラーも 500 に変換するため、
//! HTTP レスポンスへの変換はここでは行わない。

use authflow_infra::InfraError;
use thiserror::Error;

/// ユースケースで発生するエラー
#[derive(Debug, Error)]
pub enum AuthError {
    /// 必須パラメータ（または協調オブジェクト）が未指定
    #[error("Missing param: {0}")]
    MissingParam(&'static str),

    /// パラメータ（または協調オブジェクト）が不正
    #[error("Invalid param: {0}")]
    InvalidParam(&'static str),

    /// インフラ層のエラー
    #[error("インフラエラー: {0}")]
    Infra(#[from] InfraError),
}

impl AuthError {
    /// ログの `error.category` に出力する分類
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingParam(_) | Self::InvalidParam(_) => "configuration",
            Self::Infra(_) => "infrastructure",
        }
    }
}
