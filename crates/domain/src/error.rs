//! # ドメイン層エラー定義
//!
//! 値オブジェクトの生成時に発生するルール違反を表現するエラー型。
//!
//! 呼び出し側（ユースケース層）でパラメータエラーに変換して扱う。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値がビジネスルールに違反している場合に使用する。
    ///
    /// # 例
    ///
    /// - 必須フィールドが未入力
    /// - 文字数制限の超過
    /// - 不正なフォーマット
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}
