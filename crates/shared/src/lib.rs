//! # AuthFlow 共有ユーティリティ
//!
//! サービス全体で使用される、ビジネスロジックを含まないユーティリティ。
//!
//! - [`error_response`] - エラーレスポンスのワイヤ形式
//! - [`health`] - ヘルスチェックのレスポンス型
//! - `observability` / `canonical_log` - トレーシング初期化とリクエストログ
//!   （`observability` feature 有効時のみ）

#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod error_response;
pub mod health;
pub mod observability;

pub use error_response::ErrorResponse;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
