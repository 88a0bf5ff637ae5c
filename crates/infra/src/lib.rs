//! # AuthFlow インフラ層
//!
//! 認証ユースケースが依存する外部機能の具体的な実装を提供する。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **リポジトリ実装**: アカウントの読み込み・追加
//! - **パスワード**: Argon2id によるハッシュ化と照合
//! - **トークン**: JWT アクセストークンの発行
//! - **メールアドレス**: 書式検証
//!
//! ## 依存関係
//!
//! ```text
//! auth-service → infra → domain
//! ```
//!
//! ユースケースは各機能をトレイト経由で受け取るため、
//! テストではスタブやインメモリ実装に差し替えられる。
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`email`] - メールアドレス書式検証
//! - [`error`] - インフラ層エラー定義
//! - [`password`] - パスワードのハッシュ化と照合
//! - [`repository`] - リポジトリ実装
//! - [`token`] - アクセストークン発行

pub mod db;
pub mod email;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod password;
pub mod repository;
pub mod token;

pub use email::{EmailValidator, SyntaxEmailValidator};
pub use error::InfraError;
pub use password::{Argon2PasswordChecker, Argon2PasswordHasher, PasswordChecker, PasswordHasher};
pub use token::{JwtTokenIssuer, TokenIssuer};
