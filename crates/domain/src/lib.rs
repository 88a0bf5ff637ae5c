//! # AuthFlow ドメイン層
//!
//! ログイン・サインアップで扱う値オブジェクトとエンティティを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! auth-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、ハッシュアルゴリズム、トークン形式）には
//! 一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`account`] - アカウント（ID、メールアドレス、パスワードハッシュ）
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`password`] - 平文パスワードとハッシュ
//! - [`token`] - アクセストークン
//!
//! ## 使用例
//!
//! ```rust
//! use authflow_domain::{
//!     account::{Account, AccountId, Email},
//!     password::PasswordHash,
//! };
//!
//! let account = Account::new(
//!     AccountId::new(),
//!     Email::new("user@example.com").unwrap(),
//!     PasswordHash::new("$argon2id$v=19$..."),
//! );
//! assert_eq!(account.email().as_str(), "user@example.com");
//! ```

pub mod account;
pub mod error;
pub mod password;
pub mod token;

pub use error::DomainError;
