//! # ユースケース層
//!
//! ログイン・サインアップのビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: ルーターはトレイト経由でユースケースを呼ぶ
//! - **依存性注入**: リポジトリ、パスワード処理、トークン発行を外部から注入
//! - **固定順の検証**: 入力と協調オブジェクトの検証を決まった順で行い、最初の不備で失敗する

pub mod auth;
pub mod signup;

use async_trait::async_trait;
pub use auth::AuthUseCaseImpl;
use authflow_domain::token::AccessToken;
pub use signup::{SignUpOutcome, SignUpUseCaseImpl};

use crate::error::AuthError;

/// 読み込み機能を持つリポジトリの名前（エラーメッセージ用）
pub const LOAD_ACCOUNT_REPOSITORY: &str = "loadUserByEmailRepository";

/// 追加機能を持つリポジトリの名前（エラーメッセージ用）
pub const ADD_ACCOUNT_REPOSITORY: &str = "addAccountRepository";

/// 認証ユースケーストレイト
#[async_trait]
pub trait AuthUseCase: Send + Sync {
    /// メールアドレスとパスワードで認証する
    ///
    /// ## 戻り値
    ///
    /// - `Ok(Some(token))`: 認証成功
    /// - `Ok(None)`: アカウントが存在しない、またはパスワード不一致
    /// - `Err(AuthError)`: 入力・構成の不備、またはインフラエラー
    async fn auth(&self, email: &str, password: &str) -> Result<Option<AccessToken>, AuthError>;
}

/// サインアップユースケーストレイト
#[async_trait]
pub trait SignUpUseCase: Send + Sync {
    /// アカウントを登録する
    ///
    /// パスワード不一致やメールアドレスの重複はエラーではなく
    /// [`SignUpOutcome`] で返す。
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        repeat_password: &str,
    ) -> Result<SignUpOutcome, AuthError>;
}

/// AuthUseCaseImpl に AuthUseCase トレイトを実装
#[async_trait]
impl AuthUseCase for AuthUseCaseImpl {
    async fn auth(&self, email: &str, password: &str) -> Result<Option<AccessToken>, AuthError> {
        self.auth(email, password).await
    }
}

/// SignUpUseCaseImpl に SignUpUseCase トレイトを実装
#[async_trait]
impl SignUpUseCase for SignUpUseCaseImpl {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        repeat_password: &str,
    ) -> Result<SignUpOutcome, AuthError> {
        self.sign_up(email, password, repeat_password).await
    }
}
