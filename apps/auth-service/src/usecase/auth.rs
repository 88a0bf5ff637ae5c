//! # 認証ユースケース
//!
//! メールアドレスとパスワードでアカウントを認証し、アクセストークンを発行する。
//!
//! ## 処理順序
//!
//! 1. `email` / `password` の存在確認
//! 2. リポジトリの注入確認と、読み込み機能の有無の確認
//! 3. アカウント読み込み → パスワード照合 → トークン発行
//!
//! アカウントが存在しない場合とパスワード不一致の場合はどちらも `Ok(None)` を返す。
//! 後続の協調オブジェクトは呼ばない。

use std::sync::Arc;

use authflow_domain::{password::PlainPassword, token::AccessToken};
use authflow_infra::{PasswordChecker, TokenIssuer, repository::AccountRepository};

use super::LOAD_ACCOUNT_REPOSITORY;
use crate::error::AuthError;

/// 認証ユースケースの実装
pub struct AuthUseCaseImpl {
    account_repository: Option<Arc<dyn AccountRepository>>,
    password_checker:   Arc<dyn PasswordChecker>,
    token_issuer:       Arc<dyn TokenIssuer>,
}

impl AuthUseCaseImpl {
    /// 新しいユースケースインスタンスを作成
    ///
    /// リポジトリは `None` でも構築できる。その場合は `auth` 呼び出し時に
    /// [`AuthError::MissingParam`] を返す。
    pub fn new(
        account_repository: Option<Arc<dyn AccountRepository>>,
        password_checker: Arc<dyn PasswordChecker>,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            account_repository,
            password_checker,
            token_issuer,
        }
    }

    /// メールアドレスとパスワードで認証する
    pub async fn auth(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<AccessToken>, AuthError> {
        if email.is_empty() {
            return Err(AuthError::MissingParam("email"));
        }
        if password.is_empty() {
            return Err(AuthError::MissingParam("password"));
        }

        let repository = self
            .account_repository
            .as_deref()
            .ok_or(AuthError::MissingParam(LOAD_ACCOUNT_REPOSITORY))?;
        let loader = repository
            .load_by_email()
            .ok_or(AuthError::InvalidParam(LOAD_ACCOUNT_REPOSITORY))?;

        let Some(account) = loader.load(email).await? else {
            tracing::debug!("アカウントが見つかりません");
            return Ok(None);
        };

        let plain_password = PlainPassword::new(password);
        let result = self
            .password_checker
            .verify(&plain_password, account.password_hash())
            .await?;
        if result.is_mismatch() {
            tracing::debug!(account_id = %account.id(), "パスワードが一致しません");
            return Ok(None);
        }

        Ok(self.token_issuer.generate(account.id()).await?)
    }
}
