//! # サインアップユースケース
//!
//! 新しいアカウントを登録する。パスワードは Argon2id でハッシュ化して保存する。
//!
//! パスワード不一致・メールアドレス重複は利用者の入力に起因する結果なので、
//! エラーではなく [`SignUpOutcome`] で返す。

use std::sync::Arc;

use authflow_domain::{
    account::{Account, AccountId, Email},
    password::PlainPassword,
};
use authflow_infra::{PasswordHasher, repository::AccountRepository};

use super::{ADD_ACCOUNT_REPOSITORY, LOAD_ACCOUNT_REPOSITORY};
use crate::error::AuthError;

/// サインアップの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// 登録完了
    Registered(Account),
    /// パスワードと確認用パスワードが一致しない
    PasswordMismatch,
    /// メールアドレスが登録済み
    EmailTaken,
}

/// サインアップユースケースの実装
pub struct SignUpUseCaseImpl {
    account_repository: Option<Arc<dyn AccountRepository>>,
    password_hasher:    Arc<dyn PasswordHasher>,
}

impl SignUpUseCaseImpl {
    pub fn new(
        account_repository: Option<Arc<dyn AccountRepository>>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            account_repository,
            password_hasher,
        }
    }

    /// アカウントを登録する
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        repeat_password: &str,
    ) -> Result<SignUpOutcome, AuthError> {
        if email.is_empty() {
            return Err(AuthError::MissingParam("email"));
        }
        if password.is_empty() {
            return Err(AuthError::MissingParam("password"));
        }
        if repeat_password.is_empty() {
            return Err(AuthError::MissingParam("repeatPassword"));
        }

        let repository = self
            .account_repository
            .as_deref()
            .ok_or(AuthError::MissingParam(ADD_ACCOUNT_REPOSITORY))?;
        let adder = repository
            .add_account()
            .ok_or(AuthError::InvalidParam(ADD_ACCOUNT_REPOSITORY))?;
        let loader = repository
            .load_by_email()
            .ok_or(AuthError::InvalidParam(LOAD_ACCOUNT_REPOSITORY))?;

        if password != repeat_password {
            return Ok(SignUpOutcome::PasswordMismatch);
        }

        let email = Email::new(email).map_err(|_| AuthError::InvalidParam("email"))?;
        if loader.load(email.as_str()).await?.is_some() {
            tracing::info!("登録済みのメールアドレスでサインアップが試行されました");
            return Ok(SignUpOutcome::EmailTaken);
        }

        let password_hash = self
            .password_hasher
            .hash(&PlainPassword::new(password))
            .await?;
        let account = Account::new(AccountId::new(), email, password_hash);

        match adder.add(&account).await {
            Ok(()) => {
                tracing::info!(account_id = %account.id(), "アカウントを登録しました");
                Ok(SignUpOutcome::Registered(account))
            }
            // 確認後に同じメールアドレスが登録された場合
            Err(e) if e.is_conflict() => Ok(SignUpOutcome::EmailTaken),
            Err(e) => Err(e.into()),
        }
    }
}
