//! # テスト用の協調オブジェクト
//!
//! ユースケース・ルーターの単体テストで使うスパイとスタブ。
//! 呼び出し引数を記録し、「呼ばれなかったこと」も検証できるようにする。

use std::sync::Mutex;

use async_trait::async_trait;
use authflow_domain::{
    account::{Account, AccountId, Email},
    password::{PasswordHash, PasswordVerifyResult, PlainPassword},
    token::AccessToken,
};
use authflow_infra::{
    EmailValidator,
    InfraError,
    PasswordChecker,
    PasswordHasher,
    TokenIssuer,
    repository::{AccountRepository, AddAccountRepository, LoadAccountByEmailRepository},
};

use crate::{
    error::AuthError,
    usecase::{AuthUseCase, SignUpOutcome, SignUpUseCase},
};

/// テスト用アカウント
pub fn account(email: &str, hash: &str) -> Account {
    Account::new(
        AccountId::new(),
        Email::new(email).unwrap(),
        PasswordHash::new(hash),
    )
}

// ===== リポジトリ =====

/// 読み込み・追加の両機能を持つスパイ
#[derive(Default)]
pub struct SpyAccountRepository {
    pub account:   Option<Account>,
    pub add_error: Mutex<Option<InfraError>>,
    pub loaded:    Mutex<Vec<String>>,
    pub added:     Mutex<Vec<Account>>,
}

impl SpyAccountRepository {
    pub fn with_account(account: Account) -> Self {
        Self {
            account: Some(account),
            ..Self::default()
        }
    }

    pub fn failing_add(error: InfraError) -> Self {
        Self {
            add_error: Mutex::new(Some(error)),
            ..Self::default()
        }
    }
}

impl AccountRepository for SpyAccountRepository {
    fn load_by_email(&self) -> Option<&dyn LoadAccountByEmailRepository> {
        Some(self)
    }

    fn add_account(&self) -> Option<&dyn AddAccountRepository> {
        Some(self)
    }
}

#[async_trait]
impl LoadAccountByEmailRepository for SpyAccountRepository {
    async fn load(&self, email: &str) -> Result<Option<Account>, InfraError> {
        self.loaded.lock().unwrap().push(email.to_string());
        Ok(self.account.clone())
    }
}

#[async_trait]
impl AddAccountRepository for SpyAccountRepository {
    async fn add(&self, account: &Account) -> Result<(), InfraError> {
        if let Some(error) = self.add_error.lock().unwrap().take() {
            return Err(error);
        }
        self.added.lock().unwrap().push(account.clone());
        Ok(())
    }
}

/// 機能を一つも持たないリポジトリ
pub struct NoCapabilityRepository;

impl AccountRepository for NoCapabilityRepository {}

/// 追加機能だけを持つリポジトリ
pub struct AddOnlyRepository;

impl AccountRepository for AddOnlyRepository {
    fn add_account(&self) -> Option<&dyn AddAccountRepository> {
        Some(self)
    }
}

#[async_trait]
impl AddAccountRepository for AddOnlyRepository {
    async fn add(&self, _account: &Account) -> Result<(), InfraError> {
        Ok(())
    }
}

// ===== パスワード =====

/// 固定結果を返すパスワード照合のスパイ
pub struct SpyPasswordChecker {
    result:    bool,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl SpyPasswordChecker {
    pub fn matching() -> Self {
        Self {
            result: true,
            calls:  Mutex::new(Vec::new()),
        }
    }

    pub fn mismatching() -> Self {
        Self {
            result: false,
            calls:  Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PasswordChecker for SpyPasswordChecker {
    async fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError> {
        self.calls
            .lock()
            .unwrap()
            .push((password.as_str().to_string(), hash.as_str().to_string()));
        Ok(PasswordVerifyResult::from(self.result))
    }
}

/// `hashed:<平文>` を返すハッシュ化のスタブ
#[derive(Default)]
pub struct StubPasswordHasher {
    pub calls: Mutex<Vec<String>>,
}

#[async_trait]
impl PasswordHasher for StubPasswordHasher {
    async fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
        self.calls.lock().unwrap().push(password.as_str().to_string());
        Ok(PasswordHash::new(format!("hashed:{}", password.as_str())))
    }
}

// ===== トークン =====

/// 固定トークンを返すトークン発行のスパイ
pub struct SpyTokenIssuer {
    token:     Option<String>,
    pub calls: Mutex<Vec<AccountId>>,
}

impl SpyTokenIssuer {
    pub fn returning(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn returning_none() -> Self {
        Self {
            token: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TokenIssuer for SpyTokenIssuer {
    async fn generate(&self, account_id: &AccountId) -> Result<Option<AccessToken>, InfraError> {
        self.calls.lock().unwrap().push(account_id.clone());
        Ok(self.token.clone().map(AccessToken::new))
    }
}

// ===== メールアドレス =====

/// 固定結果を返すメールアドレス検証のスパイ
pub struct SpyEmailValidator {
    valid:     bool,
    pub calls: Mutex<Vec<String>>,
}

impl SpyEmailValidator {
    pub fn accepting() -> Self {
        Self {
            valid: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            valid: false,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl EmailValidator for SpyEmailValidator {
    fn is_valid(&self, email: &str) -> bool {
        self.calls.lock().unwrap().push(email.to_string());
        self.valid
    }
}

// ===== ユースケース =====

/// 認証ユースケースの戻り値
pub enum AuthReply {
    Token(&'static str),
    Unauthenticated,
    Fail,
}

/// 認証ユースケースのスパイ
pub struct SpyAuthUseCase {
    reply:     AuthReply,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl SpyAuthUseCase {
    pub fn new(reply: AuthReply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AuthUseCase for SpyAuthUseCase {
    async fn auth(&self, email: &str, password: &str) -> Result<Option<AccessToken>, AuthError> {
        self.calls
            .lock()
            .unwrap()
            .push((email.to_string(), password.to_string()));
        match self.reply {
            AuthReply::Token(token) => Ok(Some(AccessToken::new(token))),
            AuthReply::Unauthenticated => Ok(None),
            AuthReply::Fail => Err(AuthError::Infra(InfraError::unexpected("boom"))),
        }
    }
}

/// サインアップユースケースのスパイ
pub struct SpySignUpUseCase {
    reply:     Mutex<Option<Result<SignUpOutcome, AuthError>>>,
    pub calls: Mutex<Vec<(String, String, String)>>,
}

impl SpySignUpUseCase {
    pub fn new(reply: Result<SignUpOutcome, AuthError>) -> Self {
        Self {
            reply: Mutex::new(Some(reply)),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SignUpUseCase for SpySignUpUseCase {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        repeat_password: &str,
    ) -> Result<SignUpOutcome, AuthError> {
        self.calls.lock().unwrap().push((
            email.to_string(),
            password.to_string(),
            repeat_password.to_string(),
        ));
        self.reply
            .lock()
            .unwrap()
            .take()
            .expect("sign_up は一度だけ呼ばれる想定")
    }
}
