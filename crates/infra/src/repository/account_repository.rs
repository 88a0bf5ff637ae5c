//! # AccountRepository
//!
//! アカウントの永続化を担当するリポジトリ。
//!
//! ## 機能（ケイパビリティ）単位のトレイト
//!
//! ユースケースが必要とする操作ごとにトレイトを分ける:
//!
//! - [`LoadAccountByEmailRepository`]: メールアドレスでアカウントを読み込む
//! - [`AddAccountRepository`]: アカウントを追加する
//!
//! ユースケースには [`AccountRepository`] として注入し、必要な機能を
//! `load_by_email()` / `add_account()` で問い合わせる。実装が機能を持たない
//! 場合は `None` を返し、ユースケース側で設定不備として扱う。

use async_trait::async_trait;
use authflow_domain::{
    account::{Account, AccountId, Email},
    password::PasswordHash,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// メールアドレスでアカウントを読み込む機能
#[async_trait]
pub trait LoadAccountByEmailRepository: Send + Sync {
    /// メールアドレスでアカウントを検索する
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(account))`: アカウントが見つかった場合
    /// - `Ok(None)`: アカウントが見つからない場合
    /// - `Err(_)`: データベースエラー
    async fn load(&self, email: &str) -> Result<Option<Account>, InfraError>;
}

/// アカウントを追加する機能
#[async_trait]
pub trait AddAccountRepository: Send + Sync {
    /// アカウントを追加する
    ///
    /// 同じメールアドレスのアカウントが既に存在する場合は
    /// [`InfraError::conflict`] を返す。
    async fn add(&self, account: &Account) -> Result<(), InfraError>;
}

/// ユースケースに注入されるリポジトリ
///
/// 各メソッドは対応する機能を持つ場合にのみ `Some` を返す。
pub trait AccountRepository: Send + Sync {
    fn load_by_email(&self) -> Option<&dyn LoadAccountByEmailRepository> {
        None
    }

    fn add_account(&self) -> Option<&dyn AddAccountRepository> {
        None
    }
}

/// DB の行
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id:            Uuid,
    email:         String,
    password_hash: String,
}

impl TryFrom<AccountRow> for Account {
    type Error = InfraError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let email = Email::new(row.email)
            .map_err(|e| InfraError::unexpected(format!("保存済みのメールアドレスが不正です: {e}")))?;

        Ok(Account::new(
            AccountId::from_uuid(row.id),
            email,
            PasswordHash::new(row.password_hash),
        ))
    }
}

/// PostgreSQL 実装の AccountRepository
#[derive(Debug, Clone)]
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AccountRepository for PostgresAccountRepository {
    fn load_by_email(&self) -> Option<&dyn LoadAccountByEmailRepository> {
        Some(self)
    }

    fn add_account(&self) -> Option<&dyn AddAccountRepository> {
        Some(self)
    }
}

#[async_trait]
impl LoadAccountByEmailRepository for PostgresAccountRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn load(&self, email: &str) -> Result<Option<Account>, InfraError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, password_hash
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }
}

#[async_trait]
impl AddAccountRepository for PostgresAccountRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(account_id = %account.id()))]
    async fn add(&self, account: &Account) -> Result<(), InfraError> {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (id, email, password_hash)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(account.id().as_uuid())
        .bind(account.email().as_str())
        .bind(account.password_hash().as_str())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                InfraError::conflict("Account", account.email().as_str()),
            ),
            Err(e) => Err(e.into()),
        }
    }
}
