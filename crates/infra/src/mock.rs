//! # テスト用インメモリリポジトリ
//!
//! ユースケース・ハンドラのテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! authflow-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use authflow_domain::account::Account;

use crate::{
    error::InfraError,
    repository::{AccountRepository, AddAccountRepository, LoadAccountByEmailRepository},
};

// ===== InMemoryAccountRepository =====

/// メモリ上にアカウントを保持するリポジトリ
///
/// clone したインスタンス同士は同じストアを共有する。
#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<Mutex<Vec<Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期データを持つリポジトリを作成する
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self {
            accounts: Arc::new(Mutex::new(accounts.into_iter().collect())),
        }
    }

    /// 保持しているアカウントのスナップショット
    pub fn accounts(&self) -> Vec<Account> {
        self.lock().map(|accounts| accounts.clone()).unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Account>>, InfraError> {
        self.accounts
            .lock()
            .map_err(|e| InfraError::unexpected(format!("ストアのロックに失敗しました: {e}")))
    }
}

impl AccountRepository for InMemoryAccountRepository {
    fn load_by_email(&self) -> Option<&dyn LoadAccountByEmailRepository> {
        Some(self)
    }

    fn add_account(&self) -> Option<&dyn AddAccountRepository> {
        Some(self)
    }
}

#[async_trait]
impl LoadAccountByEmailRepository for InMemoryAccountRepository {
    async fn load(&self, email: &str) -> Result<Option<Account>, InfraError> {
        Ok(self
            .lock()?
            .iter()
            .find(|account| account.email().as_str() == email)
            .cloned())
    }
}

#[async_trait]
impl AddAccountRepository for InMemoryAccountRepository {
    async fn add(&self, account: &Account) -> Result<(), InfraError> {
        let mut accounts = self.lock()?;
        if accounts.iter().any(|a| a.email() == account.email()) {
            return Err(InfraError::conflict("Account", account.email().as_str()));
        }
        accounts.push(account.clone());
        Ok(())
    }
}
