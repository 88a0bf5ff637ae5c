//! # パスワードハッシュ
//!
//! Argon2id によるパスワードのハッシュ化と照合を提供する。
//!
//! Argon2 は CPU とメモリを大きく消費するため、どちらの処理も
//! `spawn_blocking` 上で実行し、非同期ランタイムのワーカーを塞がない。

use argon2::{
    Algorithm,
    Argon2,
    Params,
    PasswordHasher as _,
    PasswordVerifier as _,
    Version,
    password_hash::{PasswordHash as Argon2PasswordHash, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use authflow_domain::password::{PasswordHash, PasswordVerifyResult, PlainPassword};

use crate::InfraError;

/// パスワード照合を担当するトレイト
#[async_trait]
pub trait PasswordChecker: Send + Sync {
    /// 平文パスワードと保存済みハッシュを照合する
    ///
    /// # Errors
    ///
    /// - 不正なハッシュ形式の場合
    async fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError>;
}

/// パスワードのハッシュ化を担当するトレイト
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError>;
}

/// OWASP 推奨パラメータ（RFC 9106）の Argon2id
///
/// - Memory: 64 MB
/// - Iterations: 1
/// - Parallelism: 1
fn argon2id() -> Argon2<'static> {
    let params = Params::new(65536, 1, 1, None).unwrap_or_default();
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
}

/// ブロッキングタスクの JoinError を変換する
fn join_error(e: tokio::task::JoinError) -> InfraError {
    InfraError::unexpected(format!("パスワード処理タスクが異常終了しました: {e}"))
}

/// Argon2id によるパスワード照合の実装
#[derive(Clone)]
pub struct Argon2PasswordChecker {
    argon2: Argon2<'static>,
}

impl Argon2PasswordChecker {
    pub fn new() -> Self {
        Self { argon2: argon2id() }
    }
}

impl Default for Argon2PasswordChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordChecker for Argon2PasswordChecker {
    async fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError> {
        let argon2 = self.argon2.clone();
        let password = password.clone();
        let hash = hash.clone();

        tokio::task::spawn_blocking(move || {
            let parsed = Argon2PasswordHash::new(hash.as_str())
                .map_err(|e| InfraError::password_hash(format!("不正なハッシュ形式: {e}")))?;

            let matched = argon2
                .verify_password(password.as_str().as_bytes(), &parsed)
                .is_ok();

            Ok(PasswordVerifyResult::from(matched))
        })
        .await
        .map_err(join_error)?
    }
}

/// Argon2id によるパスワードハッシュ化の実装
///
/// ソルトは呼び出しごとに OS の乱数から生成する。
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self { argon2: argon2id() }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
        let argon2 = self.argon2.clone();
        let password = password.clone();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            let hash = argon2
                .hash_password(password.as_str().as_bytes(), &salt)
                .map_err(|e| InfraError::password_hash(format!("ハッシュ化に失敗しました: {e}")))?;

            Ok(PasswordHash::new(hash.to_string()))
        })
        .await
        .map_err(join_error)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // password123 の Argon2id ハッシュ
    const TEST_HASH: &str = "$argon2id$v=19$m=65536,t=1,p=1$olntqw+EoVpwH4B1vUAI0A$5yCA1izLODgz8nQOInDGwbuQB/AS0sIQDwpmIilve5M";

    #[tokio::test]
    async fn test_正しいパスワードは一致する() {
        let checker = Argon2PasswordChecker::new();

        let result = checker
            .verify(&PlainPassword::new("password123"), &PasswordHash::new(TEST_HASH))
            .await
            .unwrap();

        assert!(result.is_match());
    }

    #[tokio::test]
    async fn test_誤ったパスワードは一致しない() {
        let checker = Argon2PasswordChecker::new();

        let result = checker
            .verify(&PlainPassword::new("wrongpassword"), &PasswordHash::new(TEST_HASH))
            .await
            .unwrap();

        assert!(result.is_mismatch());
    }

    #[tokio::test]
    async fn test_不正なハッシュ形式はエラー() {
        let checker = Argon2PasswordChecker::new();

        let result = checker
            .verify(
                &PlainPassword::new("password123"),
                &PasswordHash::new("not-a-valid-hash"),
            )
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_ハッシュ化した値で元のパスワードを照合できる() {
        let hasher = Argon2PasswordHasher::new();
        let checker = Argon2PasswordChecker::new();
        let password = PlainPassword::new("s3cret-pass");

        let hash = hasher.hash(&password).await.unwrap();

        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(checker.verify(&password, &hash).await.unwrap().is_match());
    }

    #[tokio::test]
    async fn test_同じパスワードでもソルトによりハッシュが異なる() {
        let hasher = Argon2PasswordHasher::new();
        let password = PlainPassword::new("s3cret-pass");

        let first = hasher.hash(&password).await.unwrap();
        let second = hasher.hash(&password).await.unwrap();

        assert_ne!(first, second);
    }
}
