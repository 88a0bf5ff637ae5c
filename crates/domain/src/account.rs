//! # アカウント
//!
//! ログイン対象となるアカウントと、その構成要素の値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`AccountId`] | アカウント ID | トークンの発行対象を識別する |
//! | [`Email`] | メールアドレス | ログイン時の検索キー |
//! | [`Account`] | アカウント | リポジトリから読み込まれる認証対象 |
//!
//! アカウントはリポジトリが所有し、認証処理からは読み取り専用で参照される。

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{DomainError, password::PasswordHash};

/// メールアドレスの最大長
const EMAIL_MAX_LENGTH: usize = 255;

/// アカウント ID（一意識別子）
///
/// UUID v7 を使用し、生成順にソート可能。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct AccountId(Uuid);

impl AccountId {
    /// 新しいアカウント ID を生成する
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// 既存の UUID からアカウント ID を作成する
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 内部の UUID 参照を取得する
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

/// メールアドレス（値オブジェクト）
///
/// ここでは構造上の最低限の検証のみ行う。
/// 書式の厳密な検証はプレゼンテーション層の `EmailValidator` が担当する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `local@domain` の形式で、両側が空でない
    /// - 最大 255 文字
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        };

        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        }

        if value.len() > EMAIL_MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "メールアドレスは{EMAIL_MAX_LENGTH}文字以内である必要があります"
            )));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// アカウントエンティティ
///
/// 認証処理はこのエンティティを変更しない。
/// フィールドは getter 経由でのみ参照できる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id:            AccountId,
    email:         Email,
    password_hash: PasswordHash,
}

impl Account {
    /// アカウントを組み立てる
    ///
    /// 新規登録時とデータベースからの復元時の両方で使用する。
    pub fn new(id: AccountId, email: Email, password_hash: PasswordHash) -> Self {
        Self {
            id,
            email,
            password_hash,
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}
