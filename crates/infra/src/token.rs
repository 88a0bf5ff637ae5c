//! # アクセストークン発行
//!
//! 認証に成功したアカウントに対してアクセストークンを発行する。
//!
//! 実装は HS256 署名の JWT。クレームは最小限とし、
//! `sub` にアカウント ID、`iat` / `exp` に UNIX 秒を格納する。

use std::time::Duration;

use async_trait::async_trait;
use authflow_domain::{account::AccountId, token::AccessToken};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use crate::InfraError;

/// アクセストークンの発行を担当するトレイト
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// アカウント ID に対してトークンを発行する
    ///
    /// `Ok(None)` はトークンを発行できなかったことを表し、
    /// 呼び出し側では認証失敗として扱われる。
    async fn generate(&self, account_id: &AccountId) -> Result<Option<AccessToken>, InfraError>;
}

/// JWT のクレーム
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// アカウント ID
    pub sub: String,
    /// 発行日時（UNIX 秒）
    pub iat: i64,
    /// 有効期限（UNIX 秒）
    pub exp: i64,
}

/// HS256 JWT によるトークン発行の実装
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    ttl_seconds:  i64,
}

impl JwtTokenIssuer {
    /// 署名鍵と有効期間を指定して作成する
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            ttl_seconds:  i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
        }
    }
}

#[async_trait]
impl TokenIssuer for JwtTokenIssuer {
    async fn generate(&self, account_id: &AccountId) -> Result<Option<AccessToken>, InfraError> {
        let iat = Utc::now().timestamp();
        let claims = AccessTokenClaims {
            sub: account_id.to_string(),
            iat,
            exp: iat.saturating_add(self.ttl_seconds),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        tracing::debug!(account_id = %account_id, "アクセストークンを発行しました");

        Ok(Some(AccessToken::new(token)))
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
    use pretty_assertions::assert_eq;

    use super::*;

    const SECRET: &[u8] = b"test-secret";

    fn decode_claims(token: &AccessToken) -> AccessTokenClaims {
        decode::<AccessTokenClaims>(
            token.as_str(),
            &DecodingKey::from_secret(SECRET),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap()
        .claims
    }

    #[tokio::test]
    async fn test_発行したトークンのsubはアカウントid() {
        let sut = JwtTokenIssuer::new(SECRET, Duration::from_secs(3600));
        let account_id = AccountId::new();

        let token = sut.generate(&account_id).await.unwrap().unwrap();

        let claims = decode_claims(&token);
        assert_eq!(claims.sub, account_id.to_string());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[tokio::test]
    async fn test_別の鍵では検証できない() {
        let sut = JwtTokenIssuer::new(SECRET, Duration::from_secs(3600));

        let token = sut.generate(&AccountId::new()).await.unwrap().unwrap();

        let result = decode::<AccessTokenClaims>(
            token.as_str(),
            &DecodingKey::from_secret(b"another-secret"),
            &Validation::new(Algorithm::HS256),
        );
        assert!(result.is_err());
    }
}
