//! # Auth Service 設定
//!
//! 環境変数から Auth Service サーバーの設定を読み込む。
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `AUTH_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `AUTH_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `JWT_SECRET` | **Yes** | アクセストークンの署名鍵 |
//! | `ACCESS_TOKEN_TTL_SECONDS` | No | アクセストークンの有効期間（デフォルト: 3600） |

use std::{env, fmt, time::Duration};

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: u64 = 3600;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません（.env を確認してください）")]
    Missing(&'static str),

    #[error("{name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Auth Service サーバーの設定
#[derive(Clone)]
pub struct AuthConfig {
    /// バインドアドレス
    pub host:             String,
    /// ポート番号
    pub port:             u16,
    /// データベース接続 URL
    pub database_url:     String,
    /// JWT の署名鍵
    pub jwt_secret:       String,
    /// アクセストークンの有効期間
    pub access_token_ttl: Duration,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .finish()
    }
}

impl AuthConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// キーから値を引く関数を使って設定を組み立てる
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let port = parse("AUTH_PORT", required("AUTH_PORT")?)?;
        let ttl_seconds = match lookup("ACCESS_TOKEN_TTL_SECONDS") {
            Some(value) => parse("ACCESS_TOKEN_TTL_SECONDS", value)?,
            None => DEFAULT_ACCESS_TOKEN_TTL_SECONDS,
        };

        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::Invalid {
                name:  "JWT_SECRET",
                value: String::new(),
            });
        }

        Ok(Self {
            host: lookup("AUTH_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_url: required("DATABASE_URL")?,
            jwt_secret,
            access_token_ttl: Duration::from_secs(ttl_seconds),
        })
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn lookup_from(
        pairs: &[(&'static str, &'static str)],
    ) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |key| map.get(key).map(|v| (*v).to_string())
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("AUTH_PORT", "13002"),
        ("DATABASE_URL", "postgres://localhost/authflow"),
        ("JWT_SECRET", "jwt-signing-key"),
    ];

    #[test]
    fn test_必須項目のみでデフォルト値が使われる() {
        let config = AuthConfig::from_lookup(lookup_from(&REQUIRED)).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 13002);
        assert_eq!(config.database_url, "postgres://localhost/authflow");
        assert_eq!(config.access_token_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn test_任意項目を上書きできる() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("AUTH_HOST", "127.0.0.1"));
        pairs.push(("ACCESS_TOKEN_TTL_SECONDS", "60"));

        let config = AuthConfig::from_lookup(lookup_from(&pairs)).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.access_token_ttl, Duration::from_secs(60));
    }

    #[rstest]
    #[case("AUTH_PORT")]
    #[case("DATABASE_URL")]
    #[case("JWT_SECRET")]
    fn test_必須項目が欠けているとmissing(#[case] name: &'static str) {
        let pairs: Vec<_> = REQUIRED.into_iter().filter(|(k, _)| *k != name).collect();

        let result = AuthConfig::from_lookup(lookup_from(&pairs));

        assert_eq!(result.unwrap_err(), ConfigError::Missing(name));
    }

    #[test]
    fn test_ポート番号が数値でないとinvalid() {
        let mut pairs = REQUIRED.to_vec();
        pairs[0] = ("AUTH_PORT", "not-a-port");

        let result = AuthConfig::from_lookup(lookup_from(&pairs));

        assert_eq!(
            result.unwrap_err(),
            ConfigError::Invalid {
                name:  "AUTH_PORT",
                value: "not-a-port".to_string(),
            }
        );
    }

    #[test]
    fn test_debug出力に秘密情報を含まない() {
        let config = AuthConfig::from_lookup(lookup_from(&REQUIRED)).unwrap();

        let debug = format!("{config:?}");

        assert!(!debug.contains("jwt-signing-key"));
        assert!(!debug.contains("postgres://"));
    }
}
