//! # HTTP リクエストハンドラ
//!
//! ## 設計方針
//!
//! - ルーターは [`HttpRoute`] を実装し、axum に依存しない形で入出力を扱う
//! - [`adapt`] が axum のリクエストをルーターの入力に変換する
//! - ルーターは薄く保ち、ビジネスロジックは usecase 層に委譲
//!
//! ## ハンドラ一覧
//!
//! - `login`: `POST /login`
//! - `signup`: `POST /signup`
//! - `health`: ヘルスチェック

pub mod health;
pub mod login;
pub mod signup;

use std::sync::Arc;

use async_trait::async_trait;
use authflow_infra::EmailValidator;
use authflow_shared::ErrorResponse;
use axum::extract::State;
use bytes::Bytes;
pub use health::{ReadinessState, health_check, readiness_check};
pub use login::{LoginRequest, LoginResponse, LoginRouter};
use serde::de::DeserializeOwned;
pub use signup::{SignUpRequest, SignUpResponse, SignUpRouter};

use crate::protocol::{HttpRequest, HttpResponse};

/// リクエストを処理してレスポンスを返すルーター
///
/// 失敗を含むすべての結果を [`HttpResponse`] で返し、エラーやパニックを外に出さない。
#[async_trait]
pub trait HttpRoute: Send + Sync + 'static {
    /// リクエストボディの型
    type Body: DeserializeOwned + Send;

    async fn route(&self, request: Option<HttpRequest<Self::Body>>) -> HttpResponse;
}

/// axum のハンドラとしてルーターを呼び出す
///
/// 空のボディや JSON として解釈できないボディは「ボディなし」として渡す。
pub async fn adapt<R: HttpRoute>(State(router): State<Arc<R>>, body: Bytes) -> HttpResponse {
    let body = if body.is_empty() {
        None
    } else {
        match serde_json::from_slice::<R::Body>(&body) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!(error = %e, "リクエストボディを解釈できません");
                None
            }
        }
    };

    router.route(Some(HttpRequest { body })).await
}

/// 空文字列を未指定として扱う
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// メールアドレスの書式を検証する
///
/// 検証器が注入されていない場合は 500、書式が不正な場合は 400 を返す。
fn check_email(validator: Option<&dyn EmailValidator>, email: &str) -> Result<(), HttpResponse> {
    let Some(validator) = validator else {
        tracing::error!(
            error.category = "configuration",
            error.kind = "email_validator",
            "メールアドレス検証器が設定されていません"
        );
        return Err(HttpResponse::server_error());
    };

    if validator.is_valid(email) {
        Ok(())
    } else {
        Err(HttpResponse::bad_request(ErrorResponse::invalid_param("email")))
    }
}

/// ボディのないリクエストに対するレスポンス
fn missing_body_response() -> HttpResponse {
    tracing::error!(
        error.category = "request",
        error.kind = "missing_body",
        "リクエストボディがありません"
    );
    HttpResponse::server_error()
}
