//! # ログインルーター
//!
//! `POST /login` のリクエストを検証し、認証ユースケースの結果を HTTP ステータスに変換する。
//!
//! | 条件 | ステータス | ボディ |
//! |------|-----------|--------|
//! | ボディなし | 500 | `ServerError` |
//! | `email` 未指定 | 400 | `MissingParamError` |
//! | `email` の書式不正 | 400 | `InvalidParamError` |
//! | `password` 未指定 | 400 | `MissingParamError` |
//! | ユースケースのエラー | 500 | `ServerError` |
//! | 認証失敗 | 401 | `UnauthorizedError` |
//! | 認証成功 | 200 | `{ "accessToken": ... }` |
//!
//! ユースケースや検証器が注入されていない場合も 500 を返す。

use std::sync::Arc;

use async_trait::async_trait;
use authflow_domain::token::AccessToken;
use authflow_infra::EmailValidator;
use authflow_shared::ErrorResponse;
use serde::{Deserialize, Serialize};

use super::{HttpRoute, check_email, missing_body_response, non_empty};
use crate::{
    protocol::{HttpRequest, HttpResponse},
    usecase::AuthUseCase,
};

/// ログインリクエスト
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email:    Option<String>,
    pub password: Option<String>,
}

/// ログインレスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: AccessToken,
}

/// ログインルーター
pub struct LoginRouter {
    auth_usecase:    Option<Arc<dyn AuthUseCase>>,
    email_validator: Option<Arc<dyn EmailValidator>>,
}

impl LoginRouter {
    pub fn new(
        auth_usecase: Option<Arc<dyn AuthUseCase>>,
        email_validator: Option<Arc<dyn EmailValidator>>,
    ) -> Self {
        Self {
            auth_usecase,
            email_validator,
        }
    }
}

#[async_trait]
impl HttpRoute for LoginRouter {
    type Body = LoginRequest;

    async fn route(&self, request: Option<HttpRequest<LoginRequest>>) -> HttpResponse {
        let Some(body) = request.and_then(|r| r.body) else {
            return missing_body_response();
        };

        let Some(email) = non_empty(body.email.as_deref()) else {
            return HttpResponse::bad_request(ErrorResponse::missing_param("email"));
        };
        if let Err(response) = check_email(self.email_validator.as_deref(), email) {
            return response;
        }
        let Some(password) = non_empty(body.password.as_deref()) else {
            return HttpResponse::bad_request(ErrorResponse::missing_param("password"));
        };

        let Some(usecase) = self.auth_usecase.as_deref() else {
            tracing::error!(
                error.category = "configuration",
                error.kind = "auth_usecase",
                "認証ユースケースが設定されていません"
            );
            return HttpResponse::server_error();
        };

        match usecase.auth(email, password).await {
            Ok(Some(access_token)) => HttpResponse::ok(&LoginResponse { access_token }),
            Ok(None) => {
                tracing::info!("ログイン失敗: 認証情報が一致しません");
                HttpResponse::unauthorized()
            }
            Err(e) => {
                tracing::error!(
                    error.category = e.category(),
                    error.kind = "login",
                    "ログイン処理で内部エラー: {}",
                    e
                );
                HttpResponse::server_error()
            }
        }
    }
}
