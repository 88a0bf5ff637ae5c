//! # サインアップルーター
//!
//! `POST /signup` のリクエストを検証し、サインアップユースケースの結果を HTTP ステータスに変換する。
//! 登録に成功した場合はアカウントの ID とメールアドレスを返す（パスワードハッシュは返さない）。

use std::sync::Arc;

use async_trait::async_trait;
use authflow_domain::account::{AccountId, Email};
use authflow_infra::EmailValidator;
use authflow_shared::ErrorResponse;
use serde::{Deserialize, Serialize};

use super::{HttpRoute, check_email, missing_body_response, non_empty};
use crate::{
    protocol::{HttpRequest, HttpResponse},
    usecase::{SignUpOutcome, SignUpUseCase},
};

/// サインアップリクエスト
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email:           Option<String>,
    pub password:        Option<String>,
    pub repeat_password: Option<String>,
}

/// サインアップレスポンス
#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub id:    AccountId,
    pub email: Email,
}

/// サインアップルーター
pub struct SignUpRouter {
    signup_usecase:  Option<Arc<dyn SignUpUseCase>>,
    email_validator: Option<Arc<dyn EmailValidator>>,
}

impl SignUpRouter {
    pub fn new(
        signup_usecase: Option<Arc<dyn SignUpUseCase>>,
        email_validator: Option<Arc<dyn EmailValidator>>,
    ) -> Self {
        Self {
            signup_usecase,
            email_validator,
        }
    }
}

#[async_trait]
impl HttpRoute for SignUpRouter {
    type Body = SignUpRequest;

    async fn route(&self, request: Option<HttpRequest<SignUpRequest>>) -> HttpResponse {
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
        let Some(repeat_password) = non_empty(body.repeat_password.as_deref()) else {
            return HttpResponse::bad_request(ErrorResponse::missing_param("repeatPassword"));
        };

        let Some(usecase) = self.signup_usecase.as_deref() else {
            tracing::error!(
                error.category = "configuration",
                error.kind = "signup_usecase",
                "サインアップユースケースが設定されていません"
            );
            return HttpResponse::server_error();
        };

        match usecase.sign_up(email, password, repeat_password).await {
            Ok(SignUpOutcome::Registered(account)) => HttpResponse::ok(&SignUpResponse {
                id:    account.id().clone(),
                email: account.email().clone(),
            }),
            Ok(SignUpOutcome::PasswordMismatch) => {
                HttpResponse::bad_request(ErrorResponse::invalid_param("repeatPassword"))
            }
            Ok(SignUpOutcome::EmailTaken) => {
                HttpResponse::bad_request(ErrorResponse::invalid_param("email"))
            }
            Err(e) => {
                tracing::error!(
                    error.category = e.category(),
                    error.kind = "signup",
                    "サインアップ処理で内部エラー: {}",
                    e
                );
                HttpResponse::server_error()
            }
        }
    }
}
