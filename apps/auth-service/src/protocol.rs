//! # ルーターの入出力
//!
//! ルーターは axum に依存せず、[`HttpRequest`] を受け取り [`HttpResponse`] を返す。
//! axum との変換は [`crate::handler::adapt`] と [`IntoResponse`] 実装が担う。

use authflow_shared::ErrorResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// ルーターへの入力
///
/// `body` が `None` の場合、ルーターは 500 を返す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest<B> {
    pub body: Option<B>,
}

impl<B> HttpRequest<B> {
    pub fn new(body: B) -> Self {
        Self { body: Some(body) }
    }

    pub fn without_body() -> Self {
        Self { body: None }
    }
}

/// レスポンスボディ
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Error(ErrorResponse),
    Data(serde_json::Value),
}

/// ルーターの出力
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status_code: StatusCode,
    pub body:        ResponseBody,
}

impl HttpResponse {
    /// 200 OK
    ///
    /// シリアライズに失敗した場合は 500 を返す。
    pub fn ok<T: Serialize>(data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => Self {
                status_code: StatusCode::OK,
                body:        ResponseBody::Data(value),
            },
            Err(e) => {
                tracing::error!(
                    error.category = "serialization",
                    error.kind = "response_body",
                    "レスポンスのシリアライズに失敗: {}",
                    e
                );
                Self::server_error()
            }
        }
    }

    /// 400 Bad Request
    pub fn bad_request(error: ErrorResponse) -> Self {
        Self {
            status_code: StatusCode::BAD_REQUEST,
            body:        ResponseBody::Error(error),
        }
    }

    /// 401 Unauthorized
    pub fn unauthorized() -> Self {
        Self {
            status_code: StatusCode::UNAUTHORIZED,
            body:        ResponseBody::Error(ErrorResponse::unauthorized()),
        }
    }

    /// 500 Internal Server Error
    pub fn server_error() -> Self {
        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            body:        ResponseBody::Error(ErrorResponse::server_error()),
        }
    }
}

impl IntoResponse for HttpResponse {
    fn into_response(self) -> Response {
        (self.status_code, Json(self.body)).into_response()
    }
}
