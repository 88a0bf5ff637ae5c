//! # Auth Service アプリケーション構築
//!
//! ルーター構築とミドルウェアの適用を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use authflow_shared::{canonical_log::CanonicalLogLineLayer, observability::make_request_span};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handler::{
    LoginRouter,
    ReadinessState,
    SignUpRouter,
    adapt,
    health_check,
    readiness_check,
};

/// アプリケーションのルーターを構築する
///
/// `readiness` が `None` の場合、`/health/ready` は登録しない（テスト用）。
pub fn build_app(
    login_router: Arc<LoginRouter>,
    signup_router: Arc<SignUpRouter>,
    readiness: Option<Arc<ReadinessState>>,
) -> Router {
    let mut app = Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/login", post(adapt::<LoginRouter>))
                .with_state(login_router),
        )
        .merge(
            Router::new()
                .route("/signup", post(adapt::<SignUpRouter>))
                .with_state(signup_router),
        );

    if let Some(readiness_state) = readiness {
        app = app.merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        );
    }

    app.layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
}
