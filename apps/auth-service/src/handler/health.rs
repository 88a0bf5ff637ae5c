//! # ヘルスチェックハンドラ
//!
//! Auth Service の稼働状態を確認するためのエンドポイント。
//!
//! - `GET /health`: プロセスが応答できるか（liveness）
//! - `GET /health/ready`: データベースに接続できるか（readiness）
//!
//! レスポンス型は [`authflow_shared::HealthResponse`] / [`authflow_shared::ReadinessResponse`] を参照。

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use authflow_infra::db;
use authflow_shared::{CheckStatus, HealthResponse, ReadinessResponse};
use axum::{Json, extract::State, http::StatusCode};
use sqlx::PgPool;

/// データベース疎通確認のタイムアウト
const PING_TIMEOUT: Duration = Duration::from_secs(5);

/// Readiness Check の共有状態
pub struct ReadinessState {
    pub pool: PgPool,
}

/// Auth Service のヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// Auth Service の Readiness Check エンドポイント
///
/// 全チェック OK → 200、1 つでも失敗 → 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(
    State(state): State<Arc<ReadinessState>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let database = check_database(&state.pool).await;

    let response = ReadinessResponse::from_checks(BTreeMap::from([(
        "database".to_string(),
        database,
    )]));
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

/// データベースへの接続を `SELECT 1` で確認する（タイムアウト: 5 秒）
async fn check_database(pool: &PgPool) -> CheckStatus {
    match tokio::time::timeout(PING_TIMEOUT, db::ping(pool)).await {
        Ok(Ok(())) => CheckStatus::Ok,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "readiness check: database ping failed");
            CheckStatus::Error
        }
        Err(_) => {
            tracing::warn!("readiness check: database ping timed out");
            CheckStatus::Error
        }
    }
}
