//! # Auth Service サーバー
//!
//! サインアップとログインを提供する API サーバー。
//!
//! ## エンドポイント
//!
//! - `POST /signup` - アカウント登録
//! - `POST /login` - ログイン（アクセストークン発行）
//! - `GET /health` - Liveness
//! - `GET /health/ready` - Readiness（データベース疎通）
//!
//! ## 環境変数
//!
//! → [`authflow_auth_service::config`] を参照
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env を読み込む）
//! cargo run -p authflow-auth-service
//!
//! # 本番環境
//! AUTH_PORT=13002 DATABASE_URL=postgres://... JWT_SECRET=... \
//!   cargo run -p authflow-auth-service --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use authflow_auth_service::{
    app_builder::build_app,
    config::AuthConfig,
    handler::{LoginRouter, ReadinessState, SignUpRouter},
    usecase::{AuthUseCase, AuthUseCaseImpl, SignUpUseCase, SignUpUseCaseImpl},
};
use authflow_infra::{
    Argon2PasswordChecker,
    Argon2PasswordHasher,
    EmailValidator,
    JwtTokenIssuer,
    SyntaxEmailValidator,
    db,
    repository::{AccountRepository, PostgresAccountRepository},
};
use authflow_shared::observability::TracingConfig;
use tokio::net::TcpListener;

/// Auth Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("auth-service");
    authflow_shared::observability::init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "auth-service").entered();

    // 設定読み込み
    let config = AuthConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Auth Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    // マイグレーション実行
    db::run_migrations(&pool)
        .await
        .context("マイグレーションの実行に失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    // Readiness Check 用 State（pool が move される前に clone）
    let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });

    // 依存コンポーネントを初期化
    let account_repository: Arc<dyn AccountRepository> =
        Arc::new(PostgresAccountRepository::new(pool));
    let email_validator: Arc<dyn EmailValidator> = Arc::new(SyntaxEmailValidator);

    let auth_usecase: Arc<dyn AuthUseCase> = Arc::new(AuthUseCaseImpl::new(
        Some(account_repository.clone()),
        Arc::new(Argon2PasswordChecker::new()),
        Arc::new(JwtTokenIssuer::new(
            config.jwt_secret.as_bytes(),
            config.access_token_ttl,
        )),
    ));
    let signup_usecase: Arc<dyn SignUpUseCase> = Arc::new(SignUpUseCaseImpl::new(
        Some(account_repository),
        Arc::new(Argon2PasswordHasher::new()),
    ));

    let login_router = Arc::new(LoginRouter::new(
        Some(auth_usecase),
        Some(email_validator.clone()),
    ));
    let signup_router = Arc::new(SignUpRouter::new(
        Some(signup_usecase),
        Some(email_validator),
    ));

    // ルーター構築
    let app = build_app(login_router, signup_router, Some(readiness_state));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Auth Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
