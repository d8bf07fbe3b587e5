//! # Core Service サーバー
//!
//! 返品ステータスの変更を従業員と顧客に通知する内部サービス。
//!
//! ## 役割
//!
//! - **検証**: 販売者・顧客・作成者・担当者を参照データと突き合わせる
//! - **テンプレート**: 通知用のテンプレートコンテキストを組み立てる
//! - **送信**: 従業員メール・顧客メール・顧客 SMS をチャネルごとに独立して送る
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `CORE_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `CORE_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | 参照データの PostgreSQL 接続 URL |
//! | `NOTIFICATION_BACKEND` | No | `smtp` / `noop`（デフォルト: `noop`） |
//! | `SMTP_HOST` / `SMTP_PORT` | No | SMTP リレー（デフォルト: `localhost:1025`） |
//! | `SMS_BACKEND` | No | `http` / `noop`（デフォルト: `noop`） |
//! | `SMS_GATEWAY_URL` | `SMS_BACKEND=http` の場合 | SMS ゲートウェイのベース URL |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! CORE_PORT=13001 DATABASE_URL=postgres://... cargo run -p returnflow-core-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use returnflow_core_service::{
    config::{CoreConfig, NotificationConfig, SmsConfig},
    handler::{ReturnNotificationState, health_check, notify_return_status_changed},
    usecase::{ReturnNotificationDeps, ReturnNotificationUseCase, TeraMessageRenderer},
};
use returnflow_infra::{
    db,
    notification::{NoopNotificationSender, NotificationSender, SmtpNotificationSender},
    repository::{
        PostgresContractorRepository,
        PostgresNotificationSettingsRepository,
        PostgresResellerRepository,
    },
    sms::{HttpSmsSender, NoopSmsSender, SmsSender},
};
use returnflow_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Core Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(&TracingConfig::from_env("core-service"));

    let config = CoreConfig::from_env()?;

    tracing::info!(
        "Core Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;
    tracing::info!("データベースに接続しました");

    let email_sender: Arc<dyn NotificationSender> = match &config.notification {
        NotificationConfig::Smtp { host, port } => {
            tracing::info!("メール送信: SMTP ({}:{})", host, port);
            Arc::new(SmtpNotificationSender::new(host, *port))
        }
        NotificationConfig::Noop => {
            tracing::info!("メール送信: Noop");
            Arc::new(NoopNotificationSender)
        }
    };

    let sms_sender: Arc<dyn SmsSender> = match &config.sms {
        SmsConfig::Http { gateway_url } => {
            tracing::info!("SMS 送信: HTTP ({})", gateway_url);
            Arc::new(HttpSmsSender::new(gateway_url))
        }
        SmsConfig::Noop => {
            tracing::info!("SMS 送信: Noop");
            Arc::new(NoopSmsSender)
        }
    };

    let usecase = ReturnNotificationUseCase::new(ReturnNotificationDeps {
        reseller_repo: Arc::new(PostgresResellerRepository::new(pool.clone())),
        contractor_repo: Arc::new(PostgresContractorRepository::new(pool.clone())),
        settings_repo: Arc::new(PostgresNotificationSettingsRepository::new(pool)),
        renderer: Arc::new(TeraMessageRenderer::new()?),
        email_sender,
        sms_sender,
    });
    let state = Arc::new(ReturnNotificationState { usecase });

    let app = Router::new()
        .route("/health", get(health_check))
        .route(
            "/internal/returns/notifications",
            post(notify_return_status_changed),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Core Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
