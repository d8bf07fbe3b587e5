//! # PostgreSQL データベース接続管理
//!
//! 参照データ（販売者・取引先・通知設定）を読むための接続プールを作成する。
//! コアは読み取りのみを行う。

use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::error::InfraError;

/// 接続プールを作成する
///
/// # 引数
///
/// - `database_url`: PostgreSQL 接続 URL
pub async fn create_pool(database_url: &str) -> Result<PgPool, InfraError> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// 同梱のマイグレーションを適用する
pub async fn run_migrations(pool: &PgPool) -> Result<(), InfraError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
