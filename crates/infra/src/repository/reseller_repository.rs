//! # ResellerRepository
//!
//! 販売者の存在確認を担当するリポジトリ。

use async_trait::async_trait;
use returnflow_domain::reseller::{Reseller, ResellerId};
use sqlx::PgPool;

use crate::error::InfraError;

/// 販売者リポジトリトレイト
#[async_trait]
pub trait ResellerRepository: Send + Sync {
    /// ID で販売者を検索
    async fn find_by_id(&self, id: ResellerId) -> Result<Option<Reseller>, InfraError>;
}

/// PostgreSQL 実装の ResellerRepository
#[derive(Debug, Clone)]
pub struct PostgresResellerRepository {
    pool: PgPool,
}

impl PostgresResellerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResellerRepository for PostgresResellerRepository {
    async fn find_by_id(&self, id: ResellerId) -> Result<Option<Reseller>, InfraError> {
        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            SELECT id
            FROM sellers
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id,)| Reseller::new(ResellerId::new(id))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresResellerRepository>();
    }
}
