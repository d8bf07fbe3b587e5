//! # ContractorRepository
//!
//! 取引先（顧客・従業員）の取得を担当するリポジトリ。
//!
//! 顧客・作成者・担当者はすべて同じ `contractors` テーブルに格納され、
//! `type` 列で区別される。種別ごとの検証はユースケース側で行う。

use std::str::FromStr;

use async_trait::async_trait;
use returnflow_domain::{
    contractor::{Contractor, ContractorId, ContractorType, NewContractor},
    reseller::ResellerId,
};
use sqlx::PgPool;

use crate::error::InfraError;

/// 取引先リポジトリトレイト
#[async_trait]
pub trait ContractorRepository: Send + Sync {
    /// ID で取引先を検索
    async fn find_by_id(&self, id: ContractorId) -> Result<Option<Contractor>, InfraError>;
}

/// PostgreSQL 実装の ContractorRepository
#[derive(Debug, Clone)]
pub struct PostgresContractorRepository {
    pool: PgPool,
}

impl PostgresContractorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ContractorRow {
    id:              i64,
    full_name:       String,
    name:            String,
    contractor_type: String,
    seller_id:       i64,
    email:           Option<String>,
    mobile:          Option<String>,
}

impl TryFrom<ContractorRow> for Contractor {
    type Error = InfraError;

    fn try_from(row: ContractorRow) -> Result<Self, Self::Error> {
        let contractor_type = ContractorType::from_str(&row.contractor_type).map_err(|_| {
            InfraError::invalid_data(format!("不明な取引先種別: {}", row.contractor_type))
        })?;

        Ok(Contractor::new(NewContractor {
            id: ContractorId::new(row.id),
            full_name: row.full_name,
            name: row.name,
            contractor_type,
            seller_id: ResellerId::new(row.seller_id),
            email: row.email,
            mobile: row.mobile,
        }))
    }
}

#[async_trait]
impl ContractorRepository for PostgresContractorRepository {
    async fn find_by_id(&self, id: ContractorId) -> Result<Option<Contractor>, InfraError> {
        let row: Option<ContractorRow> = sqlx::query_as(
            r#"
            SELECT
                id,
                full_name,
                name,
                type AS contractor_type,
                seller_id,
                email,
                mobile
            FROM contractors
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Contractor::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn row(contractor_type: &str) -> ContractorRow {
        ContractorRow {
            id:              7,
            full_name:       "山田 太郎".to_string(),
            name:            "山田".to_string(),
            contractor_type: contractor_type.to_string(),
            seller_id:       3,
            email:           Some("yamada@example.com".to_string()),
            mobile:          None,
        }
    }

    #[test]
    fn test_行を取引先に変換できる() {
        let contractor = Contractor::try_from(row("employee")).unwrap();

        assert_eq!(contractor.id(), ContractorId::new(7));
        assert_eq!(contractor.contractor_type(), ContractorType::Employee);
        assert_eq!(contractor.seller_id(), ResellerId::new(3));
        assert_eq!(contractor.email(), Some("yamada@example.com"));
    }

    #[test]
    fn test_不明な種別は不正データエラーになる() {
        let err = Contractor::try_from(row("vip")).unwrap_err();

        assert!(matches!(
            err.kind(),
            crate::InfraErrorKind::InvalidData(msg) if msg == "不明な取引先種別: vip"
        ));
    }
}
