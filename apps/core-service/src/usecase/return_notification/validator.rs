//! # ペイロード検証
//!
//! 販売者・顧客・作成者・担当者を参照データと突き合わせる。
//!
//! 検査は次の順で行い、最初に失敗したものを返す:
//!
//! 1. 販売者が存在する
//! 2. 顧客が存在し、顧客種別で、同じ販売者に属する
//! 3. 作成者が従業員として存在する
//! 4. 担当者が従業員として存在する

use std::sync::Arc;

use returnflow_domain::{
    DomainError,
    ReferenceKind,
    contractor::{Contractor, ContractorId},
    reseller::Reseller,
};
use returnflow_infra::repository::{ContractorRepository, ResellerRepository};

use super::{OperationPhase, payload::ReturnNotificationPayload};
use crate::error::CoreError;

/// 検証済みの返品通知
#[derive(Debug, Clone)]
pub struct ValidatedReturn {
    pub payload:  ReturnNotificationPayload,
    pub reseller: Reseller,
    pub client:   Contractor,
    pub creator:  Contractor,
    pub expert:   Contractor,
}

/// ペイロード検証器
pub struct PayloadValidator {
    reseller_repo:   Arc<dyn ResellerRepository>,
    contractor_repo: Arc<dyn ContractorRepository>,
}

impl PayloadValidator {
    pub fn new(
        reseller_repo: Arc<dyn ResellerRepository>,
        contractor_repo: Arc<dyn ContractorRepository>,
    ) -> Self {
        Self {
            reseller_repo,
            contractor_repo,
        }
    }

    /// ペイロードを検証し、参照先を解決する
    ///
    /// 参照ストアの障害は [`CoreError::Database`] として返す。
    pub async fn validate(
        &self,
        payload: ReturnNotificationPayload,
    ) -> Result<ValidatedReturn, CoreError> {
        let reseller_id = payload.reseller_id;

        let reseller = self
            .reseller_repo
            .find_by_id(reseller_id)
            .await?
            .ok_or_else(|| {
                DomainError::reference_not_found(ReferenceKind::Seller, reseller_id.as_i64())
            })?;

        let client = self
            .contractor_repo
            .find_by_id(payload.client_id)
            .await?
            .filter(|client| client.is_customer_of(reseller_id))
            .ok_or_else(|| {
                DomainError::reference_not_found(ReferenceKind::Client, payload.client_id.as_i64())
            })?;

        super::enter(OperationPhase::Resolving);

        let creator = self
            .resolve_employee(payload.creator_id, ReferenceKind::Creator)
            .await?;
        let expert = self
            .resolve_employee(payload.expert_id, ReferenceKind::Expert)
            .await?;

        Ok(ValidatedReturn {
            payload,
            reseller,
            client,
            creator,
            expert,
        })
    }

    async fn resolve_employee(
        &self,
        id: ContractorId,
        kind: ReferenceKind,
    ) -> Result<Contractor, CoreError> {
        let employee = self
            .contractor_repo
            .find_by_id(id)
            .await?
            .filter(Contractor::is_employee)
            .ok_or_else(|| DomainError::reference_not_found(kind, id.as_i64()))?;

        Ok(employee)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use returnflow_domain::{contractor::ContractorType, reseller::ResellerId};
    use returnflow_infra::mock::{MockContractorRepository, MockResellerRepository};
    use serde_json::json;

    use super::*;
    use crate::test_utils::{
        CLIENT_ID,
        CREATOR_ID,
        EXPERT_ID,
        RESELLER_ID,
        changed_payload,
        make_client,
        make_contractor,
        make_employee,
    };

    fn seeded_repos() -> (MockResellerRepository, MockContractorRepository) {
        let resellers = MockResellerRepository::new();
        resellers.add_reseller(Reseller::new(ResellerId::new(RESELLER_ID)));

        let contractors = MockContractorRepository::new();
        contractors.add_contractor(make_client(Some("client@example.com"), None));
        contractors.add_contractor(make_employee(CREATOR_ID, "作成 太郎"));
        contractors.add_contractor(make_employee(EXPERT_ID, "担当 花子"));

        (resellers, contractors)
    }

    fn validator(
        resellers: MockResellerRepository,
        contractors: MockContractorRepository,
    ) -> PayloadValidator {
        PayloadValidator::new(Arc::new(resellers), Arc::new(contractors))
    }

    fn payload(overrides: serde_json::Value) -> ReturnNotificationPayload {
        let mut raw = changed_payload(1, 2);
        if let (Some(raw), Some(overrides)) = (raw.as_object_mut(), overrides.as_object()) {
            for (k, v) in overrides {
                raw.insert(k.clone(), v.clone());
            }
        }
        ReturnNotificationPayload::from_raw(&raw)
    }

    fn reference_kind(result: Result<ValidatedReturn, CoreError>) -> ReferenceKind {
        match result {
            Err(CoreError::Domain(DomainError::ReferenceNotFound { kind, .. })) => kind,
            other => panic!("ReferenceNotFound を期待したが {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_すべて解決できれば検証済みの返品を返す() {
        let (resellers, contractors) = seeded_repos();

        let validated = validator(resellers, contractors)
            .validate(payload(json!({})))
            .await
            .unwrap();

        assert_eq!(validated.reseller.id(), ResellerId::new(RESELLER_ID));
        assert_eq!(validated.client.id(), ContractorId::new(CLIENT_ID));
        assert_eq!(validated.creator.full_name(), "作成 太郎");
        assert_eq!(validated.expert.full_name(), "担当 花子");
    }

    #[tokio::test]
    async fn test_販売者が存在しなければsellerエラー() {
        let (_, contractors) = seeded_repos();

        let result = validator(MockResellerRepository::new(), contractors)
            .validate(payload(json!({})))
            .await;

        assert_eq!(reference_kind(result), ReferenceKind::Seller);
    }

    #[tokio::test]
    async fn test_販売者の検査は顧客より先に行われる() {
        let result = validator(MockResellerRepository::new(), MockContractorRepository::new())
            .validate(payload(json!({})))
            .await;

        assert_eq!(reference_kind(result), ReferenceKind::Seller);
    }

    #[tokio::test]
    async fn test_顧客が別の販売者に属していればclientエラー() {
        let (resellers, contractors) = seeded_repos();
        resellers.add_reseller(Reseller::new(ResellerId::new(2)));

        let result = validator(resellers, contractors)
            .validate(payload(json!({"resellerId": 2})))
            .await;

        assert_eq!(reference_kind(result), ReferenceKind::Client);
    }

    #[tokio::test]
    async fn test_顧客種別でなければclientエラー() {
        let (resellers, contractors) = seeded_repos();

        let result = validator(resellers, contractors)
            .validate(payload(json!({"clientId": CREATOR_ID})))
            .await;

        assert_eq!(reference_kind(result), ReferenceKind::Client);
    }

    #[tokio::test]
    async fn test_作成者が存在しなければcreatorエラー() {
        let (resellers, contractors) = seeded_repos();

        let result = validator(resellers, contractors)
            .validate(payload(json!({"creatorId": 999})))
            .await;

        assert_eq!(reference_kind(result), ReferenceKind::Creator);
    }

    #[tokio::test]
    async fn test_従業員でない担当者はexpertエラー() {
        let (resellers, contractors) = seeded_repos();
        contractors.add_contractor(make_contractor(40, ContractorType::Seller));

        let result = validator(resellers, contractors)
            .validate(payload(json!({"expertId": 40})))
            .await;

        assert_eq!(reference_kind(result), ReferenceKind::Expert);
    }

    #[tokio::test]
    async fn test_参照ストアの障害はデータベースエラー() {
        let (_, contractors) = seeded_repos();

        let result = validator(MockResellerRepository::unavailable(), contractors)
            .validate(payload(json!({})))
            .await;

        assert!(matches!(result, Err(CoreError::Database(_))));
    }
}
