//! # テスト用モック
//!
//! ユースケース・ハンドラのテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! returnflow-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! 送信系モックは受け取ったメッセージを記録するため、
//! テストから送信回数と内容を検証できる。

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use returnflow_domain::{
    contractor::{Contractor, ContractorId},
    notification::{EmailMessage, NotificationError, SmsDelivery, SmsMessage},
    reseller::{Reseller, ResellerId},
};

use crate::{
    error::InfraError,
    notification::NotificationSender,
    repository::{ContractorRepository, NotificationSettingsRepository, ResellerRepository},
    sms::SmsSender,
};

// ===== MockResellerRepository =====

#[derive(Clone, Default)]
pub struct MockResellerRepository {
    resellers:   Arc<Mutex<Vec<Reseller>>>,
    unavailable: bool,
}

impl MockResellerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// すべての検索が `InfraError` を返すリポジトリ
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn add_reseller(&self, reseller: Reseller) {
        self.resellers.lock().unwrap().push(reseller);
    }
}

#[async_trait]
impl ResellerRepository for MockResellerRepository {
    async fn find_by_id(&self, id: ResellerId) -> Result<Option<Reseller>, InfraError> {
        if self.unavailable {
            return Err(InfraError::unexpected("reseller store unavailable"));
        }
        Ok(self
            .resellers
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id() == id)
            .cloned())
    }
}

// ===== MockContractorRepository =====

#[derive(Clone, Default)]
pub struct MockContractorRepository {
    contractors: Arc<Mutex<Vec<Contractor>>>,
}

impl MockContractorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_contractor(&self, contractor: Contractor) {
        self.contractors.lock().unwrap().push(contractor);
    }
}

#[async_trait]
impl ContractorRepository for MockContractorRepository {
    async fn find_by_id(&self, id: ContractorId) -> Result<Option<Contractor>, InfraError> {
        Ok(self
            .contractors
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id() == id)
            .cloned())
    }
}

// ===== MockNotificationSettingsRepository =====

#[derive(Debug, Clone)]
struct Subscription {
    reseller_id: ResellerId,
    permit_key:  String,
    email:       String,
}

#[derive(Clone, Default)]
pub struct MockNotificationSettingsRepository {
    subscriptions: Arc<Mutex<Vec<Subscription>>>,
    senders:       Arc<Mutex<Vec<(ResellerId, String)>>>,
    unavailable:   bool,
}

impl MockNotificationSettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// すべての検索が `InfraError` を返すリポジトリ
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn add_subscription(&self, reseller_id: ResellerId, permit_key: &str, email: &str) {
        self.subscriptions.lock().unwrap().push(Subscription {
            reseller_id,
            permit_key: permit_key.to_string(),
            email: email.to_string(),
        });
    }

    pub fn set_sender_email(&self, reseller_id: ResellerId, email: &str) {
        let mut senders = self.senders.lock().unwrap();
        senders.retain(|(id, _)| *id != reseller_id);
        senders.push((reseller_id, email.to_string()));
    }
}

#[async_trait]
impl NotificationSettingsRepository for MockNotificationSettingsRepository {
    async fn find_subscribed_emails(
        &self,
        reseller_id: ResellerId,
        permit_key: &str,
    ) -> Result<Vec<String>, InfraError> {
        if self.unavailable {
            return Err(InfraError::unexpected("settings store unavailable"));
        }
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.reseller_id == reseller_id && s.permit_key == permit_key)
            .map(|s| s.email.clone())
            .collect())
    }

    async fn find_sender_email(
        &self,
        reseller_id: ResellerId,
    ) -> Result<Option<String>, InfraError> {
        if self.unavailable {
            return Err(InfraError::unexpected("settings store unavailable"));
        }
        Ok(self
            .senders
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| *id == reseller_id)
            .map(|(_, email)| email.clone()))
    }
}

// ===== MockNotificationSender =====

/// 送信したメールを記録するモック
///
/// [`fail_for`](Self::fail_for) で登録した宛先への送信は `SendFailed` を返す。
/// 失敗した送信も記録される。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent:       Arc<Mutex<Vec<EmailMessage>>>,
    failing_to: Arc<Mutex<HashSet<String>>>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_for(&self, to: &str) {
        self.failing_to.lock().unwrap().insert(to.to_string());
    }

    /// 送信を試みたメールの一覧
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(email.clone());
        if self.failing_to.lock().unwrap().contains(&email.to) {
            return Err(NotificationError::SendFailed(format!(
                "mock transport rejected {}",
                email.to
            )));
        }
        Ok(())
    }
}

// ===== MockSmsSender =====

/// 送信した SMS を記録し、設定済みの応答を返すモック
#[derive(Clone)]
pub struct MockSmsSender {
    sent:     Arc<Mutex<Vec<SmsMessage>>>,
    response: SmsDelivery,
}

impl Default for MockSmsSender {
    fn default() -> Self {
        Self::with_response(SmsDelivery::delivered())
    }
}

impl MockSmsSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(response: SmsDelivery) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            response,
        }
    }

    pub fn sent_messages(&self) -> Vec<SmsMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsSender for MockSmsSender {
    async fn send_sms(&self, sms: &SmsMessage) -> SmsDelivery {
        self.sent.lock().unwrap().push(sms.clone());
        self.response.clone()
    }
}
