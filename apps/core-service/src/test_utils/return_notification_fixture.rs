//! 返品通知テストフィクスチャ
//!
//! 標準的な参照データ・通知設定・ペイロードと、モックを組み込んだ
//! ユースケースのセットアップを提供する。
//!
//! 標準データ:
//!
//! - 販売者 `RESELLER_ID`（送信元 `SENDER_EMAIL`、購読者 `STAFF_EMAILS`）
//! - 顧客 `CLIENT_ID`（`CLIENT_EMAIL` / `CLIENT_MOBILE`）
//! - 作成者 `CREATOR_ID`、担当者 `EXPERT_ID`（どちらも従業員）

use std::sync::Arc;

use returnflow_domain::{
    contractor::{Contractor, ContractorId, ContractorType, NewContractor},
    notification::{GOODS_RETURN_PERMIT, SmsDelivery},
    reseller::{Reseller, ResellerId},
    template::TemplateContext,
};
use returnflow_infra::mock::{
    MockContractorRepository,
    MockNotificationSender,
    MockNotificationSettingsRepository,
    MockResellerRepository,
    MockSmsSender,
};
use serde_json::{Value, json};

use crate::usecase::{ReturnNotificationDeps, ReturnNotificationUseCase, TeraMessageRenderer};

pub const RESELLER_ID: i64 = 1;
pub const CLIENT_ID: i64 = 10;
pub const CREATOR_ID: i64 = 20;
pub const EXPERT_ID: i64 = 30;

pub const SENDER_EMAIL: &str = "shop@example.com";
pub const STAFF_EMAILS: [&str; 2] = ["staff1@example.com", "staff2@example.com"];
pub const CLIENT_EMAIL: &str = "client@example.com";
pub const CLIENT_MOBILE: &str = "+819012345678";

/// 任意の種別の取引先を作成する
pub fn make_contractor(id: i64, contractor_type: ContractorType) -> Contractor {
    Contractor::new(NewContractor {
        id: ContractorId::new(id),
        full_name: format!("取引先 {id}"),
        name: format!("取引先{id}"),
        contractor_type,
        seller_id: ResellerId::new(RESELLER_ID),
        email: None,
        mobile: None,
    })
}

/// 標準の顧客を作成する
pub fn make_client(email: Option<&str>, mobile: Option<&str>) -> Contractor {
    Contractor::new(NewContractor {
        id: ContractorId::new(CLIENT_ID),
        full_name: "顧客 一郎".to_string(),
        name: "顧客".to_string(),
        contractor_type: ContractorType::Customer,
        seller_id: ResellerId::new(RESELLER_ID),
        email: email.map(str::to_string),
        mobile: mobile.map(str::to_string),
    })
}

/// 表示名を指定して顧客を作成する
pub fn make_client_named(full_name: &str, name: &str) -> Contractor {
    Contractor::new(NewContractor {
        id: ContractorId::new(CLIENT_ID),
        full_name: full_name.to_string(),
        name: name.to_string(),
        contractor_type: ContractorType::Customer,
        seller_id: ResellerId::new(RESELLER_ID),
        email: None,
        mobile: None,
    })
}

/// 従業員を作成する
pub fn make_employee(id: i64, full_name: &str) -> Contractor {
    Contractor::new(NewContractor {
        id: ContractorId::new(id),
        full_name: full_name.to_string(),
        name: String::new(),
        contractor_type: ContractorType::Employee,
        seller_id: ResellerId::new(RESELLER_ID),
        email: None,
        mobile: None,
    })
}

fn base_payload(notification_type: i64) -> Value {
    json!({
        "resellerId": RESELLER_ID,
        "notificationType": notification_type,
        "clientId": CLIENT_ID,
        "creatorId": CREATOR_ID,
        "expertId": EXPERT_ID,
        "complaintId": 100,
        "complaintNumber": "R-100",
        "consumptionId": 200,
        "consumptionNumber": "C-200",
        "agreementNumber": "AG-7",
        "date": "2024-05-01",
    })
}

/// ステータス変更のペイロード
pub fn changed_payload(from: i64, to: i64) -> Value {
    let mut payload = base_payload(2);
    if let Some(object) = payload.as_object_mut() {
        object.insert("differences".to_string(), json!({"from": from, "to": to}));
    }
    payload
}

/// 新規ポジションのペイロード
pub fn new_payload() -> Value {
    base_payload(1)
}

/// 標準ペイロード（ステータス変更 1 → 2）に対応するコンテキスト
pub fn make_template_context() -> TemplateContext {
    TemplateContext {
        complaint_id:       100,
        complaint_number:   "R-100".to_string(),
        creator_id:         ContractorId::new(CREATOR_ID),
        creator_name:       "作成 太郎".to_string(),
        expert_id:          ContractorId::new(EXPERT_ID),
        expert_name:        "担当 花子".to_string(),
        client_id:          ContractorId::new(CLIENT_ID),
        client_name:        "顧客 一郎".to_string(),
        consumption_id:     200,
        consumption_number: "C-200".to_string(),
        agreement_number:   "AG-7".to_string(),
        date:               "2024-05-01".to_string(),
        differences:        "返品ステータスが「Pending」から「Rejected」に変更されました".to_string(),
    }
}

/// 返品通知ユースケースのフィクスチャ
///
/// モックは内部状態を共有するため、ユースケース構築後もテストから
/// データの追加や送信記録の確認ができる。
///
/// # 使用例
///
/// ```ignore
/// let fixture = ReturnNotificationFixture::new();
/// let result = fixture.build_usecase().execute(&changed_payload(1, 2)).await;
/// assert_eq!(fixture.email_sender.sent_emails().len(), 3);
/// ```
pub struct ReturnNotificationFixture {
    pub reseller_repo:   MockResellerRepository,
    pub contractor_repo: MockContractorRepository,
    pub settings_repo:   MockNotificationSettingsRepository,
    pub email_sender:    MockNotificationSender,
    pub sms_sender:      MockSmsSender,
}

impl Default for ReturnNotificationFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl ReturnNotificationFixture {
    /// 標準データを投入したフィクスチャ
    pub fn new() -> Self {
        Self::with_client(make_client(Some(CLIENT_EMAIL), Some(CLIENT_MOBILE)))
    }

    /// 顧客だけを差し替えたフィクスチャ
    pub fn with_client(client: Contractor) -> Self {
        let fixture = Self::empty();
        let reseller_id = ResellerId::new(RESELLER_ID);

        fixture
            .reseller_repo
            .add_reseller(Reseller::new(reseller_id));
        fixture.contractor_repo.add_contractor(client);
        fixture
            .contractor_repo
            .add_contractor(make_employee(CREATOR_ID, "作成 太郎"));
        fixture
            .contractor_repo
            .add_contractor(make_employee(EXPERT_ID, "担当 花子"));

        fixture
            .settings_repo
            .set_sender_email(reseller_id, SENDER_EMAIL);
        for email in STAFF_EMAILS {
            fixture
                .settings_repo
                .add_subscription(reseller_id, GOODS_RETURN_PERMIT, email);
        }

        fixture
    }

    /// データを投入していないフィクスチャ
    pub fn empty() -> Self {
        Self {
            reseller_repo:   MockResellerRepository::new(),
            contractor_repo: MockContractorRepository::new(),
            settings_repo:   MockNotificationSettingsRepository::new(),
            email_sender:    MockNotificationSender::new(),
            sms_sender:      MockSmsSender::new(),
        }
    }

    /// SMS ゲートウェイの応答を差し替える
    pub fn with_sms_response(mut self, response: SmsDelivery) -> Self {
        self.sms_sender = MockSmsSender::with_response(response);
        self
    }

    /// モックを組み込んだユースケースを構築する
    pub fn build_usecase(&self) -> ReturnNotificationUseCase {
        let renderer = match TeraMessageRenderer::new() {
            Ok(renderer) => renderer,
            Err(e) => panic!("埋め込みテンプレートの登録に失敗: {e}"),
        };

        ReturnNotificationUseCase::new(ReturnNotificationDeps {
            reseller_repo:   Arc::new(self.reseller_repo.clone()),
            contractor_repo: Arc::new(self.contractor_repo.clone()),
            settings_repo:   Arc::new(self.settings_repo.clone()),
            renderer:        Arc::new(renderer),
            email_sender:    Arc::new(self.email_sender.clone()),
            sms_sender:      Arc::new(self.sms_sender.clone()),
        })
    }
}
