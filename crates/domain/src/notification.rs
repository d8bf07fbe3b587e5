//! # 通知
//!
//! 返品ステータス通知に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 備考 |
//! |---|------------|------|
//! | [`NotificationKind`] | 通知種別 | 新規 / ステータス変更 |
//! | [`Differences`] | 差分 | 変更前後のステータスコード |
//! | [`NotificationChannel`] | チャネル | 従業員メール / 顧客メール / 顧客 SMS |
//! | [`NotificationResult`] | 送信結果 | チャネルごとの成否 |
//!
//! ## 設計方針
//!
//! - **タグ付きバリアント**: 通知種別は整数定数ではなく enum で表現する
//! - **チャネル独立**: 1 チャネルの失敗は他チャネルの送信を妨げない
//! - **楽観的な成功記録**: メールは送信を試みた時点で成功として記録する

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use thiserror::Error;

use crate::{contractor::ContractorId, reseller::ResellerId};

/// 従業員の購読設定を引くときの権限キー
pub const GOODS_RETURN_PERMIT: &str = "tsGoodsReturn";

/// メッセージレンダラー・SMS 送信に渡すパラメータ
pub type MessageParams = BTreeMap<String, String>;

/// 通知送信エラー
///
/// チャネル内で完結し、オペレーションの失敗にはならない。
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

/// 変更前後のステータスコード
///
/// キーが存在し値が null でない場合に `Some` になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Differences {
    pub from: Option<i64>,
    pub to:   Option<i64>,
}

/// 通知種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// 新規ポジション追加（コード 1）
    New,
    /// ステータス変更（コード 2）
    ///
    /// ペイロードに差分がない場合は `Differences::default()` を保持する。
    Changed(Differences),
    /// 上記以外のコード
    ///
    /// 検証は通過するが、差分文言が空になるためテンプレート構築で失敗する。
    Unsupported(i64),
}

impl NotificationKind {
    pub const NEW_CODE: i64 = 1;
    pub const CHANGED_CODE: i64 = 2;

    /// ペイロードのコードと差分から通知種別を組み立てる
    pub fn from_code(code: i64, differences: Option<Differences>) -> Self {
        match code {
            Self::NEW_CODE => Self::New,
            Self::CHANGED_CODE => Self::Changed(differences.unwrap_or_default()),
            other => Self::Unsupported(other),
        }
    }

    /// ステータス変更の遷移先コード
    ///
    /// 顧客向け通知（メール・SMS）はこの値がある場合のみ送信する。
    /// 遷移先 0 は未指定と同じく扱い、顧客には通知しない。
    pub fn target_status(&self) -> Option<i64> {
        match self {
            Self::Changed(differences) => differences.to.filter(|&to| to != 0),
            Self::New | Self::Unsupported(_) => None,
        }
    }
}

/// 通知イベント
///
/// 送信時にトランスポートへ渡すイベントキー。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationEvent {
    /// 返品ステータス変更
    ChangeReturnStatus,
}

/// 通知チャネル
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum NotificationChannel {
    StaffEmail,
    ClientEmail,
    ClientSms,
}

/// ローカライズ済みメッセージのキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, strum::Display)]
pub enum MessageKey {
    #[strum(serialize = "NewPositionAdded")]
    NewPositionAdded,
    #[strum(serialize = "PositionStatusHasChanged")]
    PositionStatusHasChanged,
    #[strum(serialize = "complaintEmployeeEmailSubject")]
    EmployeeEmailSubject,
    #[strum(serialize = "complaintEmployeeEmailBody")]
    EmployeeEmailBody,
    #[strum(serialize = "complaintClientEmailSubject")]
    ClientEmailSubject,
    #[strum(serialize = "complaintClientEmailBody")]
    ClientEmailBody,
}

/// メールメッセージ
///
/// `NotificationSender` に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信元メールアドレス
    pub from:             String,
    /// 送信先メールアドレス
    pub to:               String,
    /// 件名
    pub subject:          String,
    /// 本文
    pub body:             String,
    pub reseller_id:      ResellerId,
    pub event:            NotificationEvent,
    /// 顧客向けメールの場合のみ設定される
    pub client_id:        Option<ContractorId>,
    /// 顧客向けメールの場合のみ設定される（遷移先ステータスコード）
    pub differences_code: Option<i64>,
}

/// SMS 送信リクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmsMessage {
    pub reseller_id:      ResellerId,
    pub client_id:        ContractorId,
    pub event:            NotificationEvent,
    pub differences_code: i64,
    pub params:           MessageParams,
}

/// SMS 送信の応答
///
/// `sent` が true でも `error` が設定されていることがある。
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SmsDelivery {
    pub sent:  bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl SmsDelivery {
    pub fn delivered() -> Self {
        Self {
            sent:  true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            sent:  false,
            error: Some(error.into()),
        }
    }
}

/// 顧客 SMS の送信結果
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SmsOutcome {
    pub sent:    bool,
    pub message: String,
}

impl From<SmsDelivery> for SmsOutcome {
    fn from(delivery: SmsDelivery) -> Self {
        Self {
            sent:    delivery.sent,
            message: delivery.error.unwrap_or_default(),
        }
    }
}

/// 返品通知オペレーションの結果
///
/// 1 回の呼び出しの中で組み立てられ、値として返される。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResult {
    pub staff_email_sent:  bool,
    pub client_email_sent: bool,
    pub client_sms:        SmsOutcome,
}
