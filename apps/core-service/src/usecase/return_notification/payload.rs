//! # ペイロードの型変換
//!
//! 型なしの JSON ペイロードを [`ReturnNotificationPayload`] に変換する。
//!
//! 欠損値や型の合わない値はゼロ値（`0` / 空文字列）として扱い、
//! 変換自体は失敗しない。値の妥当性は後続の検証とテンプレート検査が判断する。

use returnflow_domain::{
    contractor::ContractorId,
    notification::{Differences, NotificationKind},
    reseller::ResellerId,
};
use serde_json::Value;

/// 型変換済みの返品通知ペイロード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnNotificationPayload {
    pub reseller_id:        ResellerId,
    pub kind:               NotificationKind,
    pub client_id:          ContractorId,
    pub creator_id:         ContractorId,
    pub expert_id:          ContractorId,
    pub complaint_id:       i64,
    pub complaint_number:   String,
    pub consumption_id:     i64,
    pub consumption_number: String,
    pub agreement_number:   String,
    pub date:               String,
}

impl ReturnNotificationPayload {
    /// JSON ペイロードから変換する
    ///
    /// オブジェクト以外の値は空のペイロードとして扱う。
    pub fn from_raw(raw: &Value) -> Self {
        let field = |name: &str| raw.get(name);

        let differences = coerce_differences(field("differences"));

        Self {
            reseller_id:        ResellerId::new(coerce_int(field("resellerId"))),
            kind:               NotificationKind::from_code(
                coerce_int(field("notificationType")),
                differences,
            ),
            client_id:          ContractorId::new(coerce_int(field("clientId"))),
            creator_id:         ContractorId::new(coerce_int(field("creatorId"))),
            expert_id:          ContractorId::new(coerce_int(field("expertId"))),
            complaint_id:       coerce_int(field("complaintId")),
            complaint_number:   coerce_string(field("complaintNumber")),
            consumption_id:     coerce_int(field("consumptionId")),
            consumption_number: coerce_string(field("consumptionNumber")),
            agreement_number:   coerce_string(field("agreementNumber")),
            date:               coerce_string(field("date")),
        }
    }
}

/// 整数に変換する
///
/// - 整数はそのまま、小数は切り捨て
/// - 文字列は先頭の整数部分（`"12abc"` → 12, `"3.7"` → 3）
/// - `true` は 1
/// - それ以外は 0
pub(crate) fn coerce_int(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|v| i64::try_from(v).unwrap_or(i64::MAX)))
            .or_else(|| n.as_f64().map(|v| v.trunc() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => leading_int(s),
        Some(Value::Bool(true)) => 1,
        _ => 0,
    }
}

/// 文字列に変換する
///
/// 数値は 10 進表記、`true` は `"1"`、それ以外は空文字列。
pub(crate) fn coerce_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(true)) => "1".to_string(),
        _ => String::new(),
    }
}

/// 差分オブジェクトに変換する
///
/// 空でないオブジェクトのみを差分とみなす。
/// `from` / `to` はキーが存在し null でない場合に `Some` になる。
fn coerce_differences(value: Option<&Value>) -> Option<Differences> {
    let object = value?.as_object().filter(|o| !o.is_empty())?;

    let status = |name: &str| {
        object
            .get(name)
            .filter(|v| !v.is_null())
            .map(|v| coerce_int(Some(v)))
    };

    Some(Differences {
        from: status("from"),
        to:   status("to"),
    })
}

/// 文字列先頭の整数部分を取り出す
///
/// 前後の空白と符号を許容する。数字が続かない場合は 0。
fn leading_int(s: &str) -> i64 {
    let s = s.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    let magnitude = digits[..end]
        .bytes()
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')));

    if negative { -magnitude } else { magnitude }
}
