//! # 取引先
//!
//! 顧客（Client）と従業員（作成者・担当エキスパート）を表す取引先レコード。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 不変条件 |
//! |---|------------|------|
//! | [`Contractor`] | 取引先 | 外部ストアが所有し、コアは読むだけ |
//! | [`ContractorType::Customer`] | 顧客 | `seller_id` がイベントの販売者と一致すること |
//! | [`ContractorType::Employee`] | 従業員 | 作成者・担当エキスパートとして解決できること |

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::reseller::ResellerId;

define_int_id! {
    /// 取引先 ID
    pub struct ContractorId;
}

/// 取引先種別
///
/// DB の `contractors.type` カラムに snake_case で格納される。
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
pub enum ContractorType {
    /// 顧客
    Customer,
    /// 従業員
    Employee,
    /// 販売者自身の取引先レコード
    Seller,
}

/// 取引先作成パラメータ
#[derive(Debug, Clone)]
pub struct NewContractor {
    pub id:              ContractorId,
    pub full_name:       String,
    pub name:            String,
    pub contractor_type: ContractorType,
    pub seller_id:       ResellerId,
    pub email:           Option<String>,
    pub mobile:          Option<String>,
}

/// 取引先
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contractor {
    id:              ContractorId,
    full_name:       String,
    name:            String,
    contractor_type: ContractorType,
    seller_id:       ResellerId,
    email:           Option<String>,
    mobile:          Option<String>,
}

impl Contractor {
    pub fn new(params: NewContractor) -> Self {
        Self {
            id:              params.id,
            full_name:       params.full_name,
            name:            params.name,
            contractor_type: params.contractor_type,
            seller_id:       params.seller_id,
            email:           params.email,
            mobile:          params.mobile,
        }
    }

    pub fn id(&self) -> ContractorId {
        self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contractor_type(&self) -> ContractorType {
        self.contractor_type
    }

    pub fn seller_id(&self) -> ResellerId {
        self.seller_id
    }

    /// メールアドレス（空白のみの場合は `None`）
    pub fn email(&self) -> Option<&str> {
        non_blank(self.email.as_deref())
    }

    /// 携帯電話番号（空白のみの場合は `None`）
    pub fn mobile(&self) -> Option<&str> {
        non_blank(self.mobile.as_deref())
    }

    /// 表示名
    ///
    /// `full_name` が空白の場合は `name` にフォールバックする。
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.name
        } else {
            &self.full_name
        }
    }

    /// 指定した販売者の顧客かどうか
    pub fn is_customer_of(&self, reseller_id: ResellerId) -> bool {
        self.contractor_type == ContractorType::Customer && self.seller_id == reseller_id
    }

    /// 従業員かどうか
    pub fn is_employee(&self) -> bool {
        self.contractor_type == ContractorType::Employee
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
