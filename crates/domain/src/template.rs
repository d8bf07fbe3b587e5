//! # テンプレートコンテキスト
//!
//! すべての通知チャネルで共通に使うフラットなテンプレート変数の集合。
//!
//! ## 不変条件
//!
//! 送信前にすべてのフィールドが空でないこと。1 つでも空であれば
//! [`DomainError::IncompleteTemplate`] としてコンテキスト全体を拒否する。
//! 空の判定は [`TemplateValue::is_empty`] を参照。

use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::{DomainError, contractor::ContractorId, notification::MessageParams};

/// テンプレート変数名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, EnumIter, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateField {
    ComplaintId,
    ComplaintNumber,
    CreatorId,
    CreatorName,
    ExpertId,
    ExpertName,
    ClientId,
    ClientName,
    ConsumptionId,
    ConsumptionNumber,
    AgreementNumber,
    Date,
    Differences,
}

/// テンプレート変数の値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateValue<'a> {
    Int(i64),
    Text(&'a str),
}

impl TemplateValue<'_> {
    /// ゼロ値相当かどうか
    ///
    /// 整数 0、空文字列、文字列 `"0"` を空とみなす。
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Int(v) => *v == 0,
            Self::Text(v) => v.is_empty() || *v == "0",
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Int(v) => v.to_string(),
            Self::Text(v) => (*v).to_string(),
        }
    }
}

/// テンプレートコンテキスト
///
/// 検証済みのイベントと解決済みの取引先から組み立てられる。
/// 組み立て後は不変で、各チャネルに共有参照で渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateContext {
    pub complaint_id:       i64,
    pub complaint_number:   String,
    pub creator_id:         ContractorId,
    pub creator_name:       String,
    pub expert_id:          ContractorId,
    pub expert_name:        String,
    pub client_id:          ContractorId,
    pub client_name:        String,
    pub consumption_id:     i64,
    pub consumption_number: String,
    pub agreement_number:   String,
    pub date:               String,
    pub differences:        String,
}

impl TemplateContext {
    /// フィールド名に対応する値を返す
    pub fn value(&self, field: TemplateField) -> TemplateValue<'_> {
        match field {
            TemplateField::ComplaintId => TemplateValue::Int(self.complaint_id),
            TemplateField::ComplaintNumber => TemplateValue::Text(&self.complaint_number),
            TemplateField::CreatorId => TemplateValue::Int(self.creator_id.as_i64()),
            TemplateField::CreatorName => TemplateValue::Text(&self.creator_name),
            TemplateField::ExpertId => TemplateValue::Int(self.expert_id.as_i64()),
            TemplateField::ExpertName => TemplateValue::Text(&self.expert_name),
            TemplateField::ClientId => TemplateValue::Int(self.client_id.as_i64()),
            TemplateField::ClientName => TemplateValue::Text(&self.client_name),
            TemplateField::ConsumptionId => TemplateValue::Int(self.consumption_id),
            TemplateField::ConsumptionNumber => TemplateValue::Text(&self.consumption_number),
            TemplateField::AgreementNumber => TemplateValue::Text(&self.agreement_number),
            TemplateField::Date => TemplateValue::Text(&self.date),
            TemplateField::Differences => TemplateValue::Text(&self.differences),
        }
    }

    /// すべてのフィールドが空でないことを検査する
    ///
    /// 宣言順に走査し、最初に見つかった空フィールドでエラーを返す。
    pub fn ensure_complete(&self) -> Result<(), DomainError> {
        match TemplateField::iter().find(|field| self.value(*field).is_empty()) {
            Some(field) => Err(DomainError::IncompleteTemplate { field }),
            None => Ok(()),
        }
    }

    /// メッセージレンダラー・SMS 送信に渡すパラメータへ変換する
    pub fn to_params(&self) -> MessageParams {
        TemplateField::iter()
            .map(|field| {
                let key: &'static str = field.into();
                (key.to_string(), self.value(field).render())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn make_context() -> TemplateContext {
        TemplateContext {
            complaint_id:       100,
            complaint_number:   "RC-100".to_string(),
            creator_id:         ContractorId::new(20),
            creator_name:       "佐藤 花子".to_string(),
            expert_id:          ContractorId::new(30),
            expert_name:        "鈴木 一郎".to_string(),
            client_id:          ContractorId::new(10),
            client_name:        "山田 太郎".to_string(),
            consumption_id:     200,
            consumption_number: "CN-200".to_string(),
            agreement_number:   "AG-1".to_string(),
            date:               "2024-05-01".to_string(),
            differences:        "新しいポジションが追加されました".to_string(),
        }
    }

    #[test]
    fn test_全フィールドが埋まっていればensure_completeは成功する() {
        assert_eq!(make_context().ensure_complete(), Ok(()));
    }

    #[rstest]
    #[case(TemplateValue::Int(0), true)]
    #[case(TemplateValue::Int(-1), false)]
    #[case(TemplateValue::Text(""), true)]
    #[case(TemplateValue::Text("0"), true)]
    #[case(TemplateValue::Text(" "), false)]
    #[case(TemplateValue::Text("RC-1"), false)]
    fn test_is_emptyのゼロ値判定(#[case] value: TemplateValue<'static>, #[case] expected: bool) {
        assert_eq!(value.is_empty(), expected);
    }

    #[test]
    fn test_ensure_completeは最初の空フィールドを報告する() {
        let mut context = make_context();
        context.expert_name = String::new();
        context.date = String::new();

        assert_eq!(
            context.ensure_complete(),
            Err(DomainError::IncompleteTemplate {
                field: TemplateField::ExpertName,
            })
        );
    }

    #[test]
    fn test_ensure_completeは差分文言が空なら失敗する() {
        let mut context = make_context();
        context.differences = String::new();

        assert_eq!(
            context.ensure_complete(),
            Err(DomainError::IncompleteTemplate {
                field: TemplateField::Differences,
            })
        );
    }

    #[test]
    fn test_to_paramsは13個のキーを大文字スネークケースで返す() {
        let params = make_context().to_params();

        assert_eq!(params.len(), 13);
        assert_eq!(params["COMPLAINT_ID"], "100");
        assert_eq!(params["CLIENT_NAME"], "山田 太郎");
        assert_eq!(params["DIFFERENCES"], "新しいポジションが追加されました");
    }
}
