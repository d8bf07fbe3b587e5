//! # 返品ステータス
//!
//! ステータスコードと表示名の固定対応表（Status Namer）。
//!
//! | コード | 表示名 |
//! |-------|--------|
//! | 0 | Completed |
//! | 1 | Pending |
//! | 2 | Rejected |
//!
//! 表にないコードは [`DomainError::InvalidStatusCode`] になる。呼び出し元は
//! 同じ列挙から得たコードのみを渡すこと。

use strum::IntoStaticStr;

use crate::DomainError;

/// 返品ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, strum::Display)]
pub enum ReturnStatus {
    Completed,
    Pending,
    Rejected,
}

impl ReturnStatus {
    /// 表示名を返す
    pub fn name(self) -> &'static str {
        self.into()
    }
}

impl TryFrom<i64> for ReturnStatus {
    type Error = DomainError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Completed),
            1 => Ok(Self::Pending),
            2 => Ok(Self::Rejected),
            other => Err(DomainError::InvalidStatusCode(other)),
        }
    }
}

/// ステータスコードから表示名を引く
pub fn status_name(code: i64) -> Result<&'static str, DomainError> {
    ReturnStatus::try_from(code).map(ReturnStatus::name)
}
