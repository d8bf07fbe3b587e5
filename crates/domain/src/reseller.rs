//! # 販売者
//!
//! 返品イベントが属するテナント。コアが検査するのは存在のみ。

define_int_id! {
    /// 販売者 ID
    pub struct ResellerId;
}

/// 販売者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reseller {
    id: ResellerId,
}

impl Reseller {
    pub fn new(id: ResellerId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> ResellerId {
        self.id
    }
}
