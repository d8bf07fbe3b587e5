/// 整数ベースの ID 型を定義する宣言型マクロ
///
/// 以下のボイラープレートを一括生成する:
/// - Newtype 構造体（`i64` をラップ）
/// - `derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)`
/// - `new()`: 既存の整数から作成
/// - `as_i64()`: 内部の整数値を取得
///
/// 参照データの ID は外部ストアが採番するため、生成メソッドは持たない。
///
/// # 使用例
///
/// ```rust
/// use returnflow_domain::reseller::ResellerId;
///
/// let id = ResellerId::new(42);
/// assert_eq!(id.as_i64(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
macro_rules! define_int_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[display("{_0}")]
        #[serde(transparent)]
        $vis struct $Name(i64);

        impl $Name {
            /// 既存の整数値から ID を作成する
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// 内部の整数値を取得する
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $Name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}
