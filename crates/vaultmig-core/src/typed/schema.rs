//! Schema trait - data の型とスキーマバージョンの対応付け
//!
//! # 学習ポイント
//! - Associated Constants (`const VERSION`)
//! - Trait bounds の組み合わせ (Serialize + DeserializeOwned + Send + Sync + 'static)

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::SchemaVersion;

/// Schema は `data` の Rust 型とスキーマバージョンを対応付ける
///
/// # 使用例
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct WalletV2 {
///     config: ConfigV2,
/// }
///
/// impl Schema for WalletV2 {
///     const VERSION: SchemaVersion = SchemaVersion::new(2);
/// }
/// ```
///
/// # Trait Bounds
/// - `Serialize`: envelope の `data` に書き戻すため
/// - `DeserializeOwned`: envelope の `data` から復元するため
/// - `Send + Sync + 'static`: async な step の中で持ち回るため
pub trait Schema: Serialize + DeserializeOwned + Send + Sync + 'static {
    const VERSION: SchemaVersion;
}
