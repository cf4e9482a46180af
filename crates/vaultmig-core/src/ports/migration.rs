//! Migration port - 1 ステップ分のスキーマ変換
//!
//! # 契約
//! - `version()` はこの step が生成するスキーマバージョン
//! - `migrate()` は envelope を所有権ごと受け取り、新しい envelope を返す
//! - 返した envelope の `meta.version` は `version()` と一致しなければならない
//!
//! 所有権を受け取るので、step が渡された state を保持し続けたり
//! 外から書き換えたりすることは型で防がれる。

use async_trait::async_trait;

use crate::domain::{BoxError, SchemaVersion, VersionedState};

/// A versioned transformation from one envelope to the next.
///
/// # 使用例
/// ```ignore
/// struct AddTransactions;
///
/// #[async_trait]
/// impl Migration for AddTransactions {
///     fn version(&self) -> SchemaVersion {
///         SchemaVersion::new(3)
///     }
///
///     async fn migrate(&self, state: VersionedState) -> Result<VersionedState, BoxError> {
///         let mut data = state.data.unwrap_or_default();
///         data["transactions"] = serde_json::json!([]);
///         Ok(VersionedState::new(self.version(), Some(data)))
///     }
/// }
/// ```
#[async_trait]
pub trait Migration: Send + Sync {
    fn version(&self) -> SchemaVersion;

    async fn migrate(&self, state: VersionedState) -> Result<VersionedState, BoxError>;

    /// Short label used in log lines.
    fn describe(&self) -> &str {
        "migration"
    }
}
