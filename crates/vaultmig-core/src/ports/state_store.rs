//! StateStore port - 永続化された envelope の読み書き
//!
//! Migrator 自体は永続化を知らない。起動シーケンス（`app::bootstrap`）が
//! このポート越しに envelope を読み込み、移行結果を書き戻す。
//!
//! # 実装
//! - `impls::memory_store::InMemoryStateStore`（テスト・開発用）
//! - `impls::json_file_store::JsonFileStateStore`（JSON ファイル）

use async_trait::async_trait;

use crate::domain::VersionedState;

/// StoreError は永続化層のエラー
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("state store io: {0}")]
    Io(#[from] std::io::Error),

    #[error("state store codec: {0}")]
    Codec(#[from] serde_json::Error),

    /// For adapters whose backend errors are neither io nor JSON.
    #[error("{0}")]
    Other(String),
}

/// Loads and saves the whole versioned state blob.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// `Ok(None)` when nothing has been persisted yet.
    async fn load(&self) -> Result<Option<VersionedState>, StoreError>;

    async fn save(&self, state: &VersionedState) -> Result<(), StoreError>;
}
