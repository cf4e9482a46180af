//! Upgrade trait - 型付きのマイグレーション step
//!
//! # 学習ポイント
//! - ジェネリック trait (`Upgrade<Prev, Next>`)
//! - Type erasure パターン (`TypedMigration<Prev, Next, U>` → `dyn Migration`)
//!
//! `Upgrade` は `Prev` を受け取って `Next` を返すだけ。JSON との変換と
//! version の刻印は `TypedMigration` が受け持つので、step の作者は
//! `meta.version` を書き忘れることがない。

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use super::codec::PayloadCodec;
use super::schema::Schema;
use crate::domain::{BoxError, SchemaVersion, VersionedState};
use crate::ports::Migration;

/// Upgrade は `Prev` スキーマの data を `Next` スキーマに変換する
///
/// # 使用例
/// ```ignore
/// struct ProviderObject;
///
/// #[async_trait]
/// impl Upgrade<WalletV1, WalletV2> for ProviderObject {
///     async fn upgrade(&self, prev: WalletV1) -> Result<WalletV2, BoxError> {
///         Ok(WalletV2 { provider: Provider { kind: prev.provider } })
///     }
/// }
/// ```
#[async_trait]
pub trait Upgrade<Prev: Schema, Next: Schema>: Send + Sync {
    async fn upgrade(&self, prev: Prev) -> Result<Next, BoxError>;
}

/// Erases an [`Upgrade`] into a [`Migration`] producing `Next::VERSION`.
pub struct TypedMigration<Prev, Next, U> {
    upgrade: U,
    label: String,
    _marker: PhantomData<fn(Prev) -> Next>,
}

impl<Prev: Schema, Next: Schema, U: Upgrade<Prev, Next>> TypedMigration<Prev, Next, U> {
    pub fn new(upgrade: U) -> Self {
        Self {
            upgrade,
            label: format!("{} -> {}", Prev::VERSION, Next::VERSION),
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<Prev: Schema, Next: Schema, U: Upgrade<Prev, Next>> Migration
    for TypedMigration<Prev, Next, U>
{
    fn version(&self) -> SchemaVersion {
        Next::VERSION
    }

    async fn migrate(&self, state: VersionedState) -> Result<VersionedState, BoxError> {
        let prev: Prev = PayloadCodec::decode(state.data)?;
        let next = self.upgrade.upgrade(prev).await?;
        Ok(PayloadCodec::encode(&next)?)
    }

    fn describe(&self) -> &str {
        &self.label
    }
}

/// `Arc<dyn Migration>` for a typed upgrade.
///
/// ```ignore
/// let step = typed::boxed::<WalletV1, WalletV2, _>(ProviderObject);
/// ```
pub fn boxed<Prev, Next, U>(upgrade: U) -> Arc<dyn Migration>
where
    Prev: Schema,
    Next: Schema,
    U: Upgrade<Prev, Next> + 'static,
{
    Arc::new(TypedMigration::<Prev, Next, U>::new(upgrade))
}
