//! FnMigration - クロージャで書く Migration
//!
//! 小さな変換を trait 実装なしで書けるようにするためのアダプタ。
//!
//! ```ignore
//! let step = FnMigration::new(SchemaVersion::new(2), |state: VersionedState| async move {
//!     Ok::<_, BoxError>(state.with_version(SchemaVersion::new(2)))
//! });
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{BoxError, SchemaVersion, VersionedState};
use crate::ports::Migration;

pub struct FnMigration<F> {
    version: SchemaVersion,
    label: String,
    f: F,
}

impl<F, Fut> FnMigration<F>
where
    F: Fn(VersionedState) -> Fut + Send + Sync,
    Fut: Future<Output = Result<VersionedState, BoxError>> + Send,
{
    pub fn new(version: impl Into<SchemaVersion>, f: F) -> Self {
        let version = version.into();
        Self {
            version,
            label: format!("fn-migration-{version}"),
            f,
        }
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn into_arc(self) -> Arc<dyn Migration>
    where
        F: 'static,
    {
        Arc::new(self)
    }
}

#[async_trait]
impl<F, Fut> Migration for FnMigration<F>
where
    F: Fn(VersionedState) -> Fut + Send + Sync,
    Fut: Future<Output = Result<VersionedState, BoxError>> + Send,
{
    fn version(&self) -> SchemaVersion {
        self.version
    }

    async fn migrate(&self, state: VersionedState) -> Result<VersionedState, BoxError> {
        (self.f)(state).await
    }

    fn describe(&self) -> &str {
        &self.label
    }
}
