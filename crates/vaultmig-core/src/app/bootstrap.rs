//! Bootstrap - 起動時の load → migrate → persist
//!
//! # フロー
//! 1. StateStore から envelope を読む（無ければ初期 state を作る）
//! 2. Migrator で最新スキーマまで移行
//! 3. version が変わった／新規作成だった場合のみ保存
//!
//! 移行に失敗した場合は何も保存しない。失敗途中の state は
//! 保存してはいけない状態として扱う。

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use super::migrator::Migrator;
use crate::domain::{MigrationError, SchemaVersion, VersionedState};
use crate::ports::{StateStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Migration(#[from] MigrationError),
}

/// What a bootstrap run did.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapReport {
    /// Version found in the store; `None` when state was freshly created.
    pub from: Option<SchemaVersion>,
    pub to: SchemaVersion,
    /// Step versions applied, in order.
    pub applied: Vec<SchemaVersion>,
    pub saved: bool,
    pub state: VersionedState,
}

/// Single writer for one store.
///
/// Runs are serialized by an internal lock, so two `run` calls on the same
/// `Bootstrap` never interleave their load and save.
pub struct Bootstrap {
    migrator: Migrator,
    store: Arc<dyn StateStore>,
    lock: Mutex<()>,
}

impl Bootstrap {
    pub fn new(migrator: Migrator, store: Arc<dyn StateStore>) -> Self {
        Self {
            migrator,
            store,
            lock: Mutex::new(()),
        }
    }

    pub fn migrator(&self) -> &Migrator {
        &self.migrator
    }

    /// Load, migrate and persist.
    ///
    /// `initial` is only used when the store is empty.
    pub async fn run(
        &self,
        initial: Option<serde_json::Value>,
    ) -> Result<BootstrapReport, BootstrapError> {
        let _guard = self.lock.lock().await;

        let mut report = self.load_and_migrate(initial).await?;
        if report.from.is_none() || !report.applied.is_empty() {
            self.store.save(&report.state).await?;
            report.saved = true;
        }

        info!(
            from = ?report.from,
            to = %report.to,
            applied = report.applied.len(),
            saved = report.saved,
            "bootstrap complete"
        );
        Ok(report)
    }

    /// Like [`Bootstrap::run`] but never writes to the store.
    pub async fn run_dry(
        &self,
        initial: Option<serde_json::Value>,
    ) -> Result<BootstrapReport, BootstrapError> {
        let _guard = self.lock.lock().await;
        self.load_and_migrate(initial).await
    }

    async fn load_and_migrate(
        &self,
        initial: Option<serde_json::Value>,
    ) -> Result<BootstrapReport, BootstrapError> {
        let (state, from) = match self.store.load().await? {
            Some(state) => {
                let version = state.version();
                (state, Some(version))
            }
            None => {
                info!(version = %self.migrator.default_version(), "no persisted state, starting fresh");
                (self.migrator.generate_initial_state(initial), None)
            }
        };

        let applied = self.migrator.pending_versions(&state);
        let state = self.migrator.migrate_data(Some(state)).await?;

        Ok(BootstrapReport {
            from,
            to: state.version(),
            applied,
            saved: false,
            state,
        })
    }
}
