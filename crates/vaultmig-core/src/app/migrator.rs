//! Migrator - 永続化 state を最新スキーマまで順番に移行する
//!
//! # フロー（`migrate_data` 1 回分）
//! 1. `meta.version` より大きい version を持つ step を pending とする
//! 2. pending が空ならそのまま返す（不動点）
//! 3. pending を昇順に 1 つずつ実行し、検証済みの結果を次の step に渡す
//! 4. どこかで失敗したら即座に中断し、エラーを返す（部分的な結果は返さない）
//!
//! step 同士を並行に走らせることはない。後の step は前の step が作った
//! スキーマを前提にしているため。

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::builder::MigratorBuilder;
use super::config::MigratorConfig;
use crate::domain::{MigrationError, SchemaVersion, VersionedState};
use crate::ports::Migration;

/// Applies an ordered chain of [`Migration`] steps to a [`VersionedState`].
///
/// Holds no mutable state: the step list is fixed at construction, so one
/// `Migrator` can serve concurrent calls on independent envelopes.
#[derive(Clone)]
pub struct Migrator {
    /// Sorted ascending by version (stable).
    migrations: Vec<Arc<dyn Migration>>,
    default_version: SchemaVersion,
}

impl Migrator {
    /// Default version is the highest step version, or `v0` with no steps.
    pub fn new(migrations: Vec<Arc<dyn Migration>>) -> Self {
        Self::with_default_version(migrations, None)
    }

    pub fn with_default_version(
        mut migrations: Vec<Arc<dyn Migration>>,
        default_version: Option<SchemaVersion>,
    ) -> Self {
        // sort_by_key は安定ソート。同じ version は入力順のまま。
        migrations.sort_by_key(|m| m.version());

        let default_version = default_version
            .or_else(|| migrations.last().map(|m| m.version()))
            .unwrap_or(SchemaVersion::ZERO);

        Self {
            migrations,
            default_version,
        }
    }

    pub fn from_config(config: &MigratorConfig, migrations: Vec<Arc<dyn Migration>>) -> Self {
        Self::with_default_version(migrations, config.default_version)
    }

    pub fn builder() -> MigratorBuilder {
        MigratorBuilder::new()
    }

    pub fn default_version(&self) -> SchemaVersion {
        self.default_version
    }

    /// Highest version any step produces.
    pub fn latest_version(&self) -> Option<SchemaVersion> {
        self.migrations.last().map(|m| m.version())
    }

    pub fn migrations(&self) -> &[Arc<dyn Migration>] {
        &self.migrations
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    /// Versions `migrate` would apply to `state`, in application order.
    pub fn pending_versions(&self, state: &VersionedState) -> Vec<SchemaVersion> {
        self.pending(state.version()).map(|m| m.version()).collect()
    }

    /// Fresh envelope stamped with the default version.
    pub fn generate_initial_state(&self, initial: Option<serde_json::Value>) -> VersionedState {
        VersionedState::new(self.default_version, initial)
    }

    /// Migrate `state`, or a fresh initial state when `None`.
    pub async fn migrate_data(
        &self,
        state: Option<VersionedState>,
    ) -> Result<VersionedState, MigrationError> {
        let state = state.unwrap_or_else(|| self.generate_initial_state(None));
        self.migrate(state).await
    }

    /// Run every pending step on `state`, one at a time.
    #[tracing::instrument(name = "migrate_data", skip_all, fields(from = %state.version()))]
    pub async fn migrate(&self, state: VersionedState) -> Result<VersionedState, MigrationError> {
        let mut pending = self.pending(state.version()).peekable();

        if pending.peek().is_none() {
            debug!(version = %state.version(), "no pending migrations");
            return Ok(state);
        }

        let mut state = state;
        let mut applied = 0usize;
        for migration in pending {
            state = run_migration(migration.as_ref(), state).await?;
            applied += 1;
        }

        info!(to = %state.version(), applied, "state migrated");
        Ok(state)
    }

    // 構築時にソート済みなので filter だけ（再ソートしない）
    fn pending(&self, current: SchemaVersion) -> impl Iterator<Item = &Arc<dyn Migration>> {
        self.migrations.iter().filter(move |m| m.version() > current)
    }
}

impl fmt::Debug for Migrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let versions: Vec<SchemaVersion> = self.migrations.iter().map(|m| m.version()).collect();
        f.debug_struct("Migrator")
            .field("migrations", &versions)
            .field("default_version", &self.default_version)
            .finish()
    }
}

/// Apply one step and validate what it returned.
async fn run_migration(
    migration: &dyn Migration,
    state: VersionedState,
) -> Result<VersionedState, MigrationError> {
    let expected = migration.version();
    let from = state.version();

    let migrated = match migration.migrate(state).await {
        Ok(migrated) => migrated,
        Err(err) => {
            warn!(%from, to = %expected, step = migration.describe(), error = %err, "migration failed");
            return Err(MigrationError::Step(err));
        }
    };

    if !migrated.has_data() {
        warn!(%from, to = %expected, step = migration.describe(), "migration returned empty data");
        return Err(MigrationError::EmptyData { version: expected });
    }

    if migrated.version() != expected {
        warn!(
            %from,
            expected = %expected,
            actual = %migrated.version(),
            step = migration.describe(),
            "migration did not update version number correctly"
        );
        return Err(MigrationError::VersionMismatch {
            expected,
            actual: migrated.version(),
        });
    }

    info!(%from, to = %expected, step = migration.describe(), "applied migration");
    Ok(migrated)
}
