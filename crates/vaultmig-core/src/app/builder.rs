//! MigratorBuilder - Migrator の組み立て
//!
//! # 使用例
//! ```ignore
//! let migrator = Migrator::builder()
//!     .migration(WrapConfig)
//!     .migration(ProviderObject)
//!     .default_version(SchemaVersion::new(2))
//!     .build();
//! ```
//!
//! 登録順は自由。`build()` で version の昇順に並べ替える。

use std::sync::Arc;

use super::config::MigratorConfig;
use super::migrator::Migrator;
use crate::domain::SchemaVersion;
use crate::ports::Migration;

#[derive(Default)]
pub struct MigratorBuilder {
    migrations: Vec<Arc<dyn Migration>>,
    default_version: Option<SchemaVersion>,
}

impl MigratorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn migration<M: Migration + 'static>(mut self, migration: M) -> Self {
        self.migrations.push(Arc::new(migration));
        self
    }

    pub fn migration_arc(mut self, migration: Arc<dyn Migration>) -> Self {
        self.migrations.push(migration);
        self
    }

    pub fn migrations<I>(mut self, migrations: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Migration>>,
    {
        self.migrations.extend(migrations);
        self
    }

    /// Overrides the version stamped on fresh state.
    pub fn default_version(mut self, version: SchemaVersion) -> Self {
        self.default_version = Some(version);
        self
    }

    /// Only touches `default_version` when the config sets one.
    pub fn config(mut self, config: &MigratorConfig) -> Self {
        if let Some(version) = config.default_version {
            self.default_version = Some(version);
        }
        self
    }

    pub fn build(self) -> Migrator {
        Migrator::with_default_version(self.migrations, self.default_version)
    }
}
