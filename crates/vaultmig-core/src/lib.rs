//! vaultmig-core
//!
//! Versioned state migration for the wallet's persisted store.
//!
//! 永続化された state（`{ meta: { version }, data }`）を、起動のたびに
//! 順序付きのマイグレーション列で最新スキーマまで引き上げる。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（SchemaVersion, VersionedState, MigrationError）
//! - **ports**: 抽象化レイヤー（Migration, StateStore）
//! - **app**: アプリケーションロジック（Migrator, MigratorBuilder, MigratorConfig, Bootstrap）
//! - **typed**: 型付きマイグレーション API（Schema trait, Upgrade trait, PayloadCodec）
//! - **impls**: 実装（FnMigration, InMemoryStateStore, JsonFileStateStore）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod typed;

pub use app::{Bootstrap, BootstrapError, BootstrapReport, Migrator, MigratorBuilder, MigratorConfig};
pub use domain::{BoxError, MigrationError, SchemaVersion, StateMeta, VersionedState};
pub use ports::{Migration, StateStore, StoreError};
