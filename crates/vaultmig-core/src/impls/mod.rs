//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **FnMigration**: クロージャで書く Migration
//! - **InMemoryStateStore**: テスト・開発用の StateStore
//! - **JsonFileStateStore**: JSON ファイルに保存する StateStore

pub mod fn_migration;
pub mod json_file_store;
pub mod memory_store;

pub use self::fn_migration::FnMigration;
pub use self::json_file_store::JsonFileStateStore;
pub use self::memory_store::InMemoryStateStore;
