//! App - アプリケーション層
//!
//! ports を組み合わせて移行処理を組み立てます。
//!
//! # 主要コンポーネント
//! - **Migrator**: ステップ列を昇順に適用するエンジン
//! - **MigratorBuilder**: Migrator の組み立て
//! - **MigratorConfig**: 外部設定（JSON）
//! - **Bootstrap**: 起動時の load → migrate → persist

pub mod bootstrap;
pub mod builder;
pub mod config;
pub mod migrator;

pub use self::bootstrap::{Bootstrap, BootstrapError, BootstrapReport};
pub use self::builder::MigratorBuilder;
pub use self::config::{ConfigError, MigratorConfig};
pub use self::migrator::Migrator;
