//! Ports - 抽象化レイヤー
//!
//! Migrator が外部と接する境界を trait として定義します。
//! - Migration: 呼び出し側が用意する変換 step
//! - StateStore: envelope の永続化（ブラウザストレージ、ファイルなど）

pub mod migration;
pub mod state_store;

pub use self::migration::Migration;
pub use self::state_store::{StateStore, StoreError};
