//! Typed - 型付きマイグレーション API
//!
//! data を `serde_json::Value` のまま触る代わりに、スキーマごとの Rust 型を
//! 定義して `Upgrade<Prev, Next>` を書く。
//!
//! # 二層構造
//! - **表層（Typed）**: `Schema` trait, `Upgrade<Prev, Next>` trait - 型安全
//! - **内部（Dyn）**: `Migration` trait - object-safe, Migrator が保持する

pub mod codec;
pub mod schema;
pub mod upgrade;

pub use self::codec::{CodecError, PayloadCodec};
pub use self::schema::Schema;
pub use self::upgrade::{TypedMigration, Upgrade, boxed};
