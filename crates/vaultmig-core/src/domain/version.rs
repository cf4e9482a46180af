//! SchemaVersion - 永続化 state のスキーマバージョン
//!
//! 永続化形式では素の整数（`{"meta": {"version": 3}}`）として現れるため、
//! `#[serde(transparent)]` で u32 と同じ表現にしています。

use serde::{Deserialize, Serialize};
use std::fmt;

/// スキーマバージョン（単調増加）
///
/// u32 のままだと「バージョン」と「件数」などを混同しやすいので newtype にする。
#[repr(transparent)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SchemaVersion(u32);

impl SchemaVersion {
    /// Version of a state that has never been migrated.
    pub const ZERO: SchemaVersion = SchemaVersion(0);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for SchemaVersion {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<SchemaVersion> for u32 {
    fn from(version: SchemaVersion) -> Self {
        version.0
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
