//! VersionedState - 永続化される state の封筒（envelope）
//!
//! 永続化形式は常に次の 2 フィールドだけ:
//!
//! ```json
//! { "meta": { "version": 3 }, "data": { ... } }
//! ```
//!
//! `data` の中身は利用側（wallet の各コントローラ）が決めるもので、
//! ここでは `serde_json::Value` のまま扱う。

use serde::{Deserialize, Serialize};

use super::version::SchemaVersion;

/// `meta` 部分。いまは version だけ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateMeta {
    pub version: SchemaVersion,
}

/// A schema-versioned, opaque state payload.
///
/// `data: None` means the payload is absent. It is omitted when serialized,
/// and both a missing `data` key and `"data": null` read back as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedState {
    pub meta: StateMeta,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl VersionedState {
    pub fn new(version: SchemaVersion, data: Option<serde_json::Value>) -> Self {
        Self {
            meta: StateMeta { version },
            data,
        }
    }

    pub fn version(&self) -> SchemaVersion {
        self.meta.version
    }

    pub fn data(&self) -> Option<&serde_json::Value> {
        self.data.as_ref()
    }

    /// Same payload, new version stamp.
    pub fn with_version(mut self, version: SchemaVersion) -> Self {
        self.meta.version = version;
        self
    }

    /// Whether the payload counts as present.
    ///
    /// Persisted state is plain JSON, so "present" uses JSON truthiness:
    /// `null`, `false`, `0` and `""` are empty. `{}` and `[]` are not.
    pub fn has_data(&self) -> bool {
        match &self.data {
            None => false,
            Some(value) => is_truthy(value),
        }
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
