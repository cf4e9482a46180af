//! PayloadCodec - envelope の `data` と Schema 型の相互変換

use serde_json::Value;

use super::schema::Schema;
use crate::domain::{SchemaVersion, VersionedState};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("failed to decode data as schema {version}: {source}")]
    Decode {
        version: SchemaVersion,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode schema {version}: {source}")]
    Encode {
        version: SchemaVersion,
        #[source]
        source: serde_json::Error,
    },
}

pub struct PayloadCodec;

impl PayloadCodec {
    /// Absent data decodes as JSON `null`.
    pub fn decode<S: Schema>(data: Option<Value>) -> Result<S, CodecError> {
        serde_json::from_value(data.unwrap_or(Value::Null)).map_err(|source| CodecError::Decode {
            version: S::VERSION,
            source,
        })
    }

    /// Encode `value` as a new envelope stamped with `S::VERSION`.
    pub fn encode<S: Schema>(value: &S) -> Result<VersionedState, CodecError> {
        let data = serde_json::to_value(value).map_err(|source| CodecError::Encode {
            version: S::VERSION,
            source,
        })?;
        Ok(VersionedState::new(S::VERSION, Some(data)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        theme: String,
    }

    impl Schema for Prefs {
        const VERSION: SchemaVersion = SchemaVersion::new(4);
    }

    #[test]
    fn encode_stamps_schema_version() {
        let state = PayloadCodec::encode(&Prefs { theme: "dark".into() }).unwrap();
        assert_eq!(state.version(), SchemaVersion::new(4));
        assert_eq!(state.data(), Some(&json!({ "theme": "dark" })));
    }

    #[test]
    fn decode_reads_payload() {
        let prefs: Prefs = PayloadCodec::decode(Some(json!({ "theme": "light" }))).unwrap();
        assert_eq!(prefs.theme, "light");
    }

    #[test]
    fn decode_failure_names_the_schema() {
        let err = PayloadCodec::decode::<Prefs>(None).unwrap_err();
        assert!(matches!(err, CodecError::Decode { version, .. } if version == SchemaVersion::new(4)));
        assert!(err.to_string().contains("schema v4"));
    }
}
