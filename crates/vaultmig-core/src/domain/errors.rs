//! Errors - マイグレーションのエラー型と分類
//!
//! どのエラーもこの層ではリトライしない。起動を止めるか、クリーンな state から
//! やり直すかは呼び出し側が決める。

use super::version::SchemaVersion;

/// Error type returned by migration step bodies.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// ErrorKind は失敗の分類
///
/// - Validation: step は完了したが、結果が受け入れられない
/// - Step: step 自身が失敗した（エラーはそのまま伝播）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Step,
}

/// MigrationError は `Migrator::migrate_data` の失敗
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("migration to {version} returned empty data")]
    EmptyData { version: SchemaVersion },

    #[error(
        "migration did not update version number correctly: expected {expected}, got {actual}"
    )]
    VersionMismatch {
        expected: SchemaVersion,
        actual: SchemaVersion,
    },

    #[error(transparent)]
    Step(BoxError),
}

impl MigrationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MigrationError::EmptyData { .. } | MigrationError::VersionMismatch { .. } => {
                ErrorKind::Validation
            }
            MigrationError::Step(_) => ErrorKind::Step,
        }
    }

    /// The step's own error, if that is what failed.
    pub fn step_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            MigrationError::Step(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("disk on fire")]
    struct DiskError;

    #[test]
    fn step_error_is_transparent() {
        let err = MigrationError::Step(Box::new(DiskError));
        assert_eq!(err.to_string(), "disk on fire");
        assert_eq!(err.kind(), ErrorKind::Step);
        assert!(err.step_error().unwrap().downcast_ref::<DiskError>().is_some());
    }

    #[test]
    fn validation_errors_name_the_versions() {
        let err = MigrationError::VersionMismatch {
            expected: SchemaVersion::new(2),
            actual: SchemaVersion::new(3),
        };
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("expected v2, got v3"));

        let err = MigrationError::EmptyData {
            version: SchemaVersion::new(5),
        };
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.step_error().is_none());
        assert_eq!(err.to_string(), "migration to v5 returned empty data");
    }
}
