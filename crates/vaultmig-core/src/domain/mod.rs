//! Domain model (schema version, state envelope, errors).

pub mod envelope;
pub mod errors;
pub mod version;

pub use self::envelope::{StateMeta, VersionedState};
pub use self::errors::{BoxError, ErrorKind, MigrationError};
pub use self::version::SchemaVersion;
