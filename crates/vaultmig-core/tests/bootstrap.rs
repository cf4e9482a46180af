use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tempfile::TempDir;
use vaultmig_core::impls::{FnMigration, JsonFileStateStore};
use vaultmig_core::typed::{self, Schema, Upgrade};
use vaultmig_core::{
    Bootstrap, BootstrapError, BoxError, Migration, MigrationError, Migrator, SchemaVersion,
    StateStore, VersionedState,
};

#[derive(Debug, Serialize, Deserialize)]
struct PrefsV1 {
    theme: String,
}

impl Schema for PrefsV1 {
    const VERSION: SchemaVersion = SchemaVersion::new(1);
}

#[derive(Debug, Serialize, Deserialize)]
struct PrefsV2 {
    theme: String,
    locale: String,
}

impl Schema for PrefsV2 {
    const VERSION: SchemaVersion = SchemaVersion::new(2);
}

struct AddLocale;

#[async_trait]
impl Upgrade<PrefsV1, PrefsV2> for AddLocale {
    async fn upgrade(&self, prev: PrefsV1) -> Result<PrefsV2, BoxError> {
        Ok(PrefsV2 {
            theme: prev.theme,
            locale: "en".to_string(),
        })
    }
}

fn seed_theme() -> Arc<dyn Migration> {
    let version = SchemaVersion::new(1);
    FnMigration::new(version, move |state: VersionedState| async move {
        let theme = state
            .data
            .as_ref()
            .and_then(|d| d.get("theme"))
            .cloned()
            .unwrap_or_else(|| json!("light"));
        Ok::<_, BoxError>(VersionedState::new(version, Some(json!({ "theme": theme }))))
    })
    .into_arc()
}

fn migrator() -> Migrator {
    Migrator::builder()
        .migration_arc(typed::boxed::<PrefsV1, PrefsV2, _>(AddLocale))
        .migration_arc(seed_theme())
        .build()
}

#[tokio::test]
async fn legacy_file_is_migrated_and_rewritten() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, r#"{"meta":{"version":0},"data":{"theme":"dark"}}"#).unwrap();

    let store = Arc::new(JsonFileStateStore::new(&path));
    let bootstrap = Bootstrap::new(migrator(), store.clone());

    let report = bootstrap.run(None).await.unwrap();

    assert_eq!(report.from, Some(SchemaVersion::ZERO));
    assert_eq!(report.applied, vec![SchemaVersion::new(1), SchemaVersion::new(2)]);
    assert!(report.saved);

    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        on_disk,
        json!({ "meta": { "version": 2 }, "data": { "theme": "dark", "locale": "en" } })
    );

    // 2 回目は不動点なので書き込まない
    let again = bootstrap.run(None).await.unwrap();
    assert!(again.applied.is_empty());
    assert!(!again.saved);
    assert_eq!(again.state, report.state);
}

#[tokio::test]
async fn missing_file_starts_from_initial_payload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fresh.json");
    let store = Arc::new(JsonFileStateStore::new(&path));
    let bootstrap = Bootstrap::new(migrator(), store.clone());

    let report = bootstrap
        .run(Some(json!({ "theme": "light", "locale": "fr" })))
        .await
        .unwrap();

    assert_eq!(report.from, None);
    assert_eq!(report.to, SchemaVersion::new(2));
    assert_eq!(
        store.load().await.unwrap(),
        Some(VersionedState::new(
            SchemaVersion::new(2),
            Some(json!({ "theme": "light", "locale": "fr" }))
        ))
    );
}

#[tokio::test]
async fn failing_chain_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    let original = r#"{"meta":{"version":0},"data":{"theme":"dark"}}"#;
    std::fs::write(&path, original).unwrap();

    let wrong_stamp = FnMigration::new(SchemaVersion::new(3), |state: VersionedState| async move {
        Ok::<_, BoxError>(state.with_version(SchemaVersion::new(4)))
    });
    let migrator = Migrator::builder()
        .migration_arc(seed_theme())
        .migration(wrong_stamp)
        .build();
    let bootstrap = Bootstrap::new(migrator, Arc::new(JsonFileStateStore::new(&path)));

    let err = bootstrap.run(None).await.unwrap_err();

    assert!(matches!(
        err,
        BootstrapError::Migration(MigrationError::VersionMismatch { .. })
    ));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
}
