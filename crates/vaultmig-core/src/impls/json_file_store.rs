//! JsonFileStateStore - envelope を JSON ファイル 1 つに保存する
//!
//! # 書き込み
//! `<path>.tmp` に書いて sync してから rename で置き換える。
//! 途中で落ちても元のファイルか新しいファイルのどちらかが残る。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::domain::VersionedState;
use crate::ports::{StateStore, StoreError};

#[derive(Debug, Clone)]
pub struct JsonFileStateStore {
    path: PathBuf,
}

impl JsonFileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl StateStore for JsonFileStateStore {
    async fn load(&self) -> Result<Option<VersionedState>, StoreError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "state file not found");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };
        let state = serde_json::from_slice(&raw)?;
        Ok(Some(state))
    }

    async fn save(&self, state: &VersionedState) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(state)?;
        let temp_path = self.temp_path();

        if let Err(err) = replace_via(&temp_path, &self.path, &bytes).await {
            // 失敗したら .tmp を残さない
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(err.into());
        }
        debug!(path = %self.path.display(), version = %state.version(), "state saved");
        Ok(())
    }
}

async fn replace_via(temp_path: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(temp_path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    drop(file);

    tokio::fs::rename(temp_path, path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SchemaVersion;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_loads_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStateStore::new(dir.path().join("state.json"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStateStore::new(dir.path().join("state.json"));
        let state = VersionedState::new(SchemaVersion::new(3), Some(json!({ "config": {} })));

        store.save(&state).await.unwrap();

        assert_eq!(store.load().await.unwrap(), Some(state));
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn reads_hand_written_envelope() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"meta":{"version":1},"data":{"a":1}}"#).unwrap();

        let loaded = JsonFileStateStore::new(&path).load().await.unwrap().unwrap();
        assert_eq!(loaded.version(), SchemaVersion::new(1));
        assert_eq!(loaded.data(), Some(&json!({ "a": 1 })));
    }

    #[tokio::test]
    async fn failed_save_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        // 中身のあるディレクトリには rename で上書きできない
        let target = dir.path().join("state.json");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), b"x").unwrap();
        let store = JsonFileStateStore::new(&target);

        let err = store
            .save(&VersionedState::new(SchemaVersion::new(1), Some(json!({}))))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Io(_)));
        assert!(!store.temp_path().exists());
        assert!(target.join("keep").exists());
    }

    #[tokio::test]
    async fn malformed_file_is_a_codec_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"data":{}}"#).unwrap();

        let err = JsonFileStateStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, StoreError::Codec(_)));
    }
}
