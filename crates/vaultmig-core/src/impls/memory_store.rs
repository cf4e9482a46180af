//! InMemoryStateStore - テスト・開発用の StateStore

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::VersionedState;
use crate::ports::{StateStore, StoreError};

#[derive(Default)]
pub struct InMemoryStateStore {
    state: Mutex<Option<VersionedState>>,
    saves: AtomicUsize,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: VersionedState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
            saves: AtomicUsize::new(0),
        }
    }

    pub async fn snapshot(&self) -> Option<VersionedState> {
        self.state.lock().await.clone()
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn load(&self) -> Result<Option<VersionedState>, StoreError> {
        Ok(self.state.lock().await.clone())
    }

    async fn save(&self, state: &VersionedState) -> Result<(), StoreError> {
        *self.state.lock().await = Some(state.clone());
        self.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
