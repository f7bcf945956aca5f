//! Content-fetch collaborator.
//!
//! Overlay body data (synopsis, credits, runtime) comes from outside the
//! engine. A [`ContentHandle`] owns one in-flight fetch per overlay
//! session and exposes loading/error state without ever touching the
//! state machine: the overlay keeps morphing with partial data and simply
//! renders the loading or error fields. Unmounting the overlay aborts the
//! fetch.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use vitrine_core::ModalKey;

/// Default overlay body payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalContent {
    pub headline: String,
    pub overview: String,
    pub runtime_minutes: Option<u32>,
    pub credits: Vec<String>,
}

/// Provider of overlay body data.
#[async_trait]
pub trait ContentSource<T>: Send + Sync + 'static {
    async fn fetch(&self, key: ModalKey) -> anyhow::Result<T>;
}

#[derive(Debug)]
struct FetchState<T> {
    data: Option<T>,
    is_loading: bool,
    error: Option<Arc<anyhow::Error>>,
}

/// One overlay session's fetch: data, loading flag, error, and the task
/// that fills them. Dropping the handle aborts the task.
#[derive(Debug)]
pub struct ContentHandle<T> {
    state: Arc<RwLock<FetchState<T>>>,
    task: Option<JoinHandle<()>>,
}

impl<T: Send + Sync + 'static> ContentHandle<T> {
    /// Start fetching content for `key`.
    pub fn spawn(source: Arc<dyn ContentSource<T>>, key: ModalKey) -> Self {
        let state = Arc::new(RwLock::new(FetchState {
            data: None,
            is_loading: true,
            error: None,
        }));
        let task_state = Arc::clone(&state);
        let task = tokio::spawn(async move {
            match source.fetch(key).await {
                Ok(data) => {
                    let mut s = task_state.write();
                    s.data = Some(data);
                    s.is_loading = false;
                }
                Err(err) => {
                    log::warn!("overlay content fetch failed for {key}: {err:#}");
                    let mut s = task_state.write();
                    s.error = Some(Arc::new(err));
                    s.is_loading = false;
                }
            }
        });
        Self {
            state,
            task: Some(task),
        }
    }

    /// A handle that already holds data and never fetches (tests, previews).
    pub fn ready(data: T) -> Self {
        Self {
            state: Arc::new(RwLock::new(FetchState {
                data: Some(data),
                is_loading: false,
                error: None,
            })),
            task: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading
    }

    pub fn error(&self) -> Option<Arc<anyhow::Error>> {
        self.state.read().error.clone()
    }

    pub fn data(&self) -> Option<T>
    where
        T: Clone,
    {
        self.state.read().data.clone()
    }

    /// Update already-fetched data in place (optimistic edits).
    pub fn mutate<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let mut s = self.state.write();
        if let Some(data) = s.data.as_mut() {
            f(data);
        }
    }

    /// Abort the in-flight fetch. Loading stops; existing data is kept.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.state.write().is_loading = false;
    }
}

impl<T> Drop for ContentHandle<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::MediaId;

    fn key() -> ModalKey {
        ModalKey(MediaId::new())
    }

    struct InstantSource;

    #[async_trait]
    impl ContentSource<ModalContent> for InstantSource {
        async fn fetch(&self, _key: ModalKey) -> anyhow::Result<ModalContent> {
            Ok(ModalContent {
                headline: "The Long Night".into(),
                overview: "A browse-screen engine in the dark.".into(),
                runtime_minutes: Some(112),
                credits: vec!["A. Writer".into()],
            })
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ContentSource<ModalContent> for FailingSource {
        async fn fetch(&self, _key: ModalKey) -> anyhow::Result<ModalContent> {
            anyhow::bail!("metadata service unreachable")
        }
    }

    struct StalledSource;

    #[async_trait]
    impl ContentSource<ModalContent> for StalledSource {
        async fn fetch(&self, _key: ModalKey) -> anyhow::Result<ModalContent> {
            futures_pending().await
        }
    }

    async fn futures_pending() -> anyhow::Result<ModalContent> {
        std::future::pending::<()>().await;
        unreachable!()
    }

    #[tokio::test]
    async fn test_fetch_fills_data_and_clears_loading() {
        let handle = ContentHandle::spawn(Arc::new(InstantSource), key());
        // drive the spawned task to completion
        tokio::task::yield_now().await;
        assert!(!handle.is_loading());
        assert_eq!(handle.data().unwrap().runtime_minutes, Some(112));
        assert!(handle.error().is_none());
    }

    #[tokio::test]
    async fn test_fetch_failure_surfaces_error_only() {
        let handle = ContentHandle::spawn(Arc::new(FailingSource), key());
        tokio::task::yield_now().await;
        assert!(!handle.is_loading());
        assert!(handle.data().is_none());
        assert!(handle.error().unwrap().to_string().contains("unreachable"));
    }

    #[tokio::test]
    async fn test_cancel_stops_loading() {
        let mut handle = ContentHandle::spawn(Arc::new(StalledSource), key());
        assert!(handle.is_loading());
        handle.cancel();
        assert!(!handle.is_loading());
        assert!(handle.data().is_none());
        assert!(handle.error().is_none());
    }

    #[tokio::test]
    async fn test_mutate_edits_fetched_data() {
        let handle = ContentHandle::ready(ModalContent {
            headline: "Draft".into(),
            overview: String::new(),
            runtime_minutes: None,
            credits: Vec::new(),
        });
        handle.mutate(|c| c.headline = "Final".into());
        assert_eq!(handle.data().unwrap().headline, "Final");
    }
}
