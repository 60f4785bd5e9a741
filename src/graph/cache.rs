//! Graph cache and load lifecycle.
//!
//! Two states: unloaded and loaded. The first operation that needs data
//! triggers the load-and-build synchronously; concurrent first callers are
//! serialized behind a single-flight guard so the store is read and the
//! graphs are built exactly once. A failed load leaves the cache unloaded
//! and retryable. Explicit reload rebuilds everything off to the side and
//! publishes the new snapshot atomically — readers always see either the
//! fully-old or fully-new pair.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::analytics::error::AnalyticsError;
use crate::store::RecordStore;

use super::builder::build_graphs;
use super::models::GraphSet;

/// One published snapshot: the loaded tables plus the graphs derived from
/// them. Analytics operations read both (graph queries and contract-table
/// queries), so they are published together.
#[derive(Debug)]
pub struct LoadedData {
    pub store: RecordStore,
    pub graphs: GraphSet,
}

/// Shared, lazily populated holder of the current [`LoadedData`].
pub struct GraphCache {
    data_dir: PathBuf,
    /// Single-flight guard: only one task loads at a time.
    load_guard: Mutex<()>,
    /// Currently published snapshot; `None` until the first successful load.
    current: RwLock<Option<Arc<LoadedData>>>,
}

impl GraphCache {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            load_guard: Mutex::new(()),
            current: RwLock::new(None),
        }
    }

    pub async fn is_loaded(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Return the current snapshot, loading it first if necessary.
    ///
    /// Fast path: a read lock and an `Arc` clone. Slow path: take the
    /// single-flight guard, re-check (another caller may have finished the
    /// load while we waited), then load and publish.
    pub async fn ensure_loaded(&self) -> Result<Arc<LoadedData>, AnalyticsError> {
        if let Some(data) = self.current.read().await.as_ref() {
            return Ok(Arc::clone(data));
        }

        let _guard = self.load_guard.lock().await;
        if let Some(data) = self.current.read().await.as_ref() {
            return Ok(Arc::clone(data));
        }

        let data = self.load().await?;
        *self.current.write().await = Some(Arc::clone(&data));
        Ok(data)
    }

    /// Rebuild from disk and atomically replace the published snapshot.
    /// On failure the previous snapshot (if any) stays published.
    pub async fn reload(&self) -> Result<Arc<LoadedData>, AnalyticsError> {
        let _guard = self.load_guard.lock().await;
        let data = self.load().await?;
        *self.current.write().await = Some(Arc::clone(&data));
        info!("Graph cache reloaded");
        Ok(data)
    }

    /// Load the store and build both graphs on the blocking pool (file I/O
    /// plus CPU-bound derivation).
    async fn load(&self) -> Result<Arc<LoadedData>, AnalyticsError> {
        let data_dir = self.data_dir.clone();
        let result = tokio::task::spawn_blocking(move || {
            let store = RecordStore::load(&data_dir).map_err(|e| e.to_string())?;
            let graphs = build_graphs(&store).map_err(|e| e.to_string())?;
            Ok::<_, String>(LoadedData { store, graphs })
        })
        .await
        .map_err(|e| AnalyticsError::DataUnavailable(e.to_string()))?;

        match result {
            Ok(data) => Ok(Arc::new(data)),
            Err(msg) => {
                warn!("Graph load failed: {}", msg);
                Err(AnalyticsError::DataUnavailable(msg))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
