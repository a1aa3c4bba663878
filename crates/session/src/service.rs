//! The facade curriculum views talk to.

use std::sync::Arc;

use chrono::Utc;
use cursus_core::{LearnerId, ModuleId};
use cursus_engine::ModuleOutline;
use cursus_store::{ContentCatalog, ProgressStore};
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::{CachedModule, ModuleCache};
use crate::loader::{SessionError, SnapshotLoader};

/// Serves module outlines to presentation adapters.
///
/// Outlines are computed from a freshly loaded snapshot on first access and
/// cached per (learner, module) afterwards. The service never subscribes to
/// anything itself; the surrounding application calls the `mark_*` hooks
/// when it learns of a change, and the next access recomputes. Between a
/// progress write and that recompute a view may briefly render stale lock
/// state, which the design tolerates.
pub struct CurriculumService {
    loader: SnapshotLoader,
    cache: Mutex<ModuleCache>,
}

impl CurriculumService {
    /// Create a service over the two store collaborators.
    pub fn new(catalog: Arc<dyn ContentCatalog>, progress: Arc<dyn ProgressStore>) -> Self {
        Self {
            loader: SnapshotLoader::new(catalog, progress),
            cache: Mutex::new(ModuleCache::new()),
        }
    }

    /// Outline for one module, loading it on first access.
    pub async fn outline(
        &self,
        learner: LearnerId,
        module: ModuleId,
    ) -> Result<ModuleOutline, SessionError> {
        {
            let cache = self.cache.lock().await;
            if let Some(entry) = cache.get(learner, module) {
                debug!(%learner, %module, "outline served from cache");
                return Ok(entry.outline.clone());
            }
        }
        self.refresh(learner, module).await
    }

    /// Reload a module's snapshot and recompute its outline, replacing any
    /// cached session.
    pub async fn refresh(
        &self,
        learner: LearnerId,
        module: ModuleId,
    ) -> Result<ModuleOutline, SessionError> {
        let (content, snapshot) = self.loader.load_module(learner, module).await?;
        let outline = ModuleOutline::build(&content, &snapshot);

        let mut cache = self.cache.lock().await;
        cache.insert(
            learner,
            CachedModule {
                content,
                snapshot,
                outline: outline.clone(),
                loaded_at: Utc::now(),
            },
        );
        Ok(outline)
    }

    /// Drop cached sessions for a module after a catalog change.
    pub async fn mark_module_stale(&self, module: ModuleId) {
        self.cache.lock().await.invalidate_module(module);
    }

    /// Drop a learner's cached sessions after a progress change.
    pub async fn mark_learner_stale(&self, learner: LearnerId) {
        self.cache.lock().await.invalidate_learner(learner);
    }
}
