//! Per-module session cache.
//!
//! Modules are fetched on demand (the views expand one module at a time),
//! so loaded state is cached per (learner, module) and thrown away when a
//! progress change makes it stale. Recomputing an outline from a kept
//! snapshot is idempotent, so eviction is always safe.

use std::collections::HashMap;

use cursus_core::{LearnerId, ModuleId, ProgressSnapshot, Time};
use cursus_engine::{ModuleContent, ModuleOutline};

/// One loaded module session.
#[derive(Debug, Clone)]
pub struct CachedModule {
    /// Validated catalog content
    pub content: ModuleContent,

    /// The learner's progress snapshot the outline was built from
    pub snapshot: ProgressSnapshot,

    /// The computed outline
    pub outline: ModuleOutline,

    /// When this entry was loaded
    pub loaded_at: Time,
}

/// On-demand cache of loaded module sessions.
#[derive(Debug, Default)]
pub struct ModuleCache {
    entries: HashMap<(LearnerId, ModuleId), CachedModule>,
}

impl ModuleCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a module session is loaded for this learner.
    pub fn is_loaded(&self, learner: LearnerId, module: ModuleId) -> bool {
        self.entries.contains_key(&(learner, module))
    }

    /// Get a loaded session, if any.
    pub fn get(&self, learner: LearnerId, module: ModuleId) -> Option<&CachedModule> {
        self.entries.get(&(learner, module))
    }

    /// Store a loaded session, replacing any previous one.
    pub fn insert(&mut self, learner: LearnerId, entry: CachedModule) {
        self.entries.insert((learner, entry.outline.module_id), entry);
    }

    /// Drop every learner's session for one module (catalog change).
    pub fn invalidate_module(&mut self, module: ModuleId) {
        self.entries.retain(|(_, m), _| *m != module);
    }

    /// Drop one learner's sessions across modules (progress change).
    pub fn invalidate_learner(&mut self, learner: LearnerId) {
        self.entries.retain(|(l, _), _| *l != learner);
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of loaded sessions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
