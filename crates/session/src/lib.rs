//! Session layer around the pure engine.
//!
//! Fetches a learner's module content and progress from the store
//! collaborators, materializes a snapshot, and caches the resulting
//! outline per module. The engine itself stays pure; everything stateful
//! or async lives here.

#![warn(missing_docs)]

mod loader;
mod cache;
mod service;

pub use loader::{SnapshotLoader, SessionError};
pub use cache::{ModuleCache, CachedModule};
pub use service::CurriculumService;
