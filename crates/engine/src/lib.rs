//! Curriculum sequencing and gating engine.
//!
//! The one canonical algorithm behind every curriculum view: it linearizes
//! a module's content into typed timelines, derives locked/unlocked access
//! per entry from a progress snapshot, and computes normalized progress.
//!
//! The engine is synchronous and pure. It performs no I/O, holds no state
//! between calls, and recomputes from scratch on every invocation; callers
//! re-invoke it whenever progress changes.

#![warn(missing_docs)]

pub mod content;
pub mod sequence;
pub mod gating;
pub mod aggregate;
pub mod outline;

pub use content::{ModuleContent, ContentError};
pub use sequence::{SequenceBuilder, ModuleTimelines, CourseEntry, RecordEntry};
pub use gating::GatingEvaluator;
pub use aggregate::ProgressAggregator;
pub use outline::{ModuleOutline, CourseItem, ExerciseItem};
