//! Cursus core data models.
//!
//! This crate defines the catalog entities (modules, lessons, quizzes,
//! assignments) and per-learner progress records that the sequencing and
//! gating engine consumes.

#![warn(missing_docs)]

// Core identities
mod id;

// Catalog entities
mod module;
mod lesson;
mod quiz;
mod assignment;

// Learner progress
mod progress;

// Re-exports
pub use id::*;

pub use module::Module;
pub use lesson::{Lesson, ContentType};
pub use quiz::{Quiz, QuizScope};
pub use assignment::Assignment;

pub use progress::{
    LessonProgress, QuizAttempt, QuizProgress, AssignmentProgress,
    ProgressSnapshot, ItemState,
};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
