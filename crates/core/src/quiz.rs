//! Quiz model - graded checks attached to a lesson or directly to a module.

use serde::{Deserialize, Serialize};
use crate::id::{LessonId, ModuleId, QuizId};

/// A quiz with a passing threshold.
///
/// A quiz is attached to exactly one parent: either nested under a lesson,
/// or standalone at module level. The scope enum makes any other shape
/// unrepresentable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    /// Unique identifier
    pub id: QuizId,

    /// Quiz title
    pub title: String,

    /// Detailed description
    pub description: String,

    /// Position among siblings in the same scope
    pub order_index: u32,

    /// Minimum score (0-100) an attempt needs to pass
    pub passing_score: u8,

    /// Where this quiz is attached
    pub scope: QuizScope,
}

/// Attachment scope of a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizScope {
    /// Nested under a lesson
    Lesson(LessonId),
    /// Standalone at module level
    Module(ModuleId),
}

impl Quiz {
    /// Create a quiz in the given scope.
    pub fn new(
        title: impl Into<String>,
        scope: QuizScope,
        order_index: u32,
        passing_score: u8,
    ) -> Self {
        Self {
            id: QuizId::new(),
            title: title.into(),
            description: String::new(),
            order_index,
            passing_score,
            scope,
        }
    }

    /// Parent lesson id, if this quiz is lesson-nested.
    pub fn parent_lesson(&self) -> Option<LessonId> {
        match self.scope {
            QuizScope::Lesson(id) => Some(id),
            QuizScope::Module(_) => None,
        }
    }

    /// True if this quiz is attached directly to a module.
    pub fn is_standalone(&self) -> bool {
        matches!(self.scope, QuizScope::Module(_))
    }
}
