//! Store trait abstractions.

use async_trait::async_trait;
use cursus_core::{
    Assignment, AssignmentId, AssignmentProgress, CourseId, LearnerId, Lesson, LessonId,
    LessonProgress, Module, ModuleId, Quiz, QuizAttempt, QuizId,
};

/// Error type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Quiz query scope.
#[derive(Debug, Clone)]
pub enum QuizFilter {
    /// Standalone quizzes attached directly to this module
    Module(ModuleId),
    /// Quizzes nested under any of these lessons
    Lessons(Vec<LessonId>),
}

/// Read-only source of curriculum definitions.
///
/// This trait allows different catalog backends to be plugged in. The
/// engine never writes through it; authoring happens in instructor tooling
/// elsewhere.
#[async_trait]
pub trait ContentCatalog: Send + Sync {
    /// Load a module by ID.
    async fn get_module(&self, id: ModuleId) -> Result<Option<Module>>;

    /// List a module's lessons, ordered by order_index.
    async fn list_lessons(&self, module_id: ModuleId) -> Result<Vec<Lesson>>;

    /// List quizzes in the given scope.
    async fn list_quizzes(&self, filter: &QuizFilter) -> Result<Vec<Quiz>>;

    /// List a course's assignments.
    ///
    /// With `module_id` set, returns assignments targeting that module plus
    /// course-wide ones (`module_id` null); without it, all of the
    /// course's assignments. `published_only` drops unpublished rows.
    async fn list_assignments(
        &self,
        course_id: CourseId,
        module_id: Option<ModuleId>,
        published_only: bool,
    ) -> Result<Vec<Assignment>>;
}

/// Read source of per-learner completion records.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Lesson completion records for the given lessons. Lessons without a
    /// record are simply absent from the result.
    async fn lesson_progress(
        &self,
        learner: LearnerId,
        lessons: &[LessonId],
    ) -> Result<Vec<LessonProgress>>;

    /// Raw graded attempts for the given quizzes. Callers reduce these to
    /// best/any-pass per quiz against each quiz's passing score.
    async fn quiz_attempts(
        &self,
        learner: LearnerId,
        quizzes: &[QuizId],
    ) -> Result<Vec<QuizAttempt>>;

    /// Submission records for the given assignments.
    async fn assignment_submissions(
        &self,
        learner: LearnerId,
        assignments: &[AssignmentId],
    ) -> Result<Vec<AssignmentProgress>>;
}
