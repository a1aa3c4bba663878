//! Normalized per-module input for the engine.

use cursus_core::{Assignment, AssignmentId, Lesson, LessonId, Module, Quiz, QuizId, QuizScope};
use std::collections::HashSet;

/// Errors raised when catalog input is malformed.
///
/// These are boundary preconditions: once a `ModuleContent` exists, the
/// sequencing and gating algorithms never fail on it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ContentError {
    /// Two lessons in the module share an order_index
    #[error("duplicate lesson order_index {order_index} in module {module}")]
    DuplicateLessonOrder {
        /// The module containing the clash
        module: cursus_core::ModuleId,
        /// The clashing position
        order_index: u32,
    },

    /// Two quizzes nested under the same lesson share an order_index
    #[error("duplicate quiz order_index {order_index} under lesson {lesson}")]
    DuplicateLessonQuizOrder {
        /// The parent lesson
        lesson: LessonId,
        /// The clashing position
        order_index: u32,
    },

    /// Two standalone quizzes in the module share an order_index
    #[error("duplicate standalone quiz order_index {order_index} in module {module}")]
    DuplicateStandaloneQuizOrder {
        /// The module containing the clash
        module: cursus_core::ModuleId,
        /// The clashing position
        order_index: u32,
    },

    /// A lesson-scoped quiz references a lesson outside this module
    #[error("quiz {quiz} references lesson {lesson} which is not in the module")]
    DanglingQuizLesson {
        /// The offending quiz
        quiz: QuizId,
        /// The missing parent lesson
        lesson: LessonId,
    },

    /// A standalone quiz is scoped to a different module
    #[error("quiz {quiz} is scoped to another module")]
    ForeignQuiz {
        /// The offending quiz
        quiz: QuizId,
    },

    /// A lesson belongs to a different module
    #[error("lesson {lesson} belongs to another module")]
    ForeignLesson {
        /// The offending lesson
        lesson: LessonId,
    },

    /// Two assignments applying to the module share an order_index
    #[error("duplicate assignment order_index {order_index}")]
    DuplicateAssignmentOrder {
        /// One of the clashing assignments
        assignment: AssignmentId,
        /// The clashing position
        order_index: u32,
    },
}

/// A module's catalog content, validated and sorted, ready for sequencing.
///
/// Construction normalizes the input: lessons, quizzes and assignments are
/// sorted by order_index, assignments are filtered to those applying to the
/// module (directly targeted or course-wide), and sibling-scope order_index
/// clashes and dangling scope references are rejected.
#[derive(Debug, Clone)]
pub struct ModuleContent {
    /// The module itself
    pub module: Module,

    /// The module's lessons, sorted by order_index
    pub lessons: Vec<Lesson>,

    /// All quizzes attached to the module or its lessons
    pub quizzes: Vec<Quiz>,

    /// Applicable assignments, sorted by order_index
    pub assignments: Vec<Assignment>,
}

impl ModuleContent {
    /// Validate and normalize raw catalog rows for one module.
    pub fn new(
        module: Module,
        mut lessons: Vec<Lesson>,
        quizzes: Vec<Quiz>,
        assignments: Vec<Assignment>,
    ) -> Result<Self, ContentError> {
        lessons.sort_by_key(|l| l.order_index);

        let mut seen = HashSet::new();
        for lesson in &lessons {
            if lesson.module_id != module.id {
                return Err(ContentError::ForeignLesson { lesson: lesson.id });
            }
            if !seen.insert(lesson.order_index) {
                return Err(ContentError::DuplicateLessonOrder {
                    module: module.id,
                    order_index: lesson.order_index,
                });
            }
        }

        let lesson_ids: HashSet<LessonId> = lessons.iter().map(|l| l.id).collect();
        let mut standalone_seen = HashSet::new();
        let mut nested_seen: HashSet<(LessonId, u32)> = HashSet::new();
        for quiz in &quizzes {
            match quiz.scope {
                QuizScope::Lesson(lesson) => {
                    if !lesson_ids.contains(&lesson) {
                        return Err(ContentError::DanglingQuizLesson {
                            quiz: quiz.id,
                            lesson,
                        });
                    }
                    if !nested_seen.insert((lesson, quiz.order_index)) {
                        return Err(ContentError::DuplicateLessonQuizOrder {
                            lesson,
                            order_index: quiz.order_index,
                        });
                    }
                }
                QuizScope::Module(owner) => {
                    if owner != module.id {
                        return Err(ContentError::ForeignQuiz { quiz: quiz.id });
                    }
                    if !standalone_seen.insert(quiz.order_index) {
                        return Err(ContentError::DuplicateStandaloneQuizOrder {
                            module: module.id,
                            order_index: quiz.order_index,
                        });
                    }
                }
            }
        }

        // Keep assignments targeting this module or the whole course.
        let mut assignments: Vec<Assignment> = assignments
            .into_iter()
            .filter(|a| a.applies_to(module.id))
            .collect();
        assignments.sort_by_key(|a| a.order_index);

        let mut assignment_seen = HashSet::new();
        for assignment in &assignments {
            if !assignment_seen.insert(assignment.order_index) {
                return Err(ContentError::DuplicateAssignmentOrder {
                    assignment: assignment.id,
                    order_index: assignment.order_index,
                });
            }
        }

        Ok(Self {
            module,
            lessons,
            quizzes,
            assignments,
        })
    }

    /// Quizzes nested under the given lesson, sorted by order_index.
    pub fn lesson_quizzes(&self, lesson_id: LessonId) -> Vec<&Quiz> {
        let mut nested: Vec<&Quiz> = self
            .quizzes
            .iter()
            .filter(|q| q.parent_lesson() == Some(lesson_id))
            .collect();
        nested.sort_by_key(|q| q.order_index);
        nested
    }

    /// Standalone module-level quizzes, sorted by order_index.
    pub fn standalone_quizzes(&self) -> Vec<&Quiz> {
        let mut standalone: Vec<&Quiz> =
            self.quizzes.iter().filter(|q| q.is_standalone()).collect();
        standalone.sort_by_key(|q| q.order_index);
        standalone
    }
}
