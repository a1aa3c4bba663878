//! The composed pipeline: timelines + gating + progress in one result.

use cursus_core::{Assignment, ItemState, LessonId, ModuleId, ProgressSnapshot};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::ProgressAggregator;
use crate::content::ModuleContent;
use crate::gating::GatingEvaluator;
use crate::sequence::{CourseEntry, SequenceBuilder};

/// One rendered-ready entry of the course timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseItem {
    /// The underlying lesson or quiz
    #[serde(flatten)]
    pub entry: CourseEntry,

    /// Whether prerequisites are unmet
    pub locked: bool,

    /// Whether the learner finished this item (lesson completed / quiz
    /// passed)
    pub completed: bool,

    /// Parent lesson, for nested quizzes
    pub parent_lesson_id: Option<LessonId>,
}

impl CourseItem {
    /// Per-item access state.
    pub fn state(&self) -> ItemState {
        ItemState::derive(self.locked, self.completed)
    }
}

/// One rendered-ready entry of the exercise timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseItem {
    /// The underlying assignment
    pub assignment: Assignment,

    /// Whether the module-wide gate is still closed
    pub locked: bool,

    /// Whether the learner submitted work
    pub submitted: bool,

    /// Whether the submission has been graded
    pub graded: bool,
}

impl ExerciseItem {
    /// Per-item access state.
    pub fn state(&self) -> ItemState {
        ItemState::derive(self.locked, self.submitted)
    }
}

/// Everything a curriculum view needs for one module.
///
/// Building an outline is pure and idempotent: the same content and
/// snapshot always produce the same outline, so callers recompute freely
/// whenever progress changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleOutline {
    /// The module this outline describes
    pub module_id: ModuleId,

    /// Lessons and quizzes in learning order, with access state
    pub course_items: Vec<CourseItem>,

    /// Assignments with access state
    pub exercise_items: Vec<ExerciseItem>,

    /// Module-local completion percentage in [0, 100]
    pub progress_percent: u8,

    /// Authoritative course-wide percentage from the enrollment system,
    /// when the snapshot carries one. For course progress bars; never a
    /// substitute for the per-module figure.
    pub course_percent: Option<u8>,
}

impl ModuleOutline {
    /// Run the full pipeline for one module.
    pub fn build(content: &ModuleContent, snapshot: &ProgressSnapshot) -> Self {
        let timelines = SequenceBuilder::new().build(content);
        let gate = GatingEvaluator::new();

        let course_items = timelines
            .course
            .into_iter()
            .map(|entry| {
                let locked = gate.is_locked(&entry, content, snapshot);
                let (completed, parent_lesson_id) = match &entry {
                    CourseEntry::Lesson(l) => (snapshot.lesson_completed(l.id), None),
                    CourseEntry::Quiz(q) => (snapshot.quiz_passed(q.id), q.parent_lesson()),
                };
                CourseItem {
                    entry,
                    locked,
                    completed,
                    parent_lesson_id,
                }
            })
            .collect();

        let exercise_items = timelines
            .exercise
            .into_iter()
            .map(|assignment| {
                let locked = gate.assignment_locked(&assignment, content, snapshot);
                let submitted = snapshot.assignment_submitted(assignment.id);
                let graded = snapshot.assignment_graded(assignment.id);
                ExerciseItem {
                    assignment,
                    locked,
                    submitted,
                    graded,
                }
            })
            .collect();

        let aggregator = ProgressAggregator::new();
        let progress_percent = aggregator.module_percent(content, snapshot);
        let course_percent = snapshot.enrollment_percent.map(|p| p.min(100));
        debug!(module = %content.module.id, progress_percent, "built module outline");

        Self {
            module_id: content.module.id,
            course_items,
            exercise_items,
            progress_percent,
            course_percent,
        }
    }
}
