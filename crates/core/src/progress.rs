//! Per-learner progress records and the snapshot the engine reads.
//!
//! Progress records are created by the surrounding application on first
//! learner interaction and updated on later ones. The engine only ever
//! reads them; a missing record always means "not completed".

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use crate::id::{AssignmentId, LessonId, QuizId};
use crate::Time;

/// Completion record for a lesson.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonProgress {
    /// The lesson this record belongs to
    pub lesson_id: LessonId,

    /// Whether the learner finished the lesson
    pub completed: bool,

    /// When the lesson was finished
    pub completed_at: Option<Time>,
}

impl LessonProgress {
    /// Record a completed lesson at the given time.
    pub fn completed_at(lesson_id: LessonId, at: Time) -> Self {
        Self {
            lesson_id,
            completed: true,
            completed_at: Some(at),
        }
    }
}

/// A single graded quiz attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizAttempt {
    /// The quiz attempted
    pub quiz_id: QuizId,

    /// Achieved score (0-100)
    pub score: u8,

    /// When the attempt was submitted
    pub completed_at: Time,
}

/// Reduced attempt history for a quiz.
///
/// `passed` is an OR over all attempts against the quiz's passing score, so
/// it is monotonic: a later failed attempt never un-passes a quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizProgress {
    /// The quiz this record belongs to
    pub quiz_id: QuizId,

    /// Whether any attempt ever reached the passing score
    pub passed: bool,

    /// Best score across attempts
    pub best_score: u8,

    /// Number of attempts made
    pub attempts: u32,
}

impl QuizProgress {
    /// Reduce raw attempts to a progress record.
    ///
    /// An empty attempt list yields an unpassed record with zero attempts.
    pub fn from_attempts(quiz_id: QuizId, passing_score: u8, attempts: &[QuizAttempt]) -> Self {
        let best_score = attempts.iter().map(|a| a.score).max().unwrap_or(0);
        Self {
            quiz_id,
            passed: attempts.iter().any(|a| a.score >= passing_score),
            best_score,
            attempts: attempts.len() as u32,
        }
    }
}

/// Submission record for an assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentProgress {
    /// The assignment this record belongs to
    pub assignment_id: AssignmentId,

    /// Whether the learner submitted work
    pub submitted: bool,

    /// When the submission happened
    pub submitted_at: Option<Time>,

    /// Whether an instructor graded the submission
    pub graded: bool,

    /// Awarded points, once graded
    pub score: Option<u32>,
}

impl AssignmentProgress {
    /// Record an ungraded submission at the given time.
    pub fn submitted_at(assignment_id: AssignmentId, at: Time) -> Self {
        Self {
            assignment_id,
            submitted: true,
            submitted_at: Some(at),
            graded: false,
            score: None,
        }
    }
}

/// A learner's progress data at one point in time.
///
/// The snapshot is pure input to gating and aggregation: the engine never
/// writes through it, and recomputation against an unchanged snapshot is
/// idempotent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Lesson records by lesson id
    pub lessons: HashMap<LessonId, LessonProgress>,

    /// Reduced quiz records by quiz id
    pub quizzes: HashMap<QuizId, QuizProgress>,

    /// Assignment records by assignment id
    pub assignments: HashMap<AssignmentId, AssignmentProgress>,

    /// Authoritative course-level progress percentage, when the enrollment
    /// system supplies one. Overrides the module-local computation.
    pub enrollment_percent: Option<u8>,
}

impl ProgressSnapshot {
    /// Create an empty snapshot (nothing completed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a lesson is completed. Absent records count as incomplete.
    pub fn lesson_completed(&self, id: LessonId) -> bool {
        self.lessons.get(&id).map(|p| p.completed).unwrap_or(false)
    }

    /// Whether a quiz has ever been passed. Absent records count as unpassed.
    pub fn quiz_passed(&self, id: QuizId) -> bool {
        self.quizzes.get(&id).map(|p| p.passed).unwrap_or(false)
    }

    /// Whether an assignment has been submitted.
    pub fn assignment_submitted(&self, id: AssignmentId) -> bool {
        self.assignments
            .get(&id)
            .map(|p| p.submitted)
            .unwrap_or(false)
    }

    /// Whether an assignment submission has been graded.
    pub fn assignment_graded(&self, id: AssignmentId) -> bool {
        self.assignments.get(&id).map(|p| p.graded).unwrap_or(false)
    }

    /// Insert a lesson record, replacing any existing one.
    pub fn record_lesson(&mut self, progress: LessonProgress) {
        self.lessons.insert(progress.lesson_id, progress);
    }

    /// Insert a quiz record, replacing any existing one.
    pub fn record_quiz(&mut self, progress: QuizProgress) {
        self.quizzes.insert(progress.quiz_id, progress);
    }

    /// Insert an assignment record, replacing any existing one.
    pub fn record_assignment(&mut self, progress: AssignmentProgress) {
        self.assignments.insert(progress.assignment_id, progress);
    }
}

/// Access state of a single timeline item.
///
/// Locked/unlocked is always re-derived from the current snapshot; there is
/// no persisted "locked" flag anywhere in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    /// Prerequisites not yet met
    Locked,
    /// Accessible but not yet done
    Unlocked,
    /// Done (completed / passed / submitted)
    Completed,
}

impl ItemState {
    /// Derive the state from a (locked, done) pair.
    pub fn derive(locked: bool, done: bool) -> Self {
        if done {
            ItemState::Completed
        } else if locked {
            ItemState::Locked
        } else {
            ItemState::Unlocked
        }
    }
}
