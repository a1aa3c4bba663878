//! Locked/unlocked derivation per timeline entry.
//!
//! Every rule here is pure and total over a progress snapshot: a missing
//! progress record reads as "not completed", and no rule panics or errors
//! on well-typed input. Lock state is never stored; it is re-derived from
//! the current snapshot on every evaluation.

use cursus_core::{Assignment, Lesson, ProgressSnapshot, Quiz, QuizScope};

use crate::content::ModuleContent;
use crate::sequence::CourseEntry;

/// Predecessor in the merged {lessons, standalone quizzes} order.
enum MergedEntry<'a> {
    Lesson(&'a Lesson),
    Quiz(&'a Quiz),
}

/// Derives access state for timeline entries.
pub struct GatingEvaluator;

impl GatingEvaluator {
    /// Create a new evaluator.
    pub fn new() -> Self {
        Self
    }

    /// Whether a course timeline entry is locked for this snapshot.
    pub fn is_locked(
        &self,
        entry: &CourseEntry,
        content: &ModuleContent,
        snapshot: &ProgressSnapshot,
    ) -> bool {
        match entry {
            CourseEntry::Lesson(lesson) => self.lesson_locked(lesson, content, snapshot),
            CourseEntry::Quiz(quiz) => self.quiz_locked(quiz, content, snapshot),
        }
    }

    /// Whether a lesson is locked.
    ///
    /// Gated purely by the lesson-only ordering: the first lesson is always
    /// open, every later lesson opens when its immediate predecessor lesson
    /// is completed. Interleaved quizzes play no role here.
    pub fn lesson_locked(
        &self,
        lesson: &Lesson,
        content: &ModuleContent,
        snapshot: &ProgressSnapshot,
    ) -> bool {
        let Some(pos) = content.lessons.iter().position(|l| l.id == lesson.id) else {
            // Not part of this module's content; nothing gates it.
            return false;
        };
        match pos.checked_sub(1).and_then(|i| content.lessons.get(i)) {
            Some(prev) => !snapshot.lesson_completed(prev.id),
            None => false,
        }
    }

    /// Whether a quiz is locked.
    pub fn quiz_locked(
        &self,
        quiz: &Quiz,
        content: &ModuleContent,
        snapshot: &ProgressSnapshot,
    ) -> bool {
        match quiz.scope {
            // A nested quiz follows its parent lesson's completion only.
            // Its own attempt history is irrelevant: a stale passed score
            // does not open a quiz whose lesson was never completed.
            QuizScope::Lesson(lesson_id) => !snapshot.lesson_completed(lesson_id),
            QuizScope::Module(_) => self.standalone_quiz_locked(quiz, content, snapshot),
        }
    }

    fn standalone_quiz_locked(
        &self,
        quiz: &Quiz,
        content: &ModuleContent,
        snapshot: &ProgressSnapshot,
    ) -> bool {
        let merged = merged_order(content);
        let Some(pos) = merged.iter().position(|e| match e {
            MergedEntry::Quiz(q) => q.id == quiz.id,
            MergedEntry::Lesson(_) => false,
        }) else {
            return false;
        };
        match pos.checked_sub(1).map(|i| &merged[i]) {
            // First entry of the merged order is never locked.
            None => false,
            Some(MergedEntry::Lesson(prev)) => !snapshot.lesson_completed(prev.id),
            Some(MergedEntry::Quiz(prev)) => !snapshot.quiz_passed(prev.id),
        }
    }

    /// Whether an assignment is locked.
    ///
    /// A single allOf gate over the module: every lesson completed and
    /// every standalone quiz passed. Assignments never gate each other and
    /// their order_index plays no role.
    pub fn assignment_locked(
        &self,
        _assignment: &Assignment,
        content: &ModuleContent,
        snapshot: &ProgressSnapshot,
    ) -> bool {
        let lessons_done = content
            .lessons
            .iter()
            .all(|l| snapshot.lesson_completed(l.id));
        let quizzes_done = content
            .standalone_quizzes()
            .iter()
            .all(|q| snapshot.quiz_passed(q.id));
        !(lessons_done && quizzes_done)
    }
}

impl Default for GatingEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Lessons and standalone quizzes merged by order_index, lesson first on a
/// tie. Mirrors the course timeline with nested quizzes left out.
fn merged_order(content: &ModuleContent) -> Vec<MergedEntry<'_>> {
    let mut merged: Vec<MergedEntry> = content
        .lessons
        .iter()
        .map(MergedEntry::Lesson)
        .chain(content.standalone_quizzes().into_iter().map(MergedEntry::Quiz))
        .collect();
    merged.sort_by_key(|e| match e {
        MergedEntry::Lesson(l) => (l.order_index, 0u8),
        MergedEntry::Quiz(q) => (q.order_index, 1u8),
    });
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use cursus_core::{
        ContentType, CourseId, LessonProgress, Module, ModuleId, QuizId, QuizProgress,
    };

    fn module() -> Module {
        Module::new(CourseId::new(), "Intro", 0)
    }

    fn lesson(module_id: ModuleId, title: &str, order: u32) -> Lesson {
        Lesson::new(module_id, title, ContentType::Video, order)
    }

    fn passed(quiz_id: QuizId) -> QuizProgress {
        QuizProgress {
            quiz_id,
            passed: true,
            best_score: 100,
            attempts: 1,
        }
    }

    fn complete(snapshot: &mut ProgressSnapshot, lesson: &Lesson) {
        snapshot.record_lesson(LessonProgress::completed_at(lesson.id, Utc::now()));
    }

    #[test]
    fn first_lesson_never_locked() {
        let m = module();
        let l1 = lesson(m.id, "L1", 0);
        let l2 = lesson(m.id, "L2", 1);
        let l3 = lesson(m.id, "L3", 2);
        let content =
            ModuleContent::new(m, vec![l1.clone(), l2.clone(), l3.clone()], vec![], vec![])
                .unwrap();
        let snapshot = ProgressSnapshot::new();
        let gate = GatingEvaluator::new();

        assert!(!gate.lesson_locked(&l1, &content, &snapshot));
        assert!(gate.lesson_locked(&l2, &content, &snapshot));
        assert!(gate.lesson_locked(&l3, &content, &snapshot));
    }

    #[test]
    fn completing_a_lesson_unlocks_only_the_next() {
        let m = module();
        let l1 = lesson(m.id, "L1", 0);
        let l2 = lesson(m.id, "L2", 1);
        let l3 = lesson(m.id, "L3", 2);
        let content =
            ModuleContent::new(m, vec![l1.clone(), l2.clone(), l3.clone()], vec![], vec![])
                .unwrap();
        let gate = GatingEvaluator::new();

        let mut snapshot = ProgressSnapshot::new();
        complete(&mut snapshot, &l1);

        assert!(!gate.lesson_locked(&l1, &content, &snapshot));
        assert!(!gate.lesson_locked(&l2, &content, &snapshot));
        assert!(gate.lesson_locked(&l3, &content, &snapshot));
    }

    #[test]
    fn completing_later_lesson_never_relocks_earlier_items() {
        let m = module();
        let l1 = lesson(m.id, "L1", 0);
        let l2 = lesson(m.id, "L2", 1);
        let content =
            ModuleContent::new(m, vec![l1.clone(), l2.clone()], vec![], vec![]).unwrap();
        let gate = GatingEvaluator::new();

        let mut snapshot = ProgressSnapshot::new();
        complete(&mut snapshot, &l1);
        let before = gate.lesson_locked(&l1, &content, &snapshot);

        complete(&mut snapshot, &l2);
        assert_eq!(gate.lesson_locked(&l1, &content, &snapshot), before);
        assert!(!gate.lesson_locked(&l1, &content, &snapshot));
    }

    #[test]
    fn nested_quiz_stays_locked_despite_stale_pass() {
        let m = module();
        let l1 = lesson(m.id, "L1", 0);
        let q1 = Quiz::new("Q1", QuizScope::Lesson(l1.id), 0, 70);
        let content =
            ModuleContent::new(m, vec![l1], vec![q1.clone()], vec![]).unwrap();
        let gate = GatingEvaluator::new();

        // A stale attempt record marks the quiz passed, but its parent
        // lesson was never completed.
        let mut snapshot = ProgressSnapshot::new();
        snapshot.record_quiz(passed(q1.id));

        assert!(gate.quiz_locked(&q1, &content, &snapshot));
    }

    #[test]
    fn nested_quiz_unlocks_with_parent_lesson() {
        let m = module();
        let l1 = lesson(m.id, "L1", 0);
        let q1 = Quiz::new("Q1", QuizScope::Lesson(l1.id), 0, 70);
        let content =
            ModuleContent::new(m, vec![l1.clone()], vec![q1.clone()], vec![]).unwrap();
        let gate = GatingEvaluator::new();

        let mut snapshot = ProgressSnapshot::new();
        complete(&mut snapshot, &l1);

        assert!(!gate.quiz_locked(&q1, &content, &snapshot));
    }

    #[test]
    fn standalone_quiz_chain_without_lessons() {
        let m = module();
        let qa = Quiz::new("Qa", QuizScope::Module(m.id), 1, 70);
        let qb = Quiz::new("Qb", QuizScope::Module(m.id), 2, 70);
        let content =
            ModuleContent::new(m, vec![], vec![qa.clone(), qb.clone()], vec![]).unwrap();
        let gate = GatingEvaluator::new();

        let mut snapshot = ProgressSnapshot::new();
        assert!(!gate.quiz_locked(&qa, &content, &snapshot));
        assert!(gate.quiz_locked(&qb, &content, &snapshot));

        snapshot.record_quiz(passed(qa.id));
        assert!(!gate.quiz_locked(&qb, &content, &snapshot));
    }

    #[test]
    fn standalone_quiz_gated_by_preceding_lesson() {
        let m = module();
        let l1 = lesson(m.id, "L1", 0);
        let fin = Quiz::new("Final", QuizScope::Module(m.id), 1, 70);
        let content =
            ModuleContent::new(m, vec![l1.clone()], vec![fin.clone()], vec![]).unwrap();
        let gate = GatingEvaluator::new();

        let mut snapshot = ProgressSnapshot::new();
        assert!(gate.quiz_locked(&fin, &content, &snapshot));

        complete(&mut snapshot, &l1);
        assert!(!gate.quiz_locked(&fin, &content, &snapshot));
    }

    #[test]
    fn assignment_requires_all_lessons_and_standalone_quizzes() {
        let m = module();
        let l1 = lesson(m.id, "L1", 0);
        let l2 = lesson(m.id, "L2", 1);
        let fin = Quiz::new("Final", QuizScope::Module(m.id), 2, 70);
        let a = Assignment::new(m.course_id, None, "Essay", 100, 0);
        let content = ModuleContent::new(
            m,
            vec![l1.clone(), l2.clone()],
            vec![fin.clone()],
            vec![a.clone()],
        )
        .unwrap();
        let gate = GatingEvaluator::new();

        let mut snapshot = ProgressSnapshot::new();
        complete(&mut snapshot, &l1);
        complete(&mut snapshot, &l2);

        // All lessons done, one standalone quiz unpassed: still locked.
        assert!(gate.assignment_locked(&a, &content, &snapshot));

        snapshot.record_quiz(passed(fin.id));
        assert!(!gate.assignment_locked(&a, &content, &snapshot));
    }

    #[test]
    fn nested_quizzes_do_not_gate_assignments() {
        let m = module();
        let l1 = lesson(m.id, "L1", 0);
        let nested = Quiz::new("Q1", QuizScope::Lesson(l1.id), 0, 70);
        let a = Assignment::new(m.course_id, Some(m.id), "Essay", 100, 0);
        let content =
            ModuleContent::new(m, vec![l1.clone()], vec![nested], vec![a.clone()]).unwrap();
        let gate = GatingEvaluator::new();

        let mut snapshot = ProgressSnapshot::new();
        complete(&mut snapshot, &l1);

        // The nested quiz was never attempted; the gate ignores it.
        assert!(!gate.assignment_locked(&a, &content, &snapshot));
    }

    #[test]
    fn assignment_in_empty_module_is_unlocked() {
        let m = module();
        let a = Assignment::new(m.course_id, None, "Essay", 100, 0);
        let content = ModuleContent::new(m, vec![], vec![], vec![a.clone()]).unwrap();
        let gate = GatingEvaluator::new();

        assert!(!gate.assignment_locked(&a, &content, &ProgressSnapshot::new()));
    }
}
