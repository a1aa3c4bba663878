//! In-memory store for tests and embedding.

use std::collections::HashMap;

use cursus_core::{
    Assignment, AssignmentId, AssignmentProgress, CourseId, LearnerId, Lesson, LessonId,
    LessonProgress, Module, ModuleId, Quiz, QuizAttempt, QuizId, QuizScope,
};

use super::{ContentCatalog, ProgressStore, QuizFilter, Result};

/// HashMap-backed store serving both the catalog and the progress side.
///
/// Populate it with the `insert_*` methods, then share it (typically behind
/// an `Arc`) as `dyn ContentCatalog` / `dyn ProgressStore`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    modules: HashMap<ModuleId, Module>,
    lessons: HashMap<LessonId, Lesson>,
    quizzes: HashMap<QuizId, Quiz>,
    assignments: HashMap<AssignmentId, Assignment>,
    lesson_progress: HashMap<(LearnerId, LessonId), LessonProgress>,
    attempts: HashMap<(LearnerId, QuizId), Vec<QuizAttempt>>,
    submissions: HashMap<(LearnerId, AssignmentId), AssignmentProgress>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a module.
    pub fn insert_module(&mut self, module: Module) {
        self.modules.insert(module.id, module);
    }

    /// Insert a lesson.
    pub fn insert_lesson(&mut self, lesson: Lesson) {
        self.lessons.insert(lesson.id, lesson);
    }

    /// Insert a quiz.
    pub fn insert_quiz(&mut self, quiz: Quiz) {
        self.quizzes.insert(quiz.id, quiz);
    }

    /// Insert an assignment.
    pub fn insert_assignment(&mut self, assignment: Assignment) {
        self.assignments.insert(assignment.id, assignment);
    }

    /// Record a lesson completion for a learner.
    pub fn insert_lesson_progress(&mut self, learner: LearnerId, progress: LessonProgress) {
        self.lesson_progress
            .insert((learner, progress.lesson_id), progress);
    }

    /// Append a quiz attempt for a learner.
    pub fn insert_quiz_attempt(&mut self, learner: LearnerId, attempt: QuizAttempt) {
        self.attempts
            .entry((learner, attempt.quiz_id))
            .or_default()
            .push(attempt);
    }

    /// Record an assignment submission for a learner.
    pub fn insert_assignment_progress(
        &mut self,
        learner: LearnerId,
        progress: AssignmentProgress,
    ) {
        self.submissions
            .insert((learner, progress.assignment_id), progress);
    }
}

#[async_trait::async_trait]
impl ContentCatalog for MemoryStore {
    async fn get_module(&self, id: ModuleId) -> Result<Option<Module>> {
        Ok(self.modules.get(&id).cloned())
    }

    async fn list_lessons(&self, module_id: ModuleId) -> Result<Vec<Lesson>> {
        let mut lessons: Vec<Lesson> = self
            .lessons
            .values()
            .filter(|l| l.module_id == module_id)
            .cloned()
            .collect();
        lessons.sort_by_key(|l| l.order_index);
        Ok(lessons)
    }

    async fn list_quizzes(&self, filter: &QuizFilter) -> Result<Vec<Quiz>> {
        let mut quizzes: Vec<Quiz> = self
            .quizzes
            .values()
            .filter(|q| match (filter, q.scope) {
                (QuizFilter::Module(m), QuizScope::Module(owner)) => owner == *m,
                (QuizFilter::Lessons(ids), QuizScope::Lesson(parent)) => ids.contains(&parent),
                _ => false,
            })
            .cloned()
            .collect();
        quizzes.sort_by_key(|q| q.order_index);
        Ok(quizzes)
    }

    async fn list_assignments(
        &self,
        course_id: CourseId,
        module_id: Option<ModuleId>,
        published_only: bool,
    ) -> Result<Vec<Assignment>> {
        let mut assignments: Vec<Assignment> = self
            .assignments
            .values()
            .filter(|a| {
                a.course_id == course_id
                    && (!published_only || a.published)
                    && module_id.map(|m| a.applies_to(m)).unwrap_or(true)
            })
            .cloned()
            .collect();
        assignments.sort_by_key(|a| a.order_index);
        Ok(assignments)
    }
}

#[async_trait::async_trait]
impl ProgressStore for MemoryStore {
    async fn lesson_progress(
        &self,
        learner: LearnerId,
        lessons: &[LessonId],
    ) -> Result<Vec<LessonProgress>> {
        Ok(lessons
            .iter()
            .filter_map(|id| self.lesson_progress.get(&(learner, *id)).cloned())
            .collect())
    }

    async fn quiz_attempts(
        &self,
        learner: LearnerId,
        quizzes: &[QuizId],
    ) -> Result<Vec<QuizAttempt>> {
        Ok(quizzes
            .iter()
            .flat_map(|id| {
                self.attempts
                    .get(&(learner, *id))
                    .cloned()
                    .unwrap_or_default()
            })
            .collect())
    }

    async fn assignment_submissions(
        &self,
        learner: LearnerId,
        assignments: &[AssignmentId],
    ) -> Result<Vec<AssignmentProgress>> {
        Ok(assignments
            .iter()
            .filter_map(|id| self.submissions.get(&(learner, *id)).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursus_core::ContentType;

    #[tokio::test]
    async fn listing_respects_module_boundaries() {
        let mut store = MemoryStore::new();
        let module_id = ModuleId::new();
        store.insert_lesson(Lesson::new(module_id, "L2", ContentType::Text, 1));
        store.insert_lesson(Lesson::new(module_id, "L1", ContentType::Video, 0));
        store.insert_lesson(Lesson::new(ModuleId::new(), "other", ContentType::Text, 0));

        let lessons = store.list_lessons(module_id).await.unwrap();
        let titles: Vec<&str> = lessons.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["L1", "L2"]);
    }

    #[tokio::test]
    async fn progress_is_keyed_per_learner() {
        let mut store = MemoryStore::new();
        let lesson_id = LessonId::new();
        let alice = LearnerId::new();
        let bob = LearnerId::new();
        store.insert_lesson_progress(
            alice,
            LessonProgress::completed_at(lesson_id, chrono::Utc::now()),
        );

        let hers = store.lesson_progress(alice, &[lesson_id]).await.unwrap();
        assert_eq!(hers.len(), 1);
        let his = store.lesson_progress(bob, &[lesson_id]).await.unwrap();
        assert!(his.is_empty());
    }
}
