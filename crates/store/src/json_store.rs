//! JSON file store implementation.
//!
//! Stores catalog entities and progress records as JSON files under a
//! `.cursus` directory, one file per object. Progress lives under a
//! per-learner subtree so one learner's records never touch another's.

use std::path::{Path, PathBuf};

use cursus_core::{
    Assignment, AssignmentId, AssignmentProgress, CourseId, LearnerId, Lesson, LessonId,
    LessonProgress, Module, ModuleId, Quiz, QuizAttempt, QuizId, QuizScope,
};
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::debug;

use super::{ContentCatalog, ProgressStore, QuizFilter, Result};

/// File-based JSON store backend, serving both the catalog and the
/// progress side.
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Open a store rooted at the given directory, creating the layout if
    /// needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("modules")).await?;
        fs::create_dir_all(root.join("lessons")).await?;
        fs::create_dir_all(root.join("quizzes")).await?;
        fs::create_dir_all(root.join("assignments")).await?;
        fs::create_dir_all(root.join("progress")).await?;

        Ok(Self { root })
    }

    fn module_path(&self, id: ModuleId) -> PathBuf {
        self.root.join("modules").join(format!("{}.json", id))
    }
    fn lesson_path(&self, id: LessonId) -> PathBuf {
        self.root.join("lessons").join(format!("{}.json", id))
    }
    fn quiz_path(&self, id: QuizId) -> PathBuf {
        self.root.join("quizzes").join(format!("{}.json", id))
    }
    fn assignment_path(&self, id: AssignmentId) -> PathBuf {
        self.root.join("assignments").join(format!("{}.json", id))
    }

    fn learner_dir(&self, learner: LearnerId, kind: &str) -> PathBuf {
        self.root.join("progress").join(learner.to_string()).join(kind)
    }
    fn lesson_progress_path(&self, learner: LearnerId, id: LessonId) -> PathBuf {
        self.learner_dir(learner, "lessons").join(format!("{}.json", id))
    }
    fn attempts_path(&self, learner: LearnerId, id: QuizId) -> PathBuf {
        self.learner_dir(learner, "attempts").join(format!("{}.json", id))
    }
    fn assignment_progress_path(&self, learner: LearnerId, id: AssignmentId) -> PathBuf {
        self.learner_dir(learner, "assignments").join(format!("{}.json", id))
    }

    // === Authoring (used by seeding tools and tests; the engine only reads) ===

    /// Save a module (create or update).
    pub async fn save_module(&self, module: &Module) -> Result<()> {
        write_json(&self.module_path(module.id), module).await
    }

    /// Save a lesson.
    pub async fn save_lesson(&self, lesson: &Lesson) -> Result<()> {
        write_json(&self.lesson_path(lesson.id), lesson).await
    }

    /// Save a quiz.
    pub async fn save_quiz(&self, quiz: &Quiz) -> Result<()> {
        write_json(&self.quiz_path(quiz.id), quiz).await
    }

    /// Save an assignment.
    pub async fn save_assignment(&self, assignment: &Assignment) -> Result<()> {
        write_json(&self.assignment_path(assignment.id), assignment).await
    }

    /// Record a lesson completion for a learner.
    pub async fn record_lesson_progress(
        &self,
        learner: LearnerId,
        progress: &LessonProgress,
    ) -> Result<()> {
        fs::create_dir_all(self.learner_dir(learner, "lessons")).await?;
        write_json(&self.lesson_progress_path(learner, progress.lesson_id), progress).await
    }

    /// Append a quiz attempt for a learner.
    pub async fn record_quiz_attempt(
        &self,
        learner: LearnerId,
        attempt: &QuizAttempt,
    ) -> Result<()> {
        fs::create_dir_all(self.learner_dir(learner, "attempts")).await?;
        let path = self.attempts_path(learner, attempt.quiz_id);
        let mut attempts: Vec<QuizAttempt> = read_json(&path).await?.unwrap_or_default();
        attempts.push(attempt.clone());
        write_json(&path, &attempts).await
    }

    /// Record an assignment submission for a learner.
    pub async fn record_assignment_progress(
        &self,
        learner: LearnerId,
        progress: &AssignmentProgress,
    ) -> Result<()> {
        fs::create_dir_all(self.learner_dir(learner, "assignments")).await?;
        write_json(
            &self.assignment_progress_path(learner, progress.assignment_id),
            progress,
        )
        .await
    }
}

#[async_trait::async_trait]
impl ContentCatalog for JsonStore {
    async fn get_module(&self, id: ModuleId) -> Result<Option<Module>> {
        read_json(&self.module_path(id)).await
    }

    async fn list_lessons(&self, module_id: ModuleId) -> Result<Vec<Lesson>> {
        let mut lessons: Vec<Lesson> = list_dir(&self.root.join("lessons")).await?;
        lessons.retain(|l| l.module_id == module_id);
        lessons.sort_by_key(|l| l.order_index);
        debug!(module = %module_id, count = lessons.len(), "listed lessons");
        Ok(lessons)
    }

    async fn list_quizzes(&self, filter: &QuizFilter) -> Result<Vec<Quiz>> {
        let mut quizzes: Vec<Quiz> = list_dir(&self.root.join("quizzes")).await?;
        quizzes.retain(|q| match (filter, q.scope) {
            (QuizFilter::Module(m), QuizScope::Module(owner)) => owner == *m,
            (QuizFilter::Lessons(ids), QuizScope::Lesson(parent)) => ids.contains(&parent),
            _ => false,
        });
        quizzes.sort_by_key(|q| q.order_index);
        Ok(quizzes)
    }

    async fn list_assignments(
        &self,
        course_id: CourseId,
        module_id: Option<ModuleId>,
        published_only: bool,
    ) -> Result<Vec<Assignment>> {
        let mut assignments: Vec<Assignment> =
            list_dir(&self.root.join("assignments")).await?;
        assignments.retain(|a| {
            a.course_id == course_id
                && (!published_only || a.published)
                && module_id.map(|m| a.applies_to(m)).unwrap_or(true)
        });
        assignments.sort_by_key(|a| a.order_index);
        Ok(assignments)
    }
}

#[async_trait::async_trait]
impl ProgressStore for JsonStore {
    async fn lesson_progress(
        &self,
        learner: LearnerId,
        lessons: &[LessonId],
    ) -> Result<Vec<LessonProgress>> {
        let mut records = Vec::new();
        for id in lessons {
            if let Some(record) = read_json(&self.lesson_progress_path(learner, *id)).await? {
                records.push(record);
            }
        }
        Ok(records)
    }

    async fn quiz_attempts(
        &self,
        learner: LearnerId,
        quizzes: &[QuizId],
    ) -> Result<Vec<QuizAttempt>> {
        let mut attempts = Vec::new();
        for id in quizzes {
            let per_quiz: Option<Vec<QuizAttempt>> =
                read_json(&self.attempts_path(learner, *id)).await?;
            attempts.extend(per_quiz.unwrap_or_default());
        }
        Ok(attempts)
    }

    async fn assignment_submissions(
        &self,
        learner: LearnerId,
        assignments: &[AssignmentId],
    ) -> Result<Vec<AssignmentProgress>> {
        let mut records = Vec::new();
        for id in assignments {
            if let Some(record) =
                read_json(&self.assignment_progress_path(learner, *id)).await?
            {
                records.push(record);
            }
        }
        Ok(records)
    }
}

async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json.as_bytes()).await?;
    Ok(())
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(s) => Ok(Some(serde_json::from_str(&s)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut out = Vec::new();
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(out),
        Err(e) => return Err(e.into()),
    };
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().map(|ext| ext == "json").unwrap_or(false) {
            let s = fs::read_to_string(&path).await?;
            out.push(serde_json::from_str(&s)?);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use cursus_core::ContentType;

    async fn store() -> (tempfile::TempDir, JsonStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn lessons_round_trip_sorted() {
        let (_dir, store) = store().await;
        let module_id = ModuleId::new();
        let l2 = Lesson::new(module_id, "L2", ContentType::Text, 1);
        let l1 = Lesson::new(module_id, "L1", ContentType::Video, 0);
        store.save_lesson(&l2).await.unwrap();
        store.save_lesson(&l1).await.unwrap();
        // A lesson of another module must not leak into the listing.
        store
            .save_lesson(&Lesson::new(ModuleId::new(), "other", ContentType::Text, 0))
            .await
            .unwrap();

        let lessons = store.list_lessons(module_id).await.unwrap();
        let titles: Vec<&str> = lessons.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["L1", "L2"]);
    }

    #[tokio::test]
    async fn quiz_filter_separates_scopes() {
        let (_dir, store) = store().await;
        let module_id = ModuleId::new();
        let lesson_id = LessonId::new();
        let standalone = Quiz::new("Final", QuizScope::Module(module_id), 0, 70);
        let nested = Quiz::new("Check", QuizScope::Lesson(lesson_id), 0, 70);
        store.save_quiz(&standalone).await.unwrap();
        store.save_quiz(&nested).await.unwrap();

        let by_module = store
            .list_quizzes(&QuizFilter::Module(module_id))
            .await
            .unwrap();
        assert_eq!(by_module.len(), 1);
        assert_eq!(by_module[0].title, "Final");

        let by_lesson = store
            .list_quizzes(&QuizFilter::Lessons(vec![lesson_id]))
            .await
            .unwrap();
        assert_eq!(by_lesson.len(), 1);
        assert_eq!(by_lesson[0].title, "Check");
    }

    #[tokio::test]
    async fn unpublished_assignments_are_hidden() {
        let (_dir, store) = store().await;
        let course_id = CourseId::new();
        let mut draft = Assignment::new(course_id, None, "Draft", 100, 0);
        draft.published = false;
        let live = Assignment::new(course_id, None, "Live", 100, 1);
        store.save_assignment(&draft).await.unwrap();
        store.save_assignment(&live).await.unwrap();

        let visible = store
            .list_assignments(course_id, None, true)
            .await
            .unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Live");

        let all = store
            .list_assignments(course_id, None, false)
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn assignment_listing_respects_module_scope() {
        let (_dir, store) = store().await;
        let course_id = CourseId::new();
        let here = ModuleId::new();
        let elsewhere = ModuleId::new();
        store
            .save_assignment(&Assignment::new(course_id, Some(here), "targeted", 100, 0))
            .await
            .unwrap();
        store
            .save_assignment(&Assignment::new(course_id, None, "course-wide", 100, 1))
            .await
            .unwrap();
        store
            .save_assignment(&Assignment::new(course_id, Some(elsewhere), "foreign", 100, 2))
            .await
            .unwrap();

        let listed = store
            .list_assignments(course_id, Some(here), true)
            .await
            .unwrap();
        let titles: Vec<&str> = listed.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["targeted", "course-wide"]);
    }

    #[tokio::test]
    async fn attempts_append_per_quiz() {
        let (_dir, store) = store().await;
        let learner = LearnerId::new();
        let quiz_id = QuizId::new();
        for score in [40u8, 85] {
            store
                .record_quiz_attempt(
                    learner,
                    &QuizAttempt {
                        quiz_id,
                        score,
                        completed_at: Utc::now(),
                    },
                )
                .await
                .unwrap();
        }

        let attempts = store.quiz_attempts(learner, &[quiz_id]).await.unwrap();
        assert_eq!(attempts.len(), 2);

        // Another learner sees nothing.
        let other = store
            .quiz_attempts(LearnerId::new(), &[quiz_id])
            .await
            .unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn missing_progress_reads_as_empty() {
        let (_dir, store) = store().await;
        let learner = LearnerId::new();
        let records = store
            .lesson_progress(learner, &[LessonId::new()])
            .await
            .unwrap();
        assert!(records.is_empty());
    }
}
