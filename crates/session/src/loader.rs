//! Snapshot materialization from the store collaborators.

use std::collections::HashMap;
use std::sync::Arc;

use cursus_core::{
    LearnerId, ModuleId, ProgressSnapshot, QuizAttempt, QuizId, QuizProgress,
};
use cursus_engine::{ContentError, ModuleContent};
use cursus_store::{ContentCatalog, ProgressStore, QuizFilter, StoreError};
use tracing::{debug, info};

/// Errors raised while loading a module session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The requested module does not exist in the catalog
    #[error("module {0} not found")]
    ModuleNotFound(ModuleId),

    /// A store operation failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The catalog returned malformed content
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// Fetches catalog content and learner progress and reduces them to the
/// engine's inputs.
pub struct SnapshotLoader {
    catalog: Arc<dyn ContentCatalog>,
    progress: Arc<dyn ProgressStore>,
}

impl SnapshotLoader {
    /// Create a loader over the two collaborators.
    pub fn new(catalog: Arc<dyn ContentCatalog>, progress: Arc<dyn ProgressStore>) -> Self {
        Self { catalog, progress }
    }

    /// Load one module's validated content and the learner's progress
    /// snapshot for it.
    ///
    /// The three progress kinds are fetched concurrently. Quiz attempts are
    /// reduced to best/any-pass records against each quiz's passing score;
    /// stale progress rows referencing items no longer in the catalog are
    /// dropped rather than failing the load.
    pub async fn load_module(
        &self,
        learner: LearnerId,
        module_id: ModuleId,
    ) -> Result<(ModuleContent, ProgressSnapshot), SessionError> {
        let module = self
            .catalog
            .get_module(module_id)
            .await?
            .ok_or(SessionError::ModuleNotFound(module_id))?;

        let lessons = self.catalog.list_lessons(module_id).await?;
        let lesson_ids: Vec<_> = lessons.iter().map(|l| l.id).collect();

        let standalone = self
            .catalog
            .list_quizzes(&QuizFilter::Module(module_id))
            .await?;
        let nested = self
            .catalog
            .list_quizzes(&QuizFilter::Lessons(lesson_ids.clone()))
            .await?;
        let mut quizzes = nested;
        quizzes.extend(standalone);

        let assignments = self
            .catalog
            .list_assignments(module.course_id, Some(module_id), true)
            .await?;

        let quiz_ids: Vec<_> = quizzes.iter().map(|q| q.id).collect();
        let assignment_ids: Vec<_> = assignments.iter().map(|a| a.id).collect();

        let (lesson_records, attempts, submissions) = tokio::join!(
            self.progress.lesson_progress(learner, &lesson_ids),
            self.progress.quiz_attempts(learner, &quiz_ids),
            self.progress.assignment_submissions(learner, &assignment_ids),
        );

        let passing_scores: HashMap<QuizId, u8> =
            quizzes.iter().map(|q| (q.id, q.passing_score)).collect();

        let mut snapshot = ProgressSnapshot::new();
        for record in lesson_records? {
            if lesson_ids.contains(&record.lesson_id) {
                snapshot.record_lesson(record);
            }
        }
        for (quiz_id, attempts) in group_attempts(attempts?) {
            // Attempts for quizzes the catalog no longer knows are stale;
            // skip them.
            let Some(passing_score) = passing_scores.get(&quiz_id) else {
                debug!(%quiz_id, "dropping attempts for unknown quiz");
                continue;
            };
            snapshot.record_quiz(QuizProgress::from_attempts(
                quiz_id,
                *passing_score,
                &attempts,
            ));
        }
        for record in submissions? {
            if assignment_ids.contains(&record.assignment_id) {
                snapshot.record_assignment(record);
            }
        }

        let content = ModuleContent::new(module, lessons, quizzes, assignments)?;
        info!(%learner, %module_id, "loaded module snapshot");
        Ok((content, snapshot))
    }
}

fn group_attempts(attempts: Vec<QuizAttempt>) -> HashMap<QuizId, Vec<QuizAttempt>> {
    let mut grouped: HashMap<QuizId, Vec<QuizAttempt>> = HashMap::new();
    for attempt in attempts {
        grouped.entry(attempt.quiz_id).or_default().push(attempt);
    }
    grouped
}
