//! Normalized module progress.

use cursus_core::ProgressSnapshot;

use crate::content::ModuleContent;

/// Computes a 0-100 completion percentage for a module.
pub struct ProgressAggregator;

impl ProgressAggregator {
    /// Create a new aggregator.
    pub fn new() -> Self {
        Self
    }

    /// Module-local percentage.
    ///
    /// One consistent denominator: lessons + all quizzes (nested and
    /// standalone) + applicable assignments. Completed items are lessons
    /// with `completed`, quizzes with `passed`, assignments with
    /// `submitted`. A module with no items is 0 percent.
    pub fn module_percent(&self, content: &ModuleContent, snapshot: &ProgressSnapshot) -> u8 {
        let total =
            content.lessons.len() + content.quizzes.len() + content.assignments.len();
        if total == 0 {
            return 0;
        }

        let completed = content
            .lessons
            .iter()
            .filter(|l| snapshot.lesson_completed(l.id))
            .count()
            + content
                .quizzes
                .iter()
                .filter(|q| snapshot.quiz_passed(q.id))
                .count()
            + content
                .assignments
                .iter()
                .filter(|a| snapshot.assignment_submitted(a.id))
                .count();

        let percent = (100.0 * completed as f64 / total as f64).round() as u8;
        percent.min(100)
    }

    /// Percentage for course-wide progress bars.
    ///
    /// When the enrollment system supplies an authoritative course-level
    /// value it wins; otherwise this falls back to
    /// [`module_percent`](Self::module_percent). Per-module figures always
    /// come from `module_percent` directly.
    pub fn percent(&self, content: &ModuleContent, snapshot: &ProgressSnapshot) -> u8 {
        match snapshot.enrollment_percent {
            Some(p) => p.min(100),
            None => self.module_percent(content, snapshot),
        }
    }
}

impl Default for ProgressAggregator {
    fn default() -> Self {
        Self::new()
    }
}
