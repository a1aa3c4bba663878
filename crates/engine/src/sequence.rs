//! Timeline construction for a module's content.

use cursus_core::{Assignment, Lesson, Quiz};
use serde::{Deserialize, Serialize};

use crate::content::ModuleContent;

/// One entry of the course timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CourseEntry {
    /// A lesson
    Lesson(Lesson),
    /// A quiz, nested or standalone
    Quiz(Quiz),
}

impl CourseEntry {
    /// Display title of the underlying item.
    pub fn title(&self) -> &str {
        match self {
            CourseEntry::Lesson(l) => &l.title,
            CourseEntry::Quiz(q) => &q.title,
        }
    }
}

/// Reserved entry type for the record timeline.
///
/// The record tab is an extension point with no backing data yet; the enum
/// has no variants, so its timeline is empty by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RecordEntry {}

/// The ordered, typed timelines of one module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleTimelines {
    /// Lessons and quizzes in learning order
    pub course: Vec<CourseEntry>,

    /// Assignments in order_index order; never interleaved with the course
    /// timeline
    pub exercise: Vec<Assignment>,

    /// Reserved; always empty
    pub record: Vec<RecordEntry>,
}

/// Builds timelines from validated module content.
pub struct SequenceBuilder;

impl SequenceBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self
    }

    /// Linearize a module's content.
    ///
    /// Course timeline: lessons and standalone quizzes merged by
    /// order_index (lesson first on a tie), with each lesson immediately
    /// followed by its nested quizzes in their own order_index order. A
    /// nested quiz always sits next to its parent lesson, whatever raw
    /// numeric position it carries.
    pub fn build(&self, content: &ModuleContent) -> ModuleTimelines {
        let standalone = content.standalone_quizzes();

        let mut course = Vec::new();
        let mut lessons = content.lessons.iter().peekable();
        let mut quizzes = standalone.into_iter().peekable();

        loop {
            let take_lesson = match (lessons.peek(), quizzes.peek()) {
                (Some(l), Some(q)) => l.order_index <= q.order_index,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };

            if take_lesson {
                if let Some(lesson) = lessons.next() {
                    course.push(CourseEntry::Lesson(lesson.clone()));
                    for nested in content.lesson_quizzes(lesson.id) {
                        course.push(CourseEntry::Quiz(nested.clone()));
                    }
                }
            } else if let Some(quiz) = quizzes.next() {
                course.push(CourseEntry::Quiz(quiz.clone()));
            }
        }

        ModuleTimelines {
            course,
            exercise: content.assignments.clone(),
            record: Vec::new(),
        }
    }
}

impl Default for SequenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursus_core::{ContentType, CourseId, Module, ModuleId, QuizScope};

    fn module() -> Module {
        Module::new(CourseId::new(), "Intro", 0)
    }

    fn lesson(module_id: ModuleId, title: &str, order: u32) -> Lesson {
        Lesson::new(module_id, title, ContentType::Text, order)
    }

    fn titles(timelines: &ModuleTimelines) -> Vec<String> {
        timelines.course.iter().map(|e| e.title().to_string()).collect()
    }

    #[test]
    fn nested_quizzes_follow_their_lesson() {
        let m = module();
        let l1 = lesson(m.id, "L1", 0);
        let l2 = lesson(m.id, "L2", 1);
        // Raw order_index of the nested quiz is far beyond both lessons;
        // adjacency to the parent lesson must win anyway.
        let q1 = Quiz::new("Q1", QuizScope::Lesson(l1.id), 99, 70);

        let content =
            ModuleContent::new(m, vec![l1, l2], vec![q1], vec![]).unwrap();
        let timelines = SequenceBuilder::new().build(&content);

        assert_eq!(titles(&timelines), vec!["L1", "Q1", "L2"]);
    }

    #[test]
    fn standalone_quizzes_merge_by_order_index() {
        let m = module();
        let l1 = lesson(m.id, "L1", 0);
        let l2 = lesson(m.id, "L2", 2);
        let mid = Quiz::new("Midterm", QuizScope::Module(m.id), 1, 70);
        let fin = Quiz::new("Final", QuizScope::Module(m.id), 3, 70);

        let content =
            ModuleContent::new(m, vec![l1, l2], vec![mid, fin], vec![]).unwrap();
        let timelines = SequenceBuilder::new().build(&content);

        assert_eq!(titles(&timelines), vec!["L1", "Midterm", "L2", "Final"]);
    }

    #[test]
    fn lesson_wins_order_index_tie() {
        let m = module();
        let l1 = lesson(m.id, "L1", 1);
        let q = Quiz::new("Q", QuizScope::Module(m.id), 1, 70);

        let content = ModuleContent::new(m, vec![l1], vec![q], vec![]).unwrap();
        let timelines = SequenceBuilder::new().build(&content);

        assert_eq!(titles(&timelines), vec!["L1", "Q"]);
    }

    #[test]
    fn exercise_timeline_is_assignments_only() {
        let m = module();
        let l1 = lesson(m.id, "L1", 0);
        let a = Assignment::new(m.course_id, Some(m.id), "Essay", 100, 0);

        let content = ModuleContent::new(m, vec![l1], vec![], vec![a]).unwrap();
        let timelines = SequenceBuilder::new().build(&content);

        assert_eq!(timelines.course.len(), 1);
        assert_eq!(timelines.exercise.len(), 1);
        assert_eq!(timelines.exercise[0].title, "Essay");
    }

    #[test]
    fn empty_module_yields_empty_timelines() {
        let content = ModuleContent::new(module(), vec![], vec![], vec![]).unwrap();
        let timelines = SequenceBuilder::new().build(&content);

        assert!(timelines.course.is_empty());
        assert!(timelines.exercise.is_empty());
        assert!(timelines.record.is_empty());
    }
}
