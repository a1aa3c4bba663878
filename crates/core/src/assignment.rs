//! Assignment model - graded module-wide work.

use serde::{Deserialize, Serialize};
use crate::id::{AssignmentId, CourseId, ModuleId};
use crate::Time;

/// An assignment belonging to a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique identifier
    pub id: AssignmentId,

    /// Owning course
    pub course_id: CourseId,

    /// Target module; `None` means the assignment applies to every module
    /// of the course
    pub module_id: Option<ModuleId>,

    /// Assignment title
    pub title: String,

    /// Submission deadline, if any
    pub due_date: Option<Time>,

    /// Maximum achievable points
    pub max_points: u32,

    /// Position among the course's assignments
    pub order_index: u32,

    /// Whether the assignment is visible to learners
    pub published: bool,
}

impl Assignment {
    /// Create a published assignment.
    pub fn new(
        course_id: CourseId,
        module_id: Option<ModuleId>,
        title: impl Into<String>,
        max_points: u32,
        order_index: u32,
    ) -> Self {
        Self {
            id: AssignmentId::new(),
            course_id,
            module_id,
            title: title.into(),
            due_date: None,
            max_points,
            order_index,
            published: true,
        }
    }

    /// True if this assignment applies to the given module.
    pub fn applies_to(&self, module_id: ModuleId) -> bool {
        match self.module_id {
            Some(id) => id == module_id,
            None => true,
        }
    }
}
