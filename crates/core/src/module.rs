//! Module model - a titled section of a course.

use serde::{Deserialize, Serialize};
use crate::id::{CourseId, ModuleId};

/// A module groups lessons, quizzes and assignments within a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// Unique identifier
    pub id: ModuleId,

    /// Owning course
    pub course_id: CourseId,

    /// Module title
    pub title: String,

    /// Detailed description
    pub description: String,

    /// Position among the course's modules
    pub order_index: u32,
}

impl Module {
    /// Create a module with the next free position in a course.
    pub fn new(course_id: CourseId, title: impl Into<String>, order_index: u32) -> Self {
        Self {
            id: ModuleId::new(),
            course_id,
            title: title.into(),
            description: String::new(),
            order_index,
        }
    }
}
