//! Lesson model - the primary unit of course content.

use serde::{Deserialize, Serialize};
use crate::id::{LessonId, ModuleId};

/// A lesson inside a module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    /// Unique identifier
    pub id: LessonId,

    /// Owning module
    pub module_id: ModuleId,

    /// Lesson title
    pub title: String,

    /// Kind of content delivered
    pub content_type: ContentType,

    /// Position among the module's lessons (unique within the module)
    pub order_index: u32,

    /// Estimated duration in minutes, if known
    pub duration_minutes: Option<u32>,
}

impl Lesson {
    /// Create a lesson at the given position.
    pub fn new(
        module_id: ModuleId,
        title: impl Into<String>,
        content_type: ContentType,
        order_index: u32,
    ) -> Self {
        Self {
            id: LessonId::new(),
            module_id,
            title: title.into(),
            content_type,
            order_index,
            duration_minutes: None,
        }
    }
}

/// Kinds of lesson content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// Video lecture
    Video,
    /// Written text / article
    Text,
    /// Audio recording
    Audio,
    /// Interactive exercise embedded in the lesson
    Interactive,
}

impl ContentType {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Video => "video",
            ContentType::Text => "text",
            ContentType::Audio => "audio",
            ContentType::Interactive => "interactive",
        }
    }
}
