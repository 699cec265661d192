mod course;
mod ids;
mod live_class;
mod media;
mod module;
mod question;

pub use ids::{CourseId, LiveClassId, MessageId, ModuleId, ParseIdError, QuestionId};
pub use media::{MediaValidationError, VideoLocator};

pub use course::{Course, CourseError, CourseLevel, CourseMeta};
pub use live_class::{ChatMessage, LiveClass, LiveClassError};
pub use module::{Module, ModuleContent, ModuleError, ModuleKind};
pub use question::{Question, QuestionError};
