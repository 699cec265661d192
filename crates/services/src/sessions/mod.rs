mod active;
mod service;
mod view;

// Public API of the course session subsystem.
pub use crate::error::SessionError;
pub use service::CourseSession;
pub use view::{CompletionSource, ModuleCompleted, ModuleStatus};
