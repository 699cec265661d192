use edu_core::model::{ModuleId, ModuleKind};
use edu_core::playback::WatchCompleted;
use edu_core::quiz::QuizCompleted;

/// Sidebar row: one module and whether it is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleStatus {
    pub id: ModuleId,
    pub title: String,
    pub kind: ModuleKind,
    pub duration: Option<String>,
    pub completed: bool,
    pub active: bool,
}

/// What finished a module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompletionSource {
    /// The learner pressed "mark as complete" on a reading.
    Reading,
    Video(WatchCompleted),
    Quiz(QuizCompleted),
}

/// A completion event after it has been applied to the session's progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleCompleted {
    pub module_id: ModuleId,
    pub source: CompletionSource,
    /// `false` when the module had already been completed earlier.
    pub newly_completed: bool,
    pub percent_complete: f64,
}
