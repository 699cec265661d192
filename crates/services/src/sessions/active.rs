use edu_core::CompletionPolicy;
use edu_core::model::{Module, ModuleContent};
use edu_core::playback::VideoWatchMonitor;
use edu_core::quiz::QuizScorer;

/// Viewer state for the module currently on screen.
///
/// A fresh viewer is built every time a different module is selected, so
/// playback position and quiz selections never leak between modules.
#[derive(Debug, Clone)]
pub(crate) enum ActiveViewer {
    Reading,
    Video(VideoWatchMonitor),
    Quiz(QuizScorer),
}

impl ActiveViewer {
    pub(crate) fn for_module(module: &Module, policy: &CompletionPolicy) -> Self {
        match module.content() {
            ModuleContent::Reading { .. } => Self::Reading,
            ModuleContent::Video { .. } => Self::Video(VideoWatchMonitor::new(policy)),
            ModuleContent::Quiz { questions } => {
                Self::Quiz(QuizScorer::new(questions.clone(), policy))
            }
        }
    }
}
