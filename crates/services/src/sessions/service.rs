use std::fmt;

use edu_core::CompletionPolicy;
use edu_core::model::{Course, Module, ModuleId, ModuleKind, QuestionId};
use edu_core::playback::VideoWatchMonitor;
use edu_core::progress::{ProgressSnapshot, ProgressTracker};
use edu_core::quiz::QuizScorer;
use edu_core::summary::{Summarizer, Summary};
use tracing::{debug, info};

use super::active::ActiveViewer;
use super::view::{CompletionSource, ModuleCompleted, ModuleStatus};
use crate::error::SessionError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One learner working through one course.
///
/// Owns the progress for the session and the viewer state of the module on
/// screen. Completion events from the reading button, the video monitor and
/// the quiz scorer are all routed into the same `ProgressTracker`. Dropping the
/// session discards its progress.
pub struct CourseSession {
    course: Course,
    policy: CompletionPolicy,
    progress: ProgressTracker,
    active: Option<(usize, ActiveViewer)>,
}

impl CourseSession {
    /// Starts a session with the first module active.
    #[must_use]
    pub fn start(course: Course, policy: CompletionPolicy) -> Self {
        let progress = ProgressTracker::for_course(&course);
        let active = course
            .modules()
            .first()
            .map(|module| (0, ActiveViewer::for_module(module, &policy)));

        info!(
            course_id = %course.id(),
            modules = course.module_count(),
            "course session started"
        );

        Self {
            course,
            policy,
            progress,
            active,
        }
    }

    #[must_use]
    pub fn course(&self) -> &Course {
        &self.course
    }

    #[must_use]
    pub fn policy(&self) -> &CompletionPolicy {
        &self.policy
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.progress.snapshot()
    }

    #[must_use]
    pub fn percent_complete(&self) -> f64 {
        self.progress.percent_complete()
    }

    #[must_use]
    pub fn is_complete(&self, module_id: &ModuleId) -> bool {
        self.progress.is_complete(module_id)
    }

    #[must_use]
    pub fn active_module(&self) -> Option<&Module> {
        self.active
            .as_ref()
            .and_then(|(index, _)| self.course.modules().get(*index))
    }

    /// Switches the active module.
    ///
    /// Selecting a different module starts it with fresh viewer state;
    /// re-selecting the active module keeps its state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownModule` if the course has no such module.
    pub fn select_module(&mut self, module_id: &ModuleId) -> Result<&Module, SessionError> {
        let index = self
            .course
            .modules()
            .iter()
            .position(|m| m.id() == module_id)
            .ok_or_else(|| SessionError::UnknownModule(module_id.clone()))?;

        let module = &self.course.modules()[index];
        if self.active.as_ref().map(|(i, _)| *i) != Some(index) {
            debug!(module_id = %module_id, kind = %module.kind(), "module selected");
            self.active = Some((index, ActiveViewer::for_module(module, &self.policy)));
        }

        Ok(module)
    }

    /// The learner's "mark as complete" action on a reading module.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongModuleKind` unless a reading module is active.
    pub fn mark_reading_complete(&mut self) -> Result<ModuleCompleted, SessionError> {
        let module_id = self.active_id_of_kind(ModuleKind::Reading)?;
        Ok(self.record_completion(module_id, CompletionSource::Reading))
    }

    /// Summarizes the active reading module.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongModuleKind` unless a reading module is active.
    pub fn summarize_reading(&self, summarizer: &dyn Summarizer) -> Result<Summary, SessionError> {
        let module = self.active_module().ok_or(SessionError::NoActiveModule)?;
        match module.reading_body() {
            Some(body) => Ok(summarizer.summarize(body)),
            None => Err(SessionError::WrongModuleKind {
                expected: ModuleKind::Reading,
                actual: module.kind(),
            }),
        }
    }

    // ─── Video ────────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns `SessionError::WrongModuleKind` unless a video module is active.
    pub fn video(&self) -> Result<&VideoWatchMonitor, SessionError> {
        match &self.active {
            None => Err(SessionError::NoActiveModule),
            Some((_, ActiveViewer::Video(monitor))) => Ok(monitor),
            Some((index, _)) => Err(wrong_kind(&self.course, *index, ModuleKind::Video)),
        }
    }

    /// Transport, volume and fullscreen controls of the active video.
    ///
    /// Position ticks should go through [`CourseSession::video_position`] so
    /// that completion reaches the progress tracker.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongModuleKind` unless a video module is active.
    pub fn video_mut(&mut self) -> Result<&mut VideoWatchMonitor, SessionError> {
        match self.active.as_mut() {
            None => Err(SessionError::NoActiveModule),
            Some((_, ActiveViewer::Video(monitor))) => Ok(monitor),
            Some((index, _)) => Err(wrong_kind(&self.course, *index, ModuleKind::Video)),
        }
    }

    /// Feeds a playback-position tick to the active video.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongModuleKind` unless a video module is active.
    pub fn video_position(
        &mut self,
        position: f64,
    ) -> Result<Option<ModuleCompleted>, SessionError> {
        let module_id = self.active_id_of_kind(ModuleKind::Video)?;
        let event = self.video_mut()?.on_position(position);
        Ok(event.map(|watched| self.record_completion(module_id, CompletionSource::Video(watched))))
    }

    // ─── Quiz ─────────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns `SessionError::WrongModuleKind` unless a quiz module is active.
    pub fn quiz(&self) -> Result<&QuizScorer, SessionError> {
        match &self.active {
            None => Err(SessionError::NoActiveModule),
            Some((_, ActiveViewer::Quiz(scorer))) => Ok(scorer),
            Some((index, _)) => Err(wrong_kind(&self.course, *index, ModuleKind::Quiz)),
        }
    }

    /// Records an answer in the active quiz.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongModuleKind` unless a quiz module is active.
    pub fn answer(
        &mut self,
        question_id: &QuestionId,
        option: usize,
    ) -> Result<Option<ModuleCompleted>, SessionError> {
        let module_id = self.active_id_of_kind(ModuleKind::Quiz)?;
        let event = match self.active.as_mut() {
            Some((_, ActiveViewer::Quiz(scorer))) => scorer.select(question_id, option),
            _ => None,
        };
        Ok(event.map(|graded| self.record_completion(module_id, CompletionSource::Quiz(graded))))
    }

    /// Discards the current attempt and starts a fresh one. Completion already
    /// recorded for the module is kept.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongModuleKind` unless a quiz module is active.
    pub fn retake_quiz(&mut self) -> Result<(), SessionError> {
        let module_id = self.active_id_of_kind(ModuleKind::Quiz)?;
        if let Some((index, viewer)) = self.active.as_mut() {
            *viewer = ActiveViewer::for_module(&self.course.modules()[*index], &self.policy);
        }
        debug!(module_id = %module_id, "quiz retake started");
        Ok(())
    }

    // ─── Views ────────────────────────────────────────────────────────────────

    /// One row per module, in course order.
    #[must_use]
    pub fn module_statuses(&self) -> Vec<ModuleStatus> {
        let active = self.active.as_ref().map(|(i, _)| *i);
        self.course
            .modules()
            .iter()
            .enumerate()
            .map(|(index, module)| ModuleStatus {
                id: module.id().clone(),
                title: module.title().to_string(),
                kind: module.kind(),
                duration: module.duration().map(str::to_string),
                completed: self.progress.is_complete(module.id()),
                active: active == Some(index),
            })
            .collect()
    }

    // ─── Internals ────────────────────────────────────────────────────────────

    fn active_id_of_kind(&self, expected: ModuleKind) -> Result<ModuleId, SessionError> {
        let module = self.active_module().ok_or(SessionError::NoActiveModule)?;
        if module.kind() != expected {
            return Err(SessionError::WrongModuleKind {
                expected,
                actual: module.kind(),
            });
        }
        Ok(module.id().clone())
    }

    fn record_completion(
        &mut self,
        module_id: ModuleId,
        source: CompletionSource,
    ) -> ModuleCompleted {
        let newly_completed = self.progress.mark_complete(module_id.clone());
        let percent_complete = self.progress.percent_complete();

        if newly_completed {
            info!(
                course_id = %self.course.id(),
                module_id = %module_id,
                percent = percent_complete,
                "module completed"
            );
        } else {
            debug!(module_id = %module_id, "module already completed");
        }

        ModuleCompleted {
            module_id,
            source,
            newly_completed,
            percent_complete,
        }
    }
}

fn wrong_kind(course: &Course, index: usize, expected: ModuleKind) -> SessionError {
    match course.modules().get(index) {
        Some(module) => SessionError::WrongModuleKind {
            expected,
            actual: module.kind(),
        },
        None => SessionError::NoActiveModule,
    }
}

impl fmt::Debug for CourseSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CourseSession")
            .field("course_id", self.course.id())
            .field("modules", &self.course.module_count())
            .field("completed", &self.progress.completed_count())
            .field("active", &self.active.as_ref().map(|(i, _)| *i))
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
