use std::fmt;

use thiserror::Error;

use crate::model::ids::ModuleId;
use crate::model::media::VideoLocator;
use crate::model::question::Question;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModuleError {
    #[error("module title cannot be empty")]
    EmptyTitle,

    #[error("quiz module must contain at least one question")]
    EmptyQuiz,

    #[error("quiz question ids must be unique, `{0}` repeats")]
    DuplicateQuestion(String),
}

//
// ─── KIND & CONTENT ────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    Reading,
    Video,
    Quiz,
}

impl ModuleKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleKind::Reading => "reading",
            ModuleKind::Video => "video",
            ModuleKind::Quiz => "quiz",
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific payload. A video always has a locator and a quiz always has
/// questions, so the invariants live in the type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleContent {
    Reading { body: String },
    Video { locator: VideoLocator },
    Quiz { questions: Vec<Question> },
}

impl ModuleContent {
    #[must_use]
    pub fn kind(&self) -> ModuleKind {
        match self {
            ModuleContent::Reading { .. } => ModuleKind::Reading,
            ModuleContent::Video { .. } => ModuleKind::Video,
            ModuleContent::Quiz { .. } => ModuleKind::Quiz,
        }
    }
}

//
// ─── MODULE ────────────────────────────────────────────────────────────────────
//

/// One unit of course content.
///
/// Completion is not stored here; it is derived from the session's
/// `ProgressTracker`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    id: ModuleId,
    title: String,
    summary: Option<String>,
    content: ModuleContent,
    duration: Option<String>,
}

impl Module {
    /// Creates a validated module.
    ///
    /// # Errors
    ///
    /// Returns `ModuleError::EmptyTitle` for a blank title, `ModuleError::EmptyQuiz`
    /// for a quiz without questions, and `ModuleError::DuplicateQuestion` when two
    /// questions share an id.
    pub fn new(
        id: ModuleId,
        title: impl Into<String>,
        summary: Option<String>,
        content: ModuleContent,
        duration: Option<String>,
    ) -> Result<Self, ModuleError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ModuleError::EmptyTitle);
        }

        if let ModuleContent::Quiz { questions } = &content {
            if questions.is_empty() {
                return Err(ModuleError::EmptyQuiz);
            }
            let mut seen = std::collections::HashSet::new();
            for q in questions {
                if !seen.insert(q.id()) {
                    return Err(ModuleError::DuplicateQuestion(q.id().to_string()));
                }
            }
        }

        Ok(Self {
            id,
            title: title.trim().to_owned(),
            summary: normalize_optional(summary),
            content,
            duration: normalize_optional(duration),
        })
    }

    #[must_use]
    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// One-line description shown under the module title.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    #[must_use]
    pub fn content(&self) -> &ModuleContent {
        &self.content
    }

    #[must_use]
    pub fn kind(&self) -> ModuleKind {
        self.content.kind()
    }

    /// Display label such as "15 min".
    #[must_use]
    pub fn duration(&self) -> Option<&str> {
        self.duration.as_deref()
    }

    #[must_use]
    pub fn questions(&self) -> Option<&[Question]> {
        match &self.content {
            ModuleContent::Quiz { questions } => Some(questions),
            _ => None,
        }
    }

    #[must_use]
    pub fn video_locator(&self) -> Option<&VideoLocator> {
        match &self.content {
            ModuleContent::Video { locator } => Some(locator),
            _ => None,
        }
    }

    #[must_use]
    pub fn reading_body(&self) -> Option<&str> {
        match &self.content {
            ModuleContent::Reading { body } => Some(body),
            _ => None,
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
