use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{CourseId, ModuleId};
use crate::model::module::Module;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course title cannot be empty")]
    EmptyTitle,

    #[error("module ids must be unique within a course, `{0}` repeats")]
    DuplicateModule(String),

    #[error("unknown course level: {0}")]
    UnknownLevel(String),
}

//
// ─── LEVEL ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CourseLevel::Beginner => "Beginner",
            CourseLevel::Intermediate => "Intermediate",
            CourseLevel::Advanced => "Advanced",
        };
        f.write_str(label)
    }
}

impl FromStr for CourseLevel {
    type Err = CourseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(CourseError::UnknownLevel(s.to_string())),
        }
    }
}

//
// ─── DISPLAY METADATA ──────────────────────────────────────────────────────────
//

/// Presentation-only metadata shown on catalog cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseMeta {
    pub duration: String,
    pub level: CourseLevel,
    pub thumbnail: Option<String>,
}

//
// ─── COURSE ────────────────────────────────────────────────────────────────────
//

/// A course with a fixed, ordered list of modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    title: String,
    description: String,
    modules: Vec<Module>,
    meta: CourseMeta,
}

impl Course {
    /// Creates a course. Module order is preserved as given.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::EmptyTitle` for a blank title and
    /// `CourseError::DuplicateModule` when two modules share an id.
    pub fn new(
        id: CourseId,
        title: impl Into<String>,
        description: impl Into<String>,
        modules: Vec<Module>,
        meta: CourseMeta,
    ) -> Result<Self, CourseError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CourseError::EmptyTitle);
        }

        let mut seen = std::collections::HashSet::new();
        for module in &modules {
            if !seen.insert(module.id()) {
                return Err(CourseError::DuplicateModule(module.id().to_string()));
            }
        }

        Ok(Self {
            id,
            title: title.trim().to_owned(),
            description: description.into().trim().to_owned(),
            modules,
            meta,
        })
    }

    #[must_use]
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    #[must_use]
    pub fn module(&self, id: &ModuleId) -> Option<&Module> {
        self.modules.iter().find(|m| m.id() == id)
    }

    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn meta(&self) -> &CourseMeta {
        &self.meta
    }

    #[must_use]
    pub fn level(&self) -> CourseLevel {
        self.meta.level
    }

    /// Case-insensitive substring match over title and description. The
    /// query is used as typed, so an empty query matches every course.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
