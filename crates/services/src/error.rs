//! Shared error types for the services crate.

use thiserror::Error;

use edu_core::model::{CourseId, LiveClassId, ModuleId, ModuleKind};
use storage::StorageError;

/// Errors emitted by `CourseSession`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("course has no modules")]
    NoActiveModule,
    #[error("module `{0}` is not part of this course")]
    UnknownModule(ModuleId),
    #[error("active module is a {actual} module, expected {expected}")]
    WrongModuleKind {
        expected: ModuleKind,
        actual: ModuleKind,
    },
}

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("course `{0}` not found")]
    CourseNotFound(CourseId),
    #[error("live class `{0}` not found")]
    LiveClassNotFound(LiveClassId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `LiveChat`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChatError {
    #[error("chat message cannot be empty")]
    EmptyMessage,
}
