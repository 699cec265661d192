use thiserror::Error;

use crate::model::{CourseError, LiveClassError, MediaValidationError, ModuleError, QuestionError};
use crate::policy::PolicyError;

/// Any domain validation failure raised while building courses or policies.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Media(#[from] MediaValidationError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Module(#[from] ModuleError),
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    LiveClass(#[from] LiveClassError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
}
