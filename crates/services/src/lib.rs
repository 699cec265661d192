#![forbid(unsafe_code)]

pub mod catalog_service;
pub mod error;
pub mod live_chat;
pub mod sessions;

pub use edu_core::Clock;

pub use catalog_service::{CatalogService, DEFAULT_UPCOMING_LIMIT};
pub use error::{CatalogError, ChatError, SessionError};
pub use live_chat::LiveChat;
pub use sessions::{CompletionSource, CourseSession, ModuleCompleted, ModuleStatus};
