#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod playback;
pub mod policy;
pub mod progress;
pub mod quiz;
pub mod summary;
pub mod time;

pub use error::Error;
pub use policy::{CompletionPolicy, QuizCompletionRule};
pub use time::Clock;
