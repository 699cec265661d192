use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::{LiveClassId, MessageId};
use crate::model::media::VideoLocator;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LiveClassError {
    #[error("live class title cannot be empty")]
    EmptyTitle,

    #[error("live class instructor cannot be empty")]
    EmptyInstructor,
}

/// A scheduled (or currently running) live class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveClass {
    id: LiveClassId,
    title: String,
    instructor: String,
    scheduled_at: DateTime<Utc>,
    duration: String,
    subject: String,
    is_live: bool,
    stream: Option<VideoLocator>,
}

impl LiveClass {
    /// # Errors
    ///
    /// Returns `LiveClassError` when the title or instructor is blank.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: LiveClassId,
        title: impl Into<String>,
        instructor: impl Into<String>,
        scheduled_at: DateTime<Utc>,
        duration: impl Into<String>,
        subject: impl Into<String>,
        is_live: bool,
        stream: Option<VideoLocator>,
    ) -> Result<Self, LiveClassError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(LiveClassError::EmptyTitle);
        }
        let instructor = instructor.into();
        if instructor.trim().is_empty() {
            return Err(LiveClassError::EmptyInstructor);
        }

        Ok(Self {
            id,
            title: title.trim().to_owned(),
            instructor: instructor.trim().to_owned(),
            scheduled_at,
            duration: duration.into(),
            subject: subject.into(),
            is_live,
            stream,
        })
    }

    #[must_use]
    pub fn id(&self) -> &LiveClassId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn instructor(&self) -> &str {
        &self.instructor
    }

    #[must_use]
    pub fn scheduled_at(&self) -> DateTime<Utc> {
        self.scheduled_at
    }

    #[must_use]
    pub fn duration(&self) -> &str {
        &self.duration
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.is_live
    }

    #[must_use]
    pub fn stream(&self) -> Option<&VideoLocator> {
        self.stream.as_ref()
    }
}

/// One line of a live-class chat transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub author: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub is_teacher: bool,
}

impl ChatMessage {
    #[must_use]
    pub fn new(
        id: MessageId,
        author: impl Into<String>,
        body: impl Into<String>,
        sent_at: DateTime<Utc>,
        is_teacher: bool,
    ) -> Self {
        Self {
            id,
            author: author.into(),
            body: body.into(),
            sent_at,
            is_teacher,
        }
    }

    /// Wall-clock label in `HH:MM` form.
    #[must_use]
    pub fn time_label(&self) -> String {
        self.sent_at.format("%H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn live_class_requires_instructor() {
        let err = LiveClass::new(
            LiveClassId::new("live-1"),
            "Mathematics Problem Solving",
            " ",
            fixed_now(),
            "45 min",
            "Mathematics",
            true,
            None,
        )
        .unwrap_err();
        assert_eq!(err, LiveClassError::EmptyInstructor);
    }

    #[test]
    fn chat_message_time_label() {
        let msg = ChatMessage::new(MessageId::new("1"), "Student A", "hi", fixed_now(), false);
        // 2023-11-14T22:13:20Z
        assert_eq!(msg.time_label(), "22:13");
    }
}
