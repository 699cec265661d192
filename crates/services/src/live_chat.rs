use edu_core::Clock;
use edu_core::model::{ChatMessage, LiveClass, MessageId};
use storage::seed::scripted_chat;
use tracing::debug;

use crate::error::ChatError;

/// Local chat transcript for one live class.
///
/// Messages stay in this process; nothing is broadcast to other viewers.
#[derive(Debug, Clone)]
pub struct LiveChat {
    class: LiveClass,
    clock: Clock,
    messages: Vec<ChatMessage>,
}

impl LiveChat {
    /// Opens the chat with the scripted welcome exchange.
    #[must_use]
    pub fn open(class: LiveClass, clock: Clock) -> Self {
        let messages = scripted_chat(class.instructor(), class.scheduled_at());
        Self {
            class,
            clock,
            messages,
        }
    }

    /// Opens an empty chat.
    #[must_use]
    pub fn empty(class: LiveClass, clock: Clock) -> Self {
        Self {
            class,
            clock,
            messages: Vec::new(),
        }
    }

    #[must_use]
    pub fn class(&self) -> &LiveClass {
        &self.class
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Appends a learner message, trimmed, stamped with the clock's time.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::EmptyMessage` if the body is blank.
    pub fn send(&mut self, author: &str, body: &str) -> Result<&ChatMessage, ChatError> {
        let body = body.trim();
        if body.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let message = ChatMessage::new(
            MessageId::generate(),
            author,
            body,
            self.clock.now(),
            false,
        );
        debug!(class_id = %self.class.id(), message_id = %message.id, "chat message sent");
        let index = self.messages.len();
        self.messages.push(message);
        Ok(&self.messages[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edu_core::model::LiveClassId;
    use edu_core::time::fixed_now;

    fn class() -> LiveClass {
        LiveClass::new(
            LiveClassId::new("live-1"),
            "Mathematics Problem Solving",
            "Teacher Sarah",
            fixed_now(),
            "45 min",
            "Mathematics",
            true,
            None,
        )
        .unwrap()
    }

    #[test]
    fn opens_with_scripted_messages() {
        let chat = LiveChat::open(class(), Clock::fixed(fixed_now()));
        assert_eq!(chat.messages().len(), 4);
        assert_eq!(chat.messages()[0].author, "Teacher Sarah");
    }

    #[test]
    fn send_trims_and_appends() {
        let mut chat = LiveChat::empty(class(), Clock::fixed(fixed_now()));
        let sent = chat.send("You", "  What is a fraction?  ").unwrap();
        assert_eq!(sent.body, "What is a fraction?");
        assert_eq!(sent.sent_at, fixed_now());
        assert!(!sent.is_teacher);
        assert_eq!(chat.messages().len(), 1);
    }

    #[test]
    fn send_returns_the_appended_message() {
        let mut chat = LiveChat::open(class(), Clock::fixed(fixed_now()));
        let sent_id = chat.send("You", "Thank you!").unwrap().id.clone();
        let last = chat.messages().last().unwrap();
        assert_eq!(chat.messages().len(), 5);
        assert_eq!(last.id, sent_id);
        assert_eq!(last.body, "Thank you!");
        assert_eq!(last.author, "You");
    }

    #[test]
    fn blank_messages_are_rejected() {
        let mut chat = LiveChat::empty(class(), Clock::fixed(fixed_now()));
        assert_eq!(chat.send("You", "   ").unwrap_err(), ChatError::EmptyMessage);
        assert!(chat.messages().is_empty());
    }
}
