use chrono::{DateTime, Duration, Utc};

/// Where `LiveChat` gets the send time of a learner message.
///
/// `Fixed` pins every message to one instant; `advance` steps it forward to
/// script a conversation minute by minute.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Steps a fixed clock forward. A system clock already moves.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

/// 2023-11-14T22:13:20Z, the instant test chats and sessions are pinned to.
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// `FIXED_TEST_TIMESTAMP` as a UTC datetime.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances() {
        let mut clock = Clock::fixed(fixed_now());
        clock.advance(Duration::minutes(5));
        assert_eq!(clock.now(), fixed_now() + Duration::minutes(5));
    }

    #[test]
    fn fixed_clock_scripts_minute_labels() {
        let mut clock = Clock::fixed(fixed_now());
        let first = clock.now().format("%H:%M").to_string();
        clock.advance(Duration::minutes(1));
        let second = clock.now().format("%H:%M").to_string();
        assert_eq!(first, "22:13");
        assert_eq!(second, "22:14");
    }

    #[test]
    fn system_clock_ignores_advance() {
        let mut clock = Clock::system();
        clock.advance(Duration::days(365));
        assert!(clock.now() < Utc::now() + Duration::days(1));
    }
}
