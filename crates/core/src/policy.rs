use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fraction of a video that counts as "watched" unless configured otherwise.
pub const DEFAULT_WATCH_THRESHOLD: f64 = 0.90;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum PolicyError {
    #[error("watch threshold must be in (0, 1], got {provided}")]
    InvalidWatchThreshold { provided: f64 },
}

//
// ─── QUIZ RULE ─────────────────────────────────────────────────────────────────
//

/// When a quiz counts as finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizCompletionRule {
    /// Every question needs a recorded selection; results are shown afterwards.
    #[default]
    AllAnswered,
    /// Every question needs a correct selection.
    AllCorrect,
}

//
// ─── POLICY ────────────────────────────────────────────────────────────────────
//

/// Business rules that decide when a module counts as complete.
///
/// Deserializes from a TOML table such as:
///
/// ```toml
/// watch_threshold = 0.9
/// quiz_completion = "all_answered"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPolicy")]
pub struct CompletionPolicy {
    watch_threshold: f64,
    quiz_completion: QuizCompletionRule,
}

impl CompletionPolicy {
    /// Creates a custom policy.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::InvalidWatchThreshold` unless the threshold is a
    /// finite value in `(0, 1]`.
    pub fn new(
        watch_threshold: f64,
        quiz_completion: QuizCompletionRule,
    ) -> Result<Self, PolicyError> {
        if !watch_threshold.is_finite() || watch_threshold <= 0.0 || watch_threshold > 1.0 {
            return Err(PolicyError::InvalidWatchThreshold {
                provided: watch_threshold,
            });
        }
        Ok(Self {
            watch_threshold,
            quiz_completion,
        })
    }

    #[must_use]
    pub fn watch_threshold(&self) -> f64 {
        self.watch_threshold
    }

    #[must_use]
    pub fn quiz_completion(&self) -> QuizCompletionRule {
        self.quiz_completion
    }
}

impl Default for CompletionPolicy {
    fn default() -> Self {
        Self {
            watch_threshold: DEFAULT_WATCH_THRESHOLD,
            quiz_completion: QuizCompletionRule::AllAnswered,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawPolicy {
    watch_threshold: f64,
    quiz_completion: QuizCompletionRule,
}

impl Default for RawPolicy {
    fn default() -> Self {
        let policy = CompletionPolicy::default();
        Self {
            watch_threshold: policy.watch_threshold,
            quiz_completion: policy.quiz_completion,
        }
    }
}

impl TryFrom<RawPolicy> for CompletionPolicy {
    type Error = PolicyError;

    fn try_from(raw: RawPolicy) -> Result<Self, Self::Error> {
        Self::new(raw.watch_threshold, raw.quiz_completion)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_uses_ninety_percent() {
        let policy = CompletionPolicy::default();
        assert!((policy.watch_threshold() - 0.90).abs() < f64::EPSILON);
        assert_eq!(policy.quiz_completion(), QuizCompletionRule::AllAnswered);
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        for bad in [0.0, -0.5, 1.01, f64::NAN, f64::INFINITY] {
            let err = CompletionPolicy::new(bad, QuizCompletionRule::AllAnswered);
            assert!(matches!(err, Err(PolicyError::InvalidWatchThreshold { .. })));
        }
        assert!(CompletionPolicy::new(1.0, QuizCompletionRule::AllCorrect).is_ok());
    }

    #[test]
    fn deserializes_from_toml_with_defaults() {
        let policy: CompletionPolicy = toml::from_str("watch_threshold = 0.75").unwrap();
        assert!((policy.watch_threshold() - 0.75).abs() < f64::EPSILON);
        assert_eq!(policy.quiz_completion(), QuizCompletionRule::AllAnswered);

        let policy: CompletionPolicy = toml::from_str("quiz_completion = \"all_correct\"").unwrap();
        assert_eq!(policy.quiz_completion(), QuizCompletionRule::AllCorrect);
    }

    #[test]
    fn toml_with_invalid_threshold_fails() {
        let result = toml::from_str::<CompletionPolicy>("watch_threshold = 2.0");
        assert!(result.is_err());
    }
}
