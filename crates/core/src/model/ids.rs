use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a free-form string identifier newtype.
///
/// Identifiers are opaque: construction never validates, so callers may track
/// ids that do not (yet) exist in any catalog. Only `FromStr` rejects blank
/// input, since that path parses user-supplied text.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(ParseIdError {
                        kind: stringify!($name).to_string(),
                    });
                }
                Ok(Self::new(trimmed))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

string_id!(
    /// Unique identifier for a Course
    CourseId
);

string_id!(
    /// Unique identifier for a Module within a course
    ModuleId
);

string_id!(
    /// Unique identifier for a quiz Question
    QuestionId
);

string_id!(
    /// Unique identifier for a Live class
    LiveClassId
);

string_id!(
    /// Unique identifier for a chat message
    MessageId
);

impl MessageId {
    /// Generates a fresh random message id.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

// ─── Parse Errors ──────────────────────────────────────────────────────────────

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_id_display() {
        let id = ModuleId::new("1-2");
        assert_eq!(id.to_string(), "1-2");
    }

    #[test]
    fn test_course_id_from_str_trims() {
        let id: CourseId = "  1 ".parse().unwrap();
        assert_eq!(id, CourseId::new("1"));
    }

    #[test]
    fn test_question_id_from_str_blank_is_err() {
        let result = "   ".parse::<QuestionId>();
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "failed to parse QuestionId from string"
        );
    }

    #[test]
    fn test_debug_names_the_kind() {
        let id = LiveClassId::new("live-1");
        assert_eq!(format!("{id:?}"), "LiveClassId(\"live-1\")");
    }

    #[test]
    fn test_generated_message_ids_differ() {
        assert_ne!(MessageId::generate(), MessageId::generate());
    }
}
