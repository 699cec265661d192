//! Study summaries for reading material.
//!
//! [`Summarizer`] is the seam for a real summarization backend.
//! [`KeyPointSummarizer`] is a cheap placeholder that picks sentences by
//! keyword and position.

const KEYWORDS: [&str; 6] = [
    "important",
    "key",
    "fundamental",
    "essential",
    "remember",
    "note",
];

const MAX_POINTS: usize = 5;
const MIN_POINT_LEN: usize = 10;

const QUICK_REVIEW: &str = "This content covers the fundamental concepts that are essential \
for understanding the topic. Focus on practicing the examples and remember the key definitions \
mentioned above.";

/// A generated summary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Summary {
    pub key_points: Vec<String>,
}

impl Summary {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key_points.is_empty()
    }

    /// Markdown block shown to the learner.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let points = self
            .key_points
            .iter()
            .enumerate()
            .map(|(i, point)| format!("{}. {point}", i + 1))
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("## Key Points Summary:\n\n{points}\n\n## Quick Review:\n{QUICK_REVIEW}")
    }
}

pub trait Summarizer {
    fn summarize(&self, content: &str) -> Summary;
}

/// Keyword and position heuristic; no model involved.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyPointSummarizer;

impl Summarizer for KeyPointSummarizer {
    fn summarize(&self, content: &str) -> Summary {
        let sentences: Vec<&str> = content
            .split(['.', '!', '?'])
            .filter(|s| !s.trim().is_empty())
            .collect();
        let last = sentences.len().saturating_sub(1);

        let key_points = sentences
            .iter()
            .enumerate()
            .filter(|(index, sentence)| {
                let lower = sentence.to_lowercase();
                let has_keyword = KEYWORDS.iter().any(|word| lower.contains(word));
                let is_edge = *index == 0 || *index == last;
                let is_header = sentence.contains('#') || sentence.contains("**");
                has_keyword || is_edge || is_header || index % 3 == 0
            })
            .take(MAX_POINTS)
            .map(|(_, sentence)| sentence.trim())
            .filter(|sentence| sentence.chars().count() > MIN_POINT_LEN)
            .map(clean_markup)
            .collect();

        Summary { key_points }
    }
}

/// Drops the first run of `#` (plus trailing whitespace) and every `**`.
fn clean_markup(sentence: &str) -> String {
    let without_header = match sentence.find('#') {
        Some(start) => {
            let rest = sentence[start..].trim_start_matches('#').trim_start();
            format!("{}{rest}", &sentence[..start])
        }
        None => sentence.to_string(),
    };
    without_header.replace("**", "")
}
