use std::collections::HashMap;

use crate::model::{Question, QuestionId};
use crate::policy::{CompletionPolicy, QuizCompletionRule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuizState {
    #[default]
    InProgress,
    Completed,
}

/// Emitted once, when the quiz satisfies its completion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizCompleted {
    pub score: usize,
    pub total: usize,
}

/// Per-question result for rendering the answer review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionReview<'a> {
    pub question: &'a Question,
    pub selected: Option<usize>,
    pub is_correct: bool,
}

/// Grades one attempt at a quiz.
///
/// Selections may be changed freely until the completion rule is met; after
/// that the attempt is frozen. A retake is a new `QuizScorer`.
#[derive(Debug, Clone)]
pub struct QuizScorer {
    questions: Vec<Question>,
    selections: HashMap<QuestionId, usize>,
    rule: QuizCompletionRule,
    state: QuizState,
}

impl QuizScorer {
    #[must_use]
    pub fn new(questions: Vec<Question>, policy: &CompletionPolicy) -> Self {
        Self {
            questions,
            selections: HashMap::new(),
            rule: policy.quiz_completion(),
            state: QuizState::InProgress,
        }
    }

    #[must_use]
    pub fn state(&self) -> QuizState {
        self.state
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn selection(&self, question_id: &QuestionId) -> Option<usize> {
        self.selections.get(question_id).copied()
    }

    /// Records (or replaces) the learner's choice for a question.
    ///
    /// Option indices are not range-checked; an out-of-range choice is simply
    /// wrong. Unknown question ids and selections made after completion are
    /// ignored. Returns the completion event on the selection that finishes
    /// the quiz.
    pub fn select(&mut self, question_id: &QuestionId, option: usize) -> Option<QuizCompleted> {
        if self.state == QuizState::Completed {
            return None;
        }
        if !self.questions.iter().any(|q| q.id() == question_id) {
            return None;
        }

        self.selections.insert(question_id.clone(), option);

        if !self.rule_satisfied() {
            return None;
        }

        self.state = QuizState::Completed;
        Some(QuizCompleted {
            score: self.score(),
            total: self.total(),
        })
    }

    /// Number of questions whose selection matches the answer key.
    #[must_use]
    pub fn score(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| self.selection(q.id()).is_some_and(|s| q.is_correct(s)))
            .count()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.selections.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == QuizState::Completed
    }

    pub fn review(&self) -> impl Iterator<Item = QuestionReview<'_>> {
        self.questions.iter().map(|question| {
            let selected = self.selection(question.id());
            QuestionReview {
                question,
                selected,
                is_correct: selected.is_some_and(|s| question.is_correct(s)),
            }
        })
    }

    fn rule_satisfied(&self) -> bool {
        if self.questions.is_empty() {
            return false;
        }
        match self.rule {
            QuizCompletionRule::AllAnswered => self
                .questions
                .iter()
                .all(|q| self.selections.contains_key(q.id())),
            QuizCompletionRule::AllCorrect => self.score() == self.total(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
