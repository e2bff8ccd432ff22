//! Step-by-step runner for the cone contrast test.

use super::model::{AnswerSet, SensitivityProfile, TestQuestion};
use super::questions::standard_questions;
use super::scorer::score;
use crate::error::{OphthalmosError, Result};

/// Walks a user through a question battery one question at a time.
///
/// Scoring is only reachable through [`ConeTest::finish`], which refuses to
/// produce a profile until every question has an answer.
#[derive(Debug, Clone)]
pub struct ConeTest {
    questions: Vec<TestQuestion>,
    answers: AnswerSet,
    step: usize,
}

impl ConeTest {
    /// Creates a runner over the standard nine-question battery.
    pub fn standard() -> Self {
        Self::with_questions(standard_questions())
    }

    pub fn with_questions(questions: Vec<TestQuestion>) -> Self {
        Self {
            questions,
            answers: AnswerSet::new(),
            step: 0,
        }
    }

    pub fn questions(&self) -> &[TestQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Zero-based index of the question on screen.
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn current_question(&self) -> Option<&TestQuestion> {
        self.questions.get(self.step)
    }

    pub fn is_last_step(&self) -> bool {
        self.step + 1 >= self.questions.len()
    }

    /// Percentage of the battery reached, counting the current question.
    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            return 100.0;
        }
        (self.step + 1) as f64 / self.questions.len() as f64 * 100.0
    }

    /// Records `option_index` for the current question.
    pub fn answer(&mut self, option_index: usize) -> Result<()> {
        let question = self
            .current_question()
            .ok_or_else(|| OphthalmosError::invalid_input("the test has no questions"))?;

        if option_index >= question.options.len() {
            return Err(OphthalmosError::invalid_input(format!(
                "option {} does not exist for question '{}'",
                option_index, question.id
            )));
        }

        let id = question.id.clone();
        self.answers.record(id, option_index);
        Ok(())
    }

    pub fn current_answer(&self) -> Option<usize> {
        self.current_question().and_then(|q| self.answers.get(&q.id))
    }

    /// Moves to the next question.
    ///
    /// Returns `Ok(true)` when the current question was the last one, meaning
    /// the caller should [`finish`](Self::finish) the test.
    pub fn advance(&mut self) -> Result<bool> {
        if self.current_answer().is_none() {
            return Err(OphthalmosError::invalid_input(
                "answer the current question before moving on",
            ));
        }
        if self.is_last_step() {
            return Ok(true);
        }
        self.step += 1;
        Ok(false)
    }

    /// Moves back one question; stays on the first one.
    pub fn previous(&mut self) {
        self.step = self.step.saturating_sub(1);
    }

    pub fn is_complete(&self) -> bool {
        self.answers.covers(&self.questions)
    }

    /// Scores the test once every question has an answer.
    pub fn finish(&self) -> Result<SensitivityProfile> {
        if let Some(missing) = self
            .questions
            .iter()
            .find(|q| self.answers.get(&q.id).is_none())
        {
            return Err(OphthalmosError::invalid_input(format!(
                "question '{}' has not been answered",
                missing.id
            )));
        }

        let profile = score(&self.questions, &self.answers);
        tracing::debug!(?profile, "cone test scored");
        Ok(profile)
    }
}

impl Default for ConeTest {
    fn default() -> Self {
        Self::standard()
    }
}
