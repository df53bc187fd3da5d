use std::fmt;

use serde::Serialize;

/// Where the quiz is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizPhase {
    #[default]
    NotStarted,
    SectionSelect,
    InProgress,
    Complete,
}

impl QuizPhase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuizPhase::NotStarted => "not started",
            QuizPhase::SectionSelect => "selecting a section",
            QuizPhase::InProgress => "in progress",
            QuizPhase::Complete => "complete",
        }
    }
}

impl fmt::Display for QuizPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable run state owned by the quiz machine.
///
/// `q_index` only moves forward within a session; every restart zeroes it together
/// with the score, the attempt counter and the step cursor.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct QuizRunState {
    q_index: usize,
    attempts_on_current_question: u8,
    score: f64,
    attempt_number: u32,
    step_index: usize,
}

impl QuizRunState {
    #[must_use]
    pub fn q_index(&self) -> usize {
        self.q_index
    }

    /// Wrong answers already given on the current question (0 or 1).
    #[must_use]
    pub fn attempts_on_current_question(&self) -> u8 {
        self.attempts_on_current_question
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub fn attempt_number(&self) -> u32 {
        self.attempt_number
    }

    /// Index of the active context step of the current question.
    #[must_use]
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Fresh run for a newly generated session.
    pub(crate) fn reset(&mut self) {
        self.q_index = 0;
        self.attempts_on_current_question = 0;
        self.score = 0.0;
        self.step_index = 0;
    }

    pub(crate) fn set_attempt_number(&mut self, attempt_number: u32) {
        self.attempt_number = attempt_number;
    }

    pub(crate) fn record_correct(&mut self, credit: f64) {
        self.score += credit;
        self.attempts_on_current_question = 0;
        self.q_index += 1;
        self.step_index = 0;
    }

    pub(crate) fn record_wrong(&mut self) {
        self.attempts_on_current_question = 1;
    }

    pub(crate) fn advance_step(&mut self, step_count: usize) {
        self.step_index = (self.step_index + 1).min(step_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_answer_moves_forward_and_clears_attempts() {
        let mut state = QuizRunState::default();
        state.record_wrong();
        state.advance_step(2);
        state.record_correct(0.5);
        assert_eq!(state.q_index(), 1);
        assert_eq!(state.attempts_on_current_question(), 0);
        assert_eq!(state.step_index(), 0);
        assert!((state.score() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn reset_keeps_attempt_number() {
        let mut state = QuizRunState::default();
        state.record_correct(1.0);
        state.set_attempt_number(1);
        state.reset();
        assert_eq!(state.q_index(), 0);
        assert_eq!(state.score(), 0.0);
        assert_eq!(state.attempt_number(), 1);
    }

    #[test]
    fn step_cursor_saturates_at_final_question() {
        let mut state = QuizRunState::default();
        for _ in 0..5 {
            state.advance_step(2);
        }
        assert_eq!(state.step_index(), 2);
    }

    #[test]
    fn phase_names_read_naturally() {
        assert_eq!(QuizPhase::SectionSelect.to_string(), "selecting a section");
        assert_eq!(QuizPhase::default(), QuizPhase::NotStarted);
    }
}
