use std::fmt;

use log::{debug, info, warn};

use study_core::model::{QuestionInstance, QuizSettings, SectionFilter, Step};

use super::generator::QuizSession;
use super::progress::QuizProgress;
use super::state::{QuizPhase, QuizRunState};
use crate::Clock;
use crate::error::QuizError;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// What happened after an answer was submitted.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The answer was right; the queue moved on.
    Correct { credit: f64, completed: bool },
    /// First wrong answer on this question; the answer stays hidden.
    Incorrect { attempts_left: u8 },
    /// Second wrong answer: the answer is revealed and a fresh session started.
    Restarted {
        revealed_answer: String,
        revealed_index: usize,
        attempt_number: u32,
    },
}

//
// ─── MACHINE ───────────────────────────────────────────────────────────────────
//

/// Quiz lifecycle driver.
///
/// Owns the current session and its run state. Callers read through accessors and
/// move the quiz forward with the mutators; an `Err` from any mutator means nothing
/// changed.
pub struct QuizMachine {
    base_seed: u32,
    settings: QuizSettings,
    phase: QuizPhase,
    session: Option<QuizSession>,
    run: QuizRunState,
}

impl QuizMachine {
    #[must_use]
    pub fn new(base_seed: u32, settings: QuizSettings) -> Self {
        Self {
            base_seed,
            settings,
            phase: QuizPhase::NotStarted,
            session: None,
            run: QuizRunState::default(),
        }
    }

    /// Machine whose base seed comes from `clock`.
    #[must_use]
    pub fn with_clock(clock: Clock, settings: QuizSettings) -> Self {
        Self::new(clock.base_seed(), settings)
    }

    #[must_use]
    pub fn base_seed(&self) -> u32 {
        self.base_seed
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn run_state(&self) -> &QuizRunState {
        &self.run
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.run.score()
    }

    #[must_use]
    pub fn q_index(&self) -> usize {
        self.run.q_index()
    }

    #[must_use]
    pub fn attempts(&self) -> u8 {
        self.run.attempts_on_current_question()
    }

    #[must_use]
    pub fn attempt_number(&self) -> u32 {
        self.run.attempt_number()
    }

    /// Number of questions in the current session.
    #[must_use]
    pub fn total(&self) -> usize {
        self.session.as_ref().map_or(0, QuizSession::len)
    }

    /// The question awaiting an answer, if the quiz is in progress.
    #[must_use]
    pub fn current_question(&self) -> Option<&QuestionInstance> {
        if self.phase != QuizPhase::InProgress {
            return None;
        }
        self.session.as_ref()?.question(self.run.q_index())
    }

    /// The active context step of the current question, if any remain.
    #[must_use]
    pub fn current_step(&self) -> Option<&Step> {
        self.current_question()?
            .context_steps()
            .get(self.run.step_index())
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let total = self.total();
        let answered = self.run.q_index().min(total);
        let step_count = self
            .current_question()
            .map_or(0, |q| q.context_steps().len());
        QuizProgress {
            total,
            answered,
            remaining: total - answered,
            step_index: self.run.step_index().min(step_count),
            step_count,
            is_complete: self.phase == QuizPhase::Complete,
        }
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Open section selection.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::WrongPhase` unless the quiz has not started.
    pub fn start(&mut self) -> Result<(), QuizError> {
        self.expect_phase("start", &[QuizPhase::NotStarted])?;
        self.set_phase(QuizPhase::SectionSelect);
        Ok(())
    }

    /// Generate a session for `filter` and begin answering.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` if no template matches `filter`; the quiz
    /// stays in section selection. Returns `QuizError::WrongPhase` outside section
    /// selection and `QuizError::Question` if generation breaks an invariant.
    pub fn begin(&mut self, filter: SectionFilter) -> Result<(), QuizError> {
        self.expect_phase("begin", &[QuizPhase::SectionSelect])?;
        self.load_session(filter, self.run.attempt_number())?;
        Ok(())
    }

    /// Begin with the filter from the settings.
    ///
    /// # Errors
    ///
    /// Same as [`QuizMachine::begin`].
    pub fn begin_default(&mut self) -> Result<(), QuizError> {
        self.begin(self.settings.default_filter())
    }

    /// Answer the current question with the choice at `selection`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` outside a running quiz,
    /// `QuizError::NoSelection` for `None` and `QuizError::InvalidChoice` for an
    /// index past the choice list. None of these change any state.
    pub fn submit_answer(&mut self, selection: Option<usize>) -> Result<SubmitOutcome, QuizError> {
        let question = self.current_question().ok_or(QuizError::NotInProgress)?;
        let index = selection.ok_or(QuizError::NoSelection)?;
        let len = question.final_choices().len();
        if index >= len {
            return Err(QuizError::InvalidChoice { index, len });
        }

        if question.is_correct(index) {
            let credit = self.settings.credit_for(self.run.attempts_on_current_question());
            self.run.record_correct(credit);
            let completed = self.run.q_index() >= self.total();
            debug!(
                "correct answer, score {} after {} questions",
                self.run.score(),
                self.run.q_index()
            );
            if completed {
                self.set_phase(QuizPhase::Complete);
            }
            return Ok(SubmitOutcome::Correct { credit, completed });
        }

        if self.run.attempts_on_current_question() == 0 {
            self.run.record_wrong();
            return Ok(SubmitOutcome::Incorrect { attempts_left: 1 });
        }

        let revealed_answer = question.final_answer().to_owned();
        let revealed_index = question.final_answer_index();
        let template_id = question.template_id();
        let attempt_number = self.regenerate()?;
        warn!("two wrong answers on {template_id}, restarting as attempt {attempt_number}");
        Ok(SubmitOutcome::Restarted {
            revealed_answer,
            revealed_index,
            attempt_number,
        })
    }

    /// Move the walkthrough to the next context step, or to the final question
    /// after the last step.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` outside a running quiz.
    pub fn advance_step(&mut self) -> Result<(), QuizError> {
        let step_count = self
            .current_question()
            .ok_or(QuizError::NotInProgress)?
            .context_steps()
            .len();
        self.run.advance_step(step_count);
        Ok(())
    }

    /// Unscored feedback: whether `index` is the right choice for the active step.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` outside a running quiz,
    /// `QuizError::NoActiveStep` once the walkthrough reached the final question and
    /// `QuizError::InvalidChoice` for an index past the step's choices.
    pub fn check_step(&self, index: usize) -> Result<bool, QuizError> {
        if self.current_question().is_none() {
            return Err(QuizError::NotInProgress);
        }
        let step = self.current_step().ok_or(QuizError::NoActiveStep)?;
        if index >= step.choices.len() {
            return Err(QuizError::InvalidChoice {
                index,
                len: step.choices.len(),
            });
        }
        Ok(step.is_correct(index))
    }

    /// Start over with fresh variants of the same section.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::WrongPhase` unless the quiz is running or complete.
    pub fn restart(&mut self) -> Result<u32, QuizError> {
        self.expect_phase("restart", &[QuizPhase::InProgress, QuizPhase::Complete])?;
        let attempt_number = self.regenerate()?;
        info!("restarted quiz as attempt {attempt_number}");
        Ok(attempt_number)
    }

    /// Try again after finishing.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::WrongPhase` unless the quiz is complete.
    pub fn retry(&mut self) -> Result<u32, QuizError> {
        self.expect_phase("retry", &[QuizPhase::Complete])?;
        let attempt_number = self.regenerate()?;
        info!("retrying quiz as attempt {attempt_number}");
        Ok(attempt_number)
    }

    /// Go back to section selection after finishing.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::WrongPhase` unless the quiz is complete.
    pub fn change_section(&mut self) -> Result<(), QuizError> {
        self.expect_phase("change section", &[QuizPhase::Complete])?;
        self.session = None;
        self.run.reset();
        self.set_phase(QuizPhase::SectionSelect);
        Ok(())
    }

    /// Abandon the quiz from any phase. Progress is dropped; the attempt counter is kept
    /// so the next session gets fresh variants.
    pub fn quit(&mut self) {
        self.session = None;
        self.run.reset();
        self.set_phase(QuizPhase::NotStarted);
    }

    //
    // ─── INTERNALS ─────────────────────────────────────────────────────────────
    //

    fn expect_phase(&self, action: &'static str, allowed: &[QuizPhase]) -> Result<(), QuizError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(QuizError::WrongPhase {
                action,
                phase: self.phase,
            })
        }
    }

    fn set_phase(&mut self, phase: QuizPhase) {
        if self.phase != phase {
            info!("quiz phase {} -> {}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Replace the session for the current filter under the next attempt number.
    fn regenerate(&mut self) -> Result<u32, QuizError> {
        let filter = self
            .session
            .as_ref()
            .map_or(self.settings.default_filter(), QuizSession::section_filter);
        let next = self.run.attempt_number().wrapping_add(1);
        self.load_session(filter, next)?;
        Ok(next)
    }

    /// Install a freshly generated session; leaves everything untouched on error.
    fn load_session(&mut self, filter: SectionFilter, attempt_number: u32) -> Result<(), QuizError> {
        let session = QuizSession::generate(self.base_seed, attempt_number, filter)?;
        if session.is_empty() {
            warn!("no questions available for {filter}");
            return Err(QuizError::NoQuestions { filter });
        }
        self.run.reset();
        self.run.set_attempt_number(attempt_number);
        self.session = Some(session);
        self.set_phase(QuizPhase::InProgress);
        Ok(())
    }
}

impl fmt::Debug for QuizMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizMachine")
            .field("base_seed", &self.base_seed)
            .field("phase", &self.phase)
            .field("total", &self.total())
            .field("run", &self.run)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::model::Section;
    use study_core::time::fixed_clock;

    fn running(filter: SectionFilter) -> QuizMachine {
        let mut machine = QuizMachine::new(2024, QuizSettings::default());
        machine.start().unwrap();
        machine.begin(filter).unwrap();
        machine
    }

    fn wrong_index(machine: &QuizMachine) -> usize {
        let q = machine.current_question().unwrap();
        (q.final_answer_index() + 1) % q.final_choices().len()
    }

    #[test]
    fn phases_follow_lifecycle() {
        let mut machine = QuizMachine::with_clock(fixed_clock(), QuizSettings::default());
        assert_eq!(machine.phase(), QuizPhase::NotStarted);
        assert!(machine.current_question().is_none());
        machine.start().unwrap();
        assert_eq!(machine.phase(), QuizPhase::SectionSelect);
        machine.begin(SectionFilter::Only(Section::Integrated)).unwrap();
        assert_eq!(machine.phase(), QuizPhase::InProgress);
        assert_eq!(machine.total(), 2);
    }

    #[test]
    fn begin_requires_section_select() {
        let mut machine = QuizMachine::new(1, QuizSettings::default());
        let err = machine.begin(SectionFilter::All).unwrap_err();
        assert!(matches!(
            err,
            QuizError::WrongPhase {
                phase: QuizPhase::NotStarted,
                ..
            }
        ));
    }

    #[test]
    fn invalid_choice_changes_nothing() {
        let mut machine = running(SectionFilter::All);
        let before = machine.run_state().clone();
        let err = machine.submit_answer(Some(99)).unwrap_err();
        assert!(matches!(err, QuizError::InvalidChoice { index: 99, .. }));
        assert_eq!(machine.run_state(), &before);
    }

    #[test]
    fn first_wrong_keeps_question() {
        let mut machine = running(SectionFilter::All);
        let id = machine.current_question().unwrap().template_id();
        let outcome = machine.submit_answer(Some(wrong_index(&machine))).unwrap();
        assert_eq!(outcome, SubmitOutcome::Incorrect { attempts_left: 1 });
        assert_eq!(machine.attempts(), 1);
        assert_eq!(machine.current_question().unwrap().template_id(), id);
    }

    #[test]
    fn step_walkthrough_reaches_final_question() {
        let mut machine = running(SectionFilter::All);
        let steps = machine.current_question().unwrap().context_steps().to_vec();
        for step in &steps {
            assert_eq!(machine.current_step(), Some(step));
            assert!(machine.check_step(step.correct_index).unwrap());
            machine.advance_step().unwrap();
        }
        assert!(machine.current_step().is_none());
        assert!(matches!(machine.check_step(0), Err(QuizError::NoActiveStep)));
        machine.advance_step().unwrap();
        assert_eq!(machine.progress().step_index, steps.len());
    }

    #[test]
    fn quit_drops_progress_but_keeps_attempts() {
        let mut machine = running(SectionFilter::All);
        machine.restart().unwrap();
        machine.quit();
        assert_eq!(machine.phase(), QuizPhase::NotStarted);
        assert_eq!(machine.total(), 0);
        assert_eq!(machine.attempt_number(), 1);
    }

    #[test]
    fn change_section_only_after_completion() {
        let mut machine = running(SectionFilter::All);
        assert!(machine.change_section().is_err());
        assert!(machine.retry().is_err());
    }
}
