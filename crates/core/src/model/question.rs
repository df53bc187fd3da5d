use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::choices::ChoiceSet;
use crate::model::ids::{Section, TemplateId};

/// Number of final choices a question may present.
pub const FINAL_CHOICE_RANGE: std::ops::RangeInclusive<usize> = 4..=5;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Where in a question a broken choice list was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceSlot {
    Final,
    Step(usize),
}

impl fmt::Display for ChoiceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChoiceSlot::Final => f.write_str("final question"),
            ChoiceSlot::Step(idx) => write!(f, "step {}", idx + 1),
        }
    }
}

/// A generated question broke one of its own invariants.
///
/// These are programmer errors in a template; validation catches them before shipping.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("{template_id}: {slot} answer index {index} out of range for {len} choices")]
    AnswerOutOfRange {
        template_id: TemplateId,
        slot: ChoiceSlot,
        index: usize,
        len: usize,
    },

    #[error("{template_id}: {slot} expected answer {expected:?} but choice is {found:?}")]
    AnswerMismatch {
        template_id: TemplateId,
        slot: ChoiceSlot,
        expected: String,
        found: String,
    },

    #[error("{template_id}: {slot} repeats choice {choice:?}")]
    DuplicateChoice {
        template_id: TemplateId,
        slot: ChoiceSlot,
        choice: String,
    },

    #[error("{template_id}: final question has {len} choices, expected 4 or 5")]
    ChoiceCount { template_id: TemplateId, len: usize },
}

fn check_choices(
    template_id: TemplateId,
    slot: ChoiceSlot,
    choices: &[String],
    index: usize,
    expected: &str,
) -> Result<(), QuestionError> {
    let Some(found) = choices.get(index) else {
        return Err(QuestionError::AnswerOutOfRange {
            template_id,
            slot,
            index,
            len: choices.len(),
        });
    };
    if found != expected {
        return Err(QuestionError::AnswerMismatch {
            template_id,
            slot,
            expected: expected.to_owned(),
            found: found.clone(),
        });
    }
    let mut seen = HashSet::with_capacity(choices.len());
    for choice in choices {
        if !seen.insert(choice.as_str()) {
            return Err(QuestionError::DuplicateChoice {
                template_id,
                slot,
                choice: choice.clone(),
            });
        }
    }
    Ok(())
}

//
// ─── STEPS ─────────────────────────────────────────────────────────────────────
//

/// Unscored scaffolding prompt shown before the final question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub prompt: String,
    pub choices: Vec<String>,
    pub correct_index: usize,
    pub correct_value: String,
}

impl Step {
    #[must_use]
    pub fn new(prompt: impl Into<String>, set: ChoiceSet) -> Self {
        let correct_value = set.answer().to_owned();
        Self {
            prompt: prompt.into(),
            choices: set.choices,
            correct_index: set.answer_index,
            correct_value,
        }
    }

    /// Whether `index` points at the correct choice.
    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }
}

/// Cheat-sheet entry derived from the same parameters as the question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cheatsheet {
    pub title: String,
    pub body: String,
    pub steps: Vec<String>,
    pub key_formulas: Vec<String>,
}

/// Two-sided flashcard derived from the same parameters as the question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

//
// ─── QUESTION INSTANCE ─────────────────────────────────────────────────────────
//

/// A fully instantiated question produced by one template for one seed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionInstance {
    template_id: TemplateId,
    section: Section,
    tags: Vec<&'static str>,
    variant_seed: u32,
    context_steps: Vec<Step>,
    final_question: String,
    final_choices: Vec<String>,
    final_answer_index: usize,
    final_answer: String,
    cheatsheet: Cheatsheet,
    flashcard: Flashcard,
}

impl QuestionInstance {
    /// Assemble and verify an instance.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the final choices do not contain `final_answer` at the
    /// reported index, if any choice list repeats an entry, or if the final question does
    /// not offer 4 or 5 choices.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        template_id: TemplateId,
        section: Section,
        tags: &[&'static str],
        variant_seed: u32,
        context_steps: Vec<Step>,
        final_question: String,
        final_set: ChoiceSet,
        final_answer: String,
        cheatsheet: Cheatsheet,
        flashcard: Flashcard,
    ) -> Result<Self, QuestionError> {
        if !FINAL_CHOICE_RANGE.contains(&final_set.choices.len()) {
            return Err(QuestionError::ChoiceCount {
                template_id,
                len: final_set.choices.len(),
            });
        }
        check_choices(
            template_id,
            ChoiceSlot::Final,
            &final_set.choices,
            final_set.answer_index,
            &final_answer,
        )?;
        for (idx, step) in context_steps.iter().enumerate() {
            check_choices(
                template_id,
                ChoiceSlot::Step(idx),
                &step.choices,
                step.correct_index,
                &step.correct_value,
            )?;
        }

        Ok(Self {
            template_id,
            section,
            tags: tags.to_vec(),
            variant_seed,
            context_steps,
            final_question,
            final_choices: final_set.choices,
            final_answer_index: final_set.answer_index,
            final_answer,
            cheatsheet,
            flashcard,
        })
    }

    /// Re-run every invariant check on an existing instance.
    ///
    /// # Errors
    ///
    /// Same conditions as construction.
    pub fn verify(&self) -> Result<(), QuestionError> {
        if !FINAL_CHOICE_RANGE.contains(&self.final_choices.len()) {
            return Err(QuestionError::ChoiceCount {
                template_id: self.template_id,
                len: self.final_choices.len(),
            });
        }
        check_choices(
            self.template_id,
            ChoiceSlot::Final,
            &self.final_choices,
            self.final_answer_index,
            &self.final_answer,
        )?;
        self.context_steps
            .iter()
            .enumerate()
            .try_for_each(|(idx, step)| {
                check_choices(
                    self.template_id,
                    ChoiceSlot::Step(idx),
                    &step.choices,
                    step.correct_index,
                    &step.correct_value,
                )
            })
    }

    #[must_use]
    pub fn template_id(&self) -> TemplateId {
        self.template_id
    }

    #[must_use]
    pub fn section(&self) -> Section {
        self.section
    }

    #[must_use]
    pub fn tags(&self) -> &[&'static str] {
        &self.tags
    }

    /// Seed the template was instantiated with.
    #[must_use]
    pub fn variant_seed(&self) -> u32 {
        self.variant_seed
    }

    #[must_use]
    pub fn context_steps(&self) -> &[Step] {
        &self.context_steps
    }

    #[must_use]
    pub fn final_question(&self) -> &str {
        &self.final_question
    }

    #[must_use]
    pub fn final_choices(&self) -> &[String] {
        &self.final_choices
    }

    #[must_use]
    pub fn final_answer_index(&self) -> usize {
        self.final_answer_index
    }

    #[must_use]
    pub fn final_answer(&self) -> &str {
        &self.final_answer
    }

    #[must_use]
    pub fn cheatsheet(&self) -> &Cheatsheet {
        &self.cheatsheet
    }

    #[must_use]
    pub fn flashcard(&self) -> &Flashcard {
        &self.flashcard
    }

    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.final_answer_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: TemplateId = TemplateId::new("q-test");

    fn set(choices: &[&str], answer_index: usize) -> ChoiceSet {
        ChoiceSet {
            choices: choices.iter().map(|c| (*c).to_owned()).collect(),
            answer_index,
        }
    }

    fn cards() -> (Cheatsheet, Flashcard) {
        (
            Cheatsheet {
                title: "T".into(),
                body: "B".into(),
                steps: Vec::new(),
                key_formulas: Vec::new(),
            },
            Flashcard {
                front: "F".into(),
                back: "K".into(),
            },
        )
    }

    fn build(final_set: ChoiceSet, answer: &str, steps: Vec<Step>) -> Result<QuestionInstance, QuestionError> {
        let (cheatsheet, flashcard) = cards();
        QuestionInstance::new(
            ID,
            Section::Quant,
            &["tag"],
            1,
            steps,
            "Q?".into(),
            final_set,
            answer.into(),
            cheatsheet,
            flashcard,
        )
    }

    #[test]
    fn accepts_consistent_question() {
        let step = Step::new("S?", set(&["1", "2", "3"], 1));
        let question = build(set(&["a", "b", "c", "d"], 2), "c", vec![step]).unwrap();
        assert_eq!(question.final_answer(), "c");
        assert!(question.is_correct(2));
        assert!(question.verify().is_ok());
        assert_eq!(question.context_steps()[0].correct_value, "2");
    }

    #[test]
    fn rejects_answer_mismatch() {
        let err = build(set(&["a", "b", "c", "d"], 0), "c", Vec::new()).unwrap_err();
        assert!(matches!(err, QuestionError::AnswerMismatch { slot: ChoiceSlot::Final, .. }));
    }

    #[test]
    fn rejects_duplicates() {
        let err = build(set(&["a", "b", "a", "d"], 1), "b", Vec::new()).unwrap_err();
        assert!(matches!(err, QuestionError::DuplicateChoice { .. }));
    }

    #[test]
    fn rejects_out_of_range_index() {
        let err = build(set(&["a", "b", "c", "d"], 9), "a", Vec::new()).unwrap_err();
        assert!(matches!(err, QuestionError::AnswerOutOfRange { index: 9, len: 4, .. }));
    }

    #[test]
    fn rejects_wrong_choice_count() {
        let err = build(set(&["a", "b", "c"], 0), "a", Vec::new()).unwrap_err();
        assert!(matches!(err, QuestionError::ChoiceCount { len: 3, .. }));
    }

    #[test]
    fn rejects_broken_step() {
        let mut step = Step::new("S?", set(&["1", "2", "3"], 1));
        step.correct_value = "3".into();
        let err = build(set(&["a", "b", "c", "d"], 0), "a", vec![step]).unwrap_err();
        assert!(matches!(err, QuestionError::AnswerMismatch { slot: ChoiceSlot::Step(0), .. }));
    }
}
