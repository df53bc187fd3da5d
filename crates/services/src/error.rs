//! Shared error types for the services crate.

use thiserror::Error;

use study_core::model::{QuestionError, SectionFilter};

use crate::sessions::QuizPhase;

/// Errors emitted by the quiz state machine.
///
/// Every input error leaves the machine exactly as it was.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions available for {filter}")]
    NoQuestions { filter: SectionFilter },
    #[error("no answer selected")]
    NoSelection,
    #[error("choice {index} is out of range for {len} choices")]
    InvalidChoice { index: usize, len: usize },
    #[error("quiz is not in progress")]
    NotInProgress,
    #[error("no context step is active")]
    NoActiveStep,
    #[error("cannot {action} while the quiz is {phase}")]
    WrongPhase {
        action: &'static str,
        phase: QuizPhase,
    },
    #[error(transparent)]
    Question(#[from] QuestionError),
}
