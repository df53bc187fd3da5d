#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;
pub mod study;
pub mod validation;

pub use study_core::Clock;
pub use sessions as session;

pub use error::QuizError;
pub use sessions::{
    QuizMachine, QuizPhase, QuizProgress, QuizRunState, QuizSession, SubmitOutcome,
    generate_quiz_questions,
};
pub use study::{CheatsheetEntry, FlashcardDeck, cheatsheet_entries};
pub use validation::{ValidationFailure, ValidationReport, validate_all_templates, validate_random};
