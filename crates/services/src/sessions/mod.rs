mod generator;
mod machine;
mod progress;
mod state;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use generator::{QuizSession, generate_quiz_questions};
pub use machine::{QuizMachine, SubmitOutcome};
pub use progress::QuizProgress;
pub use state::{QuizPhase, QuizRunState};
