use log::{debug, warn};
use serde::Serialize;

use study_core::model::{QuestionError, QuestionInstance, SectionFilter};
use study_core::pick::shuffle;
use study_core::templates;
use study_core::{SeededRng, derive_seed};

/// Key mixed into the seed that orders a session's queue.
const SHUFFLE_KEY: &str = "shuffle";

/// Instantiate every template matching `filter` and shuffle the result.
///
/// Each template gets its own seed derived from `base_seed`, its id and
/// `attempt_number`, so the same triple always produces the same queue. An empty
/// result is not an error here; callers decide what an empty pool means.
///
/// # Errors
///
/// Returns `QuestionError` if any template produces a question that breaks its
/// answer invariants.
pub fn generate_quiz_questions(
    base_seed: u32,
    attempt_number: u32,
    filter: SectionFilter,
) -> Result<Vec<QuestionInstance>, QuestionError> {
    let questions = templates::matching(filter)
        .map(|template| {
            let seed = derive_seed(base_seed, template.id.as_str(), attempt_number);
            template.instantiate(seed)
        })
        .collect::<Result<Vec<_>, _>>()?;

    if questions.is_empty() {
        warn!("no templates match {filter}");
        return Ok(questions);
    }

    let mut rng = SeededRng::new(derive_seed(base_seed, SHUFFLE_KEY, attempt_number));
    let queue = shuffle(&mut rng, &questions);
    debug!(
        "generated {} questions for {filter} (base seed {base_seed}, attempt {attempt_number})",
        queue.len()
    );
    Ok(queue)
}

/// Ordered queue for one run through the quiz.
///
/// Created on begin and replaced wholesale on every restart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizSession {
    queue: Vec<QuestionInstance>,
    section_filter: SectionFilter,
    base_seed: u32,
    attempt_number: u32,
}

impl QuizSession {
    /// Generate a session.
    ///
    /// # Errors
    ///
    /// Propagates `QuestionError` from generation.
    pub fn generate(
        base_seed: u32,
        attempt_number: u32,
        section_filter: SectionFilter,
    ) -> Result<Self, QuestionError> {
        let queue = generate_quiz_questions(base_seed, attempt_number, section_filter)?;
        Ok(Self {
            queue,
            section_filter,
            base_seed,
            attempt_number,
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[QuestionInstance] {
        &self.queue
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&QuestionInstance> {
        self.queue.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[must_use]
    pub fn section_filter(&self) -> SectionFilter {
        self.section_filter
    }

    #[must_use]
    pub fn base_seed(&self) -> u32 {
        self.base_seed
    }

    #[must_use]
    pub fn attempt_number(&self) -> u32 {
        self.attempt_number
    }
}
