use serde::Serialize;

/// Aggregated view of quiz progress, useful for a progress bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    /// Active context step of the current question; equals `step_count` on the final question.
    pub step_index: usize,
    pub step_count: usize,
    pub is_complete: bool,
}

impl QuizProgress {
    /// Completed share of the session in `[0, 1]`.
    ///
    /// Each question counts as one unit split evenly between its context steps and
    /// its final question.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.is_complete {
            return 1.0;
        }
        if self.total == 0 {
            return 0.0;
        }
        let within = self.step_index as f64 / (self.step_count + 1) as f64;
        (self.answered as f64 + within) / self.total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(answered: usize, step_index: usize, step_count: usize) -> QuizProgress {
        QuizProgress {
            total: 4,
            answered,
            remaining: 4 - answered,
            step_index,
            step_count,
            is_complete: false,
        }
    }

    #[test]
    fn fraction_counts_steps_inside_a_question() {
        assert_eq!(progress(0, 0, 2).fraction(), 0.0);
        assert!((progress(1, 0, 2).fraction() - 0.25).abs() < 1e-12);
        assert!((progress(1, 1, 1).fraction() - 0.375).abs() < 1e-12);
    }

    #[test]
    fn complete_and_empty_edges() {
        let mut done = progress(4, 0, 0);
        done.is_complete = true;
        assert_eq!(done.fraction(), 1.0);

        let empty = QuizProgress {
            total: 0,
            answered: 0,
            remaining: 0,
            step_index: 0,
            step_count: 0,
            is_complete: false,
        };
        assert_eq!(empty.fraction(), 0.0);
    }
}
