//! Offline check that every template keeps its answer invariants across many seeds.

use std::fmt;

use log::{info, warn};
use rand::Rng;

use study_core::derive_seed;
use study_core::model::{QuestionError, TemplateId};
use study_core::templates;

/// A template/seed pair that produced a broken question.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    pub template_id: TemplateId,
    pub seed: u32,
    pub error: QuestionError,
}

/// Outcome of a validation pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport {
    pub base_seed: u32,
    pub passed: usize,
    pub failures: Vec<ValidationFailure>,
}

impl ValidationReport {
    #[must_use]
    pub fn checked(&self) -> usize {
        self.passed + self.failures.len()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "base seed {}: {} checked, {} passed, {} failed",
            self.base_seed,
            self.checked(),
            self.passed,
            self.failures.len()
        )?;
        for failure in &self.failures {
            write!(f, "\n  seed {}: {}", failure.seed, failure.error)?;
        }
        Ok(())
    }
}

/// Instantiate every template `iterations` times, one derived seed per iteration.
#[must_use]
pub fn validate_all_templates(base_seed: u32, iterations: u32) -> ValidationReport {
    let mut report = ValidationReport {
        base_seed,
        ..ValidationReport::default()
    };

    for template in templates::registry() {
        for iteration in 0..iterations {
            let seed = derive_seed(base_seed, template.id.as_str(), iteration);
            match template.instantiate(seed).and_then(|q| q.verify()) {
                Ok(()) => report.passed += 1,
                Err(error) => {
                    warn!("{} failed for seed {seed}: {error}", template.id);
                    report.failures.push(ValidationFailure {
                        template_id: template.id,
                        seed,
                        error,
                    });
                }
            }
        }
    }

    info!(
        "validated {} templates x {iterations}: {} passed, {} failed",
        templates::registry().len(),
        report.passed,
        report.failures.len()
    );
    report
}

/// Validation pass under a base seed drawn from the thread-local generator.
#[must_use]
pub fn validate_random(iterations: u32) -> ValidationReport {
    let base_seed = rand::rng().random::<u32>();
    validate_all_templates(base_seed, iterations)
}
