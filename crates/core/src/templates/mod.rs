//! Fixed catalog of parameterized question templates.
//!
//! Every template is a plain function of a [`SeededRng`]: all parameters are drawn from
//! it and every answer is computed from the drawn parameters, so one seed always yields
//! the same question.

mod algebra;
mod arithmetic;
mod integrated;
mod numbers;
mod rates;

use std::fmt;

use crate::choices::{ChoiceSet, ChoiceValue, make_choices};
use crate::model::{
    Cheatsheet, Flashcard, QuestionError, QuestionInstance, Section, SectionFilter, Step,
    TemplateId,
};
use crate::pick::Fraction;
use crate::rng::SeededRng;

/// Raw output of a template before it is verified and stamped with its identity.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedQuestion {
    pub question: String,
    /// The answer as computed from the parameters, independently of the choice list.
    pub answer: ChoiceValue,
    pub steps: Vec<Step>,
    pub final_choices: ChoiceSet,
    pub cheatsheet: Cheatsheet,
    pub flashcard: Flashcard,
}

/// A question archetype.
#[derive(Clone, Copy)]
pub struct QuestionTemplate {
    pub id: TemplateId,
    pub section: Section,
    pub tags: &'static [&'static str],
    pub generate: fn(&mut SeededRng) -> GeneratedQuestion,
}

impl QuestionTemplate {
    /// Instantiate this template with a fresh stream seeded by `seed`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the generated question breaks its answer invariants.
    pub fn instantiate(&self, seed: u32) -> Result<QuestionInstance, QuestionError> {
        let mut rng = SeededRng::new(seed);
        let generated = (self.generate)(&mut rng);
        log::debug!("instantiated {} with seed {seed}", self.id);
        QuestionInstance::new(
            self.id,
            self.section,
            self.tags,
            seed,
            generated.steps,
            generated.question,
            generated.final_choices,
            generated.answer.to_string(),
            generated.cheatsheet,
            generated.flashcard,
        )
    }
}

impl fmt::Debug for QuestionTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionTemplate")
            .field("id", &self.id)
            .field("section", &self.section)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

const fn template(
    id: &'static str,
    section: Section,
    tags: &'static [&'static str],
    generate: fn(&mut SeededRng) -> GeneratedQuestion,
) -> QuestionTemplate {
    QuestionTemplate {
        id: TemplateId::new(id),
        section,
        tags,
        generate,
    }
}

static REGISTRY: [QuestionTemplate; 28] = [
    template("q-percentage", Section::Quant, &["percentages", "arithmetic"], arithmetic::percentage),
    template("q-distance-rate-time", Section::Quant, &["rates", "distance", "time"], rates::distance_rate_time),
    template("q-simple-interest", Section::Quant, &["interest", "finance", "percentages"], arithmetic::simple_interest),
    template("q-ratio-problem", Section::Quant, &["ratios", "algebra"], algebra::ratio_problem),
    template("q-fraction-simplify", Section::Quant, &["fractions", "GCF", "simplification"], numbers::fraction_simplify),
    template("q-weighted-average", Section::Quant, &["averages", "statistics"], arithmetic::weighted_average),
    template("q-exponent-rules", Section::Quant, &["exponents", "algebra"], algebra::exponent_rules),
    template("q-mixture", Section::Quant, &["mixtures", "algebra", "percentages"], arithmetic::mixture),
    template("q-quadratic-vertex", Section::Quant, &["quadratics", "optimization"], algebra::quadratic_vertex),
    template("q-units-digit", Section::Quant, &["number-theory", "patterns"], numbers::units_digit),
    template("q-linear-equation", Section::Quant, &["algebra", "equations"], algebra::linear_equation),
    template("q-profit-loss", Section::Quant, &["percentages", "business"], arithmetic::profit_loss),
    template("q-work-rate", Section::Quant, &["rates", "work"], rates::work_rate),
    template("q-consecutive-integers", Section::Quant, &["algebra", "integers"], algebra::consecutive_integers),
    template("q-absolute-value", Section::Quant, &["algebra", "absolute-value"], algebra::absolute_value),
    template("q-sqrt-simplify", Section::Quant, &["radicals", "simplification"], numbers::sqrt_simplify),
    template("q-probability", Section::Quant, &["probability", "statistics"], numbers::probability),
    template("q-system-equations", Section::Quant, &["algebra", "systems"], algebra::system_equations),
    template("q-triangle-inequality", Section::Quant, &["geometry", "inequalities"], numbers::triangle_inequality),
    template("q-average-speed-trip", Section::Quant, &["rates", "averages"], rates::average_speed_trip),
    template("q-even-odd", Section::Quant, &["number-theory", "properties"], numbers::even_odd),
    template("q-factorial-basic", Section::Quant, &["factorials", "arithmetic"], arithmetic::factorial_basic),
    template("q-nested-radicals", Section::Quant, &["radicals", "simplification"], numbers::nested_radicals),
    template("q-integer-equation", Section::Quant, &["number-theory", "equations"], algebra::integer_equation),
    template("q-speed-conversion", Section::Quant, &["rates", "units"], rates::speed_conversion),
    template("q-continued-fraction", Section::Quant, &["fractions", "arithmetic"], numbers::continued_fraction),
    template("i-employee-count", Section::Integrated, &["algebra", "systems", "business"], integrated::employee_count),
    template("i-bonus-optimization", Section::Integrated, &["optimization", "business"], integrated::bonus_optimization),
];

/// All templates in registry order.
#[must_use]
pub fn registry() -> &'static [QuestionTemplate] {
    &REGISTRY
}

/// Look up a template by id.
#[must_use]
pub fn find(id: &str) -> Option<&'static QuestionTemplate> {
    REGISTRY.iter().find(|t| t.id.as_str() == id)
}

/// Templates matching `filter`, in registry order.
pub fn matching(filter: SectionFilter) -> impl Iterator<Item = &'static QuestionTemplate> {
    REGISTRY.iter().filter(move |t| filter.matches(t.section))
}

// ─── Shared helpers for template bodies ────────────────────────────────────────

/// Scaffolding step with the default four choices.
fn step<C, I>(rng: &mut SeededRng, prompt: String, correct: C, distractors: I) -> Step
where
    C: Into<ChoiceValue>,
    I: IntoIterator,
    I::Item: Into<ChoiceValue>,
{
    Step::new(prompt, make_choices(rng, correct, distractors, 4))
}

fn sheet(title: &str, body: String, steps: Vec<String>, formulas: &[&str]) -> Cheatsheet {
    Cheatsheet {
        title: title.to_owned(),
        body,
        steps,
        key_formulas: formulas.iter().map(|f| (*f).to_owned()).collect(),
    }
}

fn card(front: String, back: String) -> Flashcard {
    Flashcard { front, back }
}

/// Render a number the same way answer choices are rendered.
fn num(value: f64) -> String {
    ChoiceValue::Number(value).to_string()
}

/// `units / scale` as a float, computed with a single division so decimals stay clean.
fn scaled(units: i64, scale: i64) -> f64 {
    units as f64 / scale as f64
}

/// `num/den` in lowest terms.
fn ratio(num: i64, den: i64) -> String {
    Fraction::reduced(num, den).map_or_else(|| format!("{num}/{den}"), |f| f.to_string())
}

/// Integer with comma thousands separators.
fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
