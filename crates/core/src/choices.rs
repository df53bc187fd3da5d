//! Multiple-choice answer sets shared by every template.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pick::{Fraction, pick_int, shuffle};
use crate::rng::SeededRng;

/// Bound on numeric perturbation attempts before falling back to text markers.
const MAX_NUMERIC_PERTURBATIONS: usize = 64;

/// A raw answer value before it is rendered into a choice string.
#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceValue {
    Number(f64),
    Text(String),
}

impl ChoiceValue {
    fn as_number(&self) -> Option<f64> {
        match self {
            ChoiceValue::Number(n) => Some(*n),
            ChoiceValue::Text(_) => None,
        }
    }
}

impl fmt::Display for ChoiceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // -0 renders as "0"
            ChoiceValue::Number(n) if *n == 0.0 => f.write_str("0"),
            ChoiceValue::Number(n) => write!(f, "{n}"),
            ChoiceValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ChoiceValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for ChoiceValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for ChoiceValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ChoiceValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Fraction> for ChoiceValue {
    fn from(value: Fraction) -> Self {
        Self::Text(value.to_string())
    }
}

/// Shuffled choices with the position of the correct one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceSet {
    pub choices: Vec<String>,
    pub answer_index: usize,
}

impl ChoiceSet {
    /// The correct choice string.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.choices[self.answer_index]
    }
}

/// Build `count` unique choices around `correct`.
///
/// Distractors are stringified, deduplicated and stripped of anything equal to the
/// correct value. Missing distractors are synthesized: numbers are nudged by a signed
/// offset in `1..=5`, text gets a growing `*` marker.
pub fn make_choices<C, I>(
    rng: &mut SeededRng,
    correct: C,
    distractors: I,
    count: usize,
) -> ChoiceSet
where
    C: Into<ChoiceValue>,
    I: IntoIterator,
    I::Item: Into<ChoiceValue>,
{
    let correct = correct.into();
    let correct_str = correct.to_string();
    let wanted = count.saturating_sub(1);

    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(correct_str.clone());
    let mut picked: Vec<String> = Vec::with_capacity(wanted);
    for candidate in distractors {
        if picked.len() == wanted {
            break;
        }
        let candidate = candidate.into().to_string();
        if seen.insert(candidate.clone()) {
            picked.push(candidate);
        }
    }

    if let Some(n) = correct.as_number() {
        let mut tries = 0;
        while picked.len() < wanted && tries < MAX_NUMERIC_PERTURBATIONS {
            tries += 1;
            let offset = pick_int(rng, 1, 5) as f64;
            let sign = if rng.next_f64() > 0.5 { 1.0 } else { -1.0 };
            let variation = ChoiceValue::Number(n + offset * sign).to_string();
            if seen.insert(variation.clone()) {
                picked.push(variation);
            }
        }
    }

    let mut marker = String::new();
    while picked.len() < wanted {
        marker.push('*');
        let variation = format!("{correct_str}{marker}");
        if seen.insert(variation.clone()) {
            picked.push(variation);
        }
    }

    let mut assembled = Vec::with_capacity(wanted + 1);
    assembled.push(correct_str.clone());
    assembled.extend(picked);
    let choices = shuffle(rng, &assembled);
    let answer_index = choices
        .iter()
        .position(|c| *c == correct_str)
        .unwrap_or_default();

    ChoiceSet {
        choices,
        answer_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unique(set: &ChoiceSet) {
        let unique: HashSet<_> = set.choices.iter().collect();
        assert_eq!(unique.len(), set.choices.len(), "duplicates in {:?}", set.choices);
    }

    #[test]
    fn numbers_render_like_plain_decimals() {
        assert_eq!(ChoiceValue::from(12_i64).to_string(), "12");
        assert_eq!(ChoiceValue::from(0.15).to_string(), "0.15");
        assert_eq!(ChoiceValue::from(-0.0).to_string(), "0");
        assert_eq!(ChoiceValue::from(2.5).to_string(), "2.5");
    }

    #[test]
    fn keeps_correct_exactly_once() {
        let mut rng = SeededRng::new(1);
        let set = make_choices(&mut rng, 30_i64, [30_i64, 40, 50, 60], 4);
        assert_eq!(set.choices.len(), 4);
        assert_eq!(set.answer(), "30");
        assert_eq!(set.choices.iter().filter(|c| *c == "30").count(), 1);
        assert_unique(&set);
    }

    #[test]
    fn dedupes_distractors_and_takes_first_ones() {
        let mut rng = SeededRng::new(2);
        let set = make_choices(&mut rng, 5_i64, [6_i64, 6, 7, 7, 8, 9], 4);
        let mut sorted = set.choices.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["5", "6", "7", "8"]);
    }

    #[test]
    fn synthesizes_numeric_distractors_when_short() {
        for seed in 0..200 {
            let mut rng = SeededRng::new(seed);
            let set = make_choices(&mut rng, 10_i64, Vec::<i64>::new(), 5);
            assert_eq!(set.choices.len(), 5);
            assert_eq!(set.answer(), "10");
            assert_unique(&set);
            for c in &set.choices {
                let v: f64 = c.parse().unwrap();
                assert!((5.0..=15.0).contains(&v));
            }
        }
    }

    #[test]
    fn synthesizes_text_distractors_when_short() {
        let mut rng = SeededRng::new(3);
        let set = make_choices(&mut rng, "even", ["even", "even"], 4);
        assert_eq!(set.choices.len(), 4);
        assert_eq!(set.answer(), "even");
        assert!(set.choices.iter().any(|c| c == "even***"));
        assert_unique(&set);
    }

    #[test]
    fn mixed_values_stringify_before_dedup() {
        let mut rng = SeededRng::new(4);
        let set = make_choices(
            &mut rng,
            2_i64,
            vec![
                ChoiceValue::from(1_i64),
                ChoiceValue::from("2"),
                ChoiceValue::from("k"),
                ChoiceValue::from(3_i64),
            ],
            4,
        );
        let mut sorted = set.choices.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["1", "2", "3", "k"]);
    }

    #[test]
    fn never_duplicates_across_many_inputs() {
        for seed in 0..300_u32 {
            let mut rng = SeededRng::new(seed);
            let correct = i64::from(seed % 7);
            let distractors: Vec<i64> = (0..(seed % 5)).map(|d| i64::from(d % 3)).collect();
            let set = make_choices(&mut rng, correct, distractors, 4 + (seed as usize % 2));
            assert_unique(&set);
            assert_eq!(set.answer(), correct.to_string());
        }
    }

    #[test]
    fn tiny_counts_degrade_gracefully() {
        let mut rng = SeededRng::new(5);
        let set = make_choices(&mut rng, "x", ["y"], 0);
        assert_eq!(set.choices, vec!["x"]);
        assert_eq!(set.answer_index, 0);
    }
}
