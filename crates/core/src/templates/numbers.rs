//! Number properties: fractions, digits, radicals, parity and probability.

use super::{GeneratedQuestion, card, ratio, sheet, step};
use crate::choices::{ChoiceValue, make_choices};
use crate::pick::{gcd, pick_from, pick_int};
use crate::rng::SeededRng;

pub(super) fn fraction_simplify(rng: &mut SeededRng) -> GeneratedQuestion {
    let gcf = pick_int(rng, 2, 6);
    let simp_num: i64 = pick_from(rng, &[2, 3, 4, 5, 7]);
    let dens: Vec<i64> = [3, 4, 5, 7, 8, 9, 11]
        .into_iter()
        .filter(|d| *d != simp_num && gcd(simp_num, *d) == 1)
        .collect();
    let simp_den = pick_from(rng, &dens);
    let num = simp_num * gcf;
    let den = simp_den * gcf;
    let answer = ratio(num, den);

    let steps = vec![
        step(
            rng,
            format!("Find the GCF of {num} and {den}:"),
            gcf,
            [gcf + 1, gcf - 1, num, 1],
        ),
        step(
            rng,
            format!("{num} ÷ {gcf} = {simp_num}. {den} ÷ {gcf} = ?"),
            simp_den,
            [simp_den + 1, simp_den - 1, den],
        ),
    ];
    let final_choices = make_choices(
        rng,
        answer.clone(),
        [
            format!("{simp_den}/{simp_num}"),
            format!("{}/{simp_den}", simp_num + 1),
            format!("{num}/{den}"),
        ],
        4,
    );

    GeneratedQuestion {
        question: format!("Simplify the fraction {num}/{den} to lowest terms."),
        answer: answer.clone().into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Simplifying Fractions",
            format!("GCF({num}, {den}) = {gcf}. Divide both by {gcf}: {answer}"),
            vec![
                format!("GCF of {num} and {den} is {gcf}"),
                format!("{num} ÷ {gcf} = {simp_num}"),
                format!("{den} ÷ {gcf} = {simp_den}"),
            ],
            &["a/b = (a÷GCF)/(b÷GCF)"],
        ),
        flashcard: card(
            format!("Simplify {num}/{den}"),
            format!("{answer} — Divide numerator and denominator by GCF {gcf}"),
        ),
    }
}

pub(super) fn units_digit(rng: &mut SeededRng) -> GeneratedQuestion {
    let base: i64 = pick_from(rng, &[2, 3, 7, 8]);
    let exp: i64 = pick_from(rng, &[10, 11, 12, 13, 14, 15, 23, 24, 25]);
    let pattern: Vec<i64> = (1..=4_u32).map(|i| base.pow(i) % 10).collect();
    let position = (exp - 1).rem_euclid(4) as usize;
    let units = pattern[position];
    let others: Vec<i64> = pattern.iter().copied().filter(|d| *d != units).collect();
    let cycle = pattern
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let steps = vec![
        step(
            rng,
            format!("The units digits of powers of {base} go {cycle}, ... How long is the cycle?"),
            4_i64,
            [2, 3, 5, 6],
        ),
        step(
            rng,
            format!(
                "{exp} leaves remainder {} when divided by 4, so the units digit matches {base}^{}. Which digit?",
                exp % 4,
                position + 1
            ),
            units,
            others.clone(),
        ),
    ];
    let final_choices = make_choices(rng, units, others.into_iter().chain([0, 5]), 4);

    GeneratedQuestion {
        question: format!("What is the units digit of {base}^{exp}?"),
        answer: units.into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Units Digit Cycles",
            format!(
                "Units digits of {base}^n cycle every 4: {cycle}. Position of {exp} in the cycle is {}, so the units digit is {units}",
                position + 1
            ),
            vec![
                format!("Cycle: {cycle}"),
                format!("{exp} mod 4 = {}", exp % 4),
                format!("Units digit = {units}"),
            ],
            &["Units digits of powers repeat with period dividing 4"],
        ),
        flashcard: card(
            format!("Units digit of {base}^{exp}?"),
            format!("{units} — Cycle {cycle} repeats every 4"),
        ),
    }
}

pub(super) fn sqrt_simplify(rng: &mut SeededRng) -> GeneratedQuestion {
    let factor: i64 = pick_from(rng, &[2, 3, 5, 6, 7]);
    let root: i64 = pick_int(rng, 2, 6);
    let square = root * root;
    let radicand = square * factor;
    let answer = format!("{root}√{factor}");

    let steps = vec![
        step(
            rng,
            format!("Largest perfect square that divides {radicand}:"),
            square,
            [factor, root, radicand],
        ),
        step(
            rng,
            format!("√{square} = ?"),
            root,
            [square, root + 1, factor],
        ),
    ];
    let final_choices = make_choices(
        rng,
        answer.clone(),
        [
            format!("√{radicand}"),
            format!("{factor}√{root}"),
            (root * factor).to_string(),
            format!("{square}√{factor}"),
        ],
        4,
    );

    GeneratedQuestion {
        question: format!("Simplify √{radicand}."),
        answer: answer.clone().into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Simplifying Square Roots",
            format!("√{radicand} = √({square} × {factor}) = √{square} × √{factor} = {answer}"),
            vec![
                format!("{radicand} = {square} × {factor}"),
                format!("√{square} = {root}"),
                format!("Result: {answer}"),
            ],
            &["√(ab) = √a × √b"],
        ),
        flashcard: card(
            format!("Simplify √{radicand}"),
            format!("{answer} — Pull out the perfect square {square}"),
        ),
    }
}

pub(super) fn probability(rng: &mut SeededRng) -> GeneratedQuestion {
    let favorable = pick_int(rng, 2, 6);
    let total: i64 = pick_from(rng, &[10, 12, 15, 20]);
    let answer = ratio(favorable, total);
    let divisor = gcd(favorable, total);
    let (p, q) = (favorable / divisor, total / divisor);

    let steps = vec![
        step(
            rng,
            format!("A bag holds {total} marbles, {favorable} of them red. Favorable outcomes = ?"),
            favorable,
            [total, total - favorable, favorable + 1],
        ),
        step(
            rng,
            format!("Reduce {favorable}/{total}. The GCF is:"),
            divisor,
            [favorable, total, divisor + 1],
        ),
    ];
    let final_choices = make_choices(
        rng,
        answer.clone(),
        [
            format!("{q}/{p}"),
            format!("{favorable}/{}", total + 1),
            format!("{}/{q}", p + 1),
            format!("{favorable}/{total}"),
        ],
        4,
    );

    GeneratedQuestion {
        question: format!(
            "A bag contains {total} marbles, of which {favorable} are red. If one marble is drawn at random, what is the probability it is red?"
        ),
        answer: answer.clone().into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Basic Probability",
            format!("P(red) = favorable / total = {favorable}/{total} = {answer}"),
            vec![
                format!("Favorable = {favorable}"),
                format!("Total = {total}"),
                format!("P = {favorable}/{total} = {answer}"),
            ],
            &["P(E) = favorable outcomes / total outcomes"],
        ),
        flashcard: card(
            format!("{favorable} red out of {total} marbles. P(red)?"),
            format!("{answer} — favorable over total, reduced"),
        ),
    }
}

pub(super) fn triangle_inequality(rng: &mut SeededRng) -> GeneratedQuestion {
    let a = pick_int(rng, 3, 7);
    let longer: Vec<i64> = (5..=9).filter(|b| *b > a).collect();
    let b = pick_from(rng, &longer);
    let upper = a + b;
    let lower = b - a;
    let max_c = upper - 1;

    let steps = vec![
        step(
            rng,
            format!("The third side must be less than {a} + {b} = ?"),
            upper,
            [lower, a * b, b],
        ),
        step(
            rng,
            format!("The third side must be greater than {b} - {a} = ?"),
            lower,
            [upper, a, 0],
        ),
    ];
    let final_choices = make_choices(rng, max_c, [upper, upper + 1, lower + 1, b], 4);

    GeneratedQuestion {
        question: format!(
            "Two sides of a triangle have lengths {a} and {b}. What is the largest possible integer length of the third side?"
        ),
        answer: max_c.into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Triangle Inequality",
            format!("{lower} < c < {upper}, so the largest integer c is {max_c}"),
            vec![
                format!("c < {a} + {b} = {upper}"),
                format!("c > {b} - {a} = {lower}"),
                format!("Largest integer: {max_c}"),
            ],
            &["|a - b| < c < a + b"],
        ),
        flashcard: card(
            format!("Sides {a} and {b}. Largest integer third side?"),
            format!("{max_c} — Third side must be less than {upper}"),
        ),
    }
}

fn parity(even: bool) -> &'static str {
    if even { "even" } else { "odd" }
}

fn example_of(rng: &mut SeededRng, even: bool) -> i64 {
    if even {
        pick_from(rng, &[2, 4, 6, 8])
    } else {
        pick_from(rng, &[3, 5, 7, 9])
    }
}

pub(super) fn even_odd(rng: &mut SeededRng) -> GeneratedQuestion {
    let x_even = pick_from(rng, &[true, false]);
    let y_even = pick_from(rng, &[true, false]);
    let multiply = pick_from(rng, &[true, false]);
    let (op, result_even) = if multiply {
        ("×", x_even || y_even)
    } else {
        ("+", x_even == y_even)
    };
    let ex = example_of(rng, x_even);
    let ey = example_of(rng, y_even);
    let value = if multiply { ex * ey } else { ex + ey };
    let answer = parity(result_even);

    let steps = vec![
        step(
            rng,
            format!("Try x = {ex} and y = {ey}. x {op} y = ?"),
            value,
            [value + 1, value + 2, ex],
        ),
        step(
            rng,
            format!("{value} is:"),
            answer,
            [parity(!result_even), "prime", "zero"],
        ),
    ];
    let final_choices = make_choices(
        rng,
        answer,
        [
            ChoiceValue::from(parity(!result_even)),
            ChoiceValue::from("cannot be determined"),
            ChoiceValue::from("neither"),
        ],
        4,
    );

    let x_word = parity(x_even);
    let y_word = parity(y_even);
    GeneratedQuestion {
        question: format!("If x is {x_word} and y is {y_word}, is x {op} y even or odd?"),
        answer: answer.into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Even and Odd Rules",
            format!("{x_word} {op} {y_word} = {answer}. Check with {ex} {op} {ey} = {value}"),
            vec![
                "even ± even = even, odd ± odd = even, even ± odd = odd".to_owned(),
                "A product is even when any factor is even".to_owned(),
                format!("{x_word} {op} {y_word} = {answer}"),
            ],
            &["odd × odd = odd", "odd + odd = even"],
        ),
        flashcard: card(
            format!("{x_word} {op} {y_word} = even or odd?"),
            format!("{answer} — e.g. {ex} {op} {ey} = {value}"),
        ),
    }
}

pub(super) fn nested_radicals(rng: &mut SeededRng) -> GeneratedQuestion {
    let d = pick_int(rng, 3, 7);
    let c = pick_int(rng, 2, 8);
    let square = d * d;
    let a = square - c;
    let inner = c * c;

    let steps = vec![
        step(
            rng,
            format!("Evaluate the inner radical: √{inner} = ?"),
            c,
            [inner, c + 1, 2 * c],
        ),
        step(
            rng,
            format!("{a} + {c} = ?"),
            square,
            [a, square + 1, a * c],
        ),
    ];
    let final_choices = make_choices(rng, d, [d + 1, d - 1, square, c + d], 5);

    GeneratedQuestion {
        question: format!("Evaluate √({a} + √{inner})."),
        answer: d.into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Nested Radicals",
            format!("Work inside out: √{inner} = {c}, then √({a} + {c}) = √{square} = {d}"),
            vec![
                format!("√{inner} = {c}"),
                format!("{a} + {c} = {square}"),
                format!("√{square} = {d}"),
            ],
            &["Evaluate the innermost radical first"],
        ),
        flashcard: card(
            format!("√({a} + √{inner}) = ?"),
            format!("{d} — Inside out: √{inner} = {c}, √{square} = {d}"),
        ),
    }
}

pub(super) fn continued_fraction(rng: &mut SeededRng) -> GeneratedQuestion {
    let a: i64 = pick_from(rng, &[1, 2, 3]);
    let b = pick_int(rng, 2, 5);
    let c = pick_int(rng, 2, 7);
    let inner_den = b * c + 1;
    let numerator = a * inner_den + c;
    let answer = ratio(numerator, inner_den);

    let steps = vec![
        step(
            rng,
            format!("Simplify the inner part: {b} + 1/{c} = ?"),
            ratio(inner_den, c),
            [ratio(b + 1, c), ratio(b * c, c + 1), ratio(c, inner_den)],
        ),
        step(
            rng,
            format!("1 ÷ ({inner_den}/{c}) = ?"),
            ratio(c, inner_den),
            [ratio(inner_den, c), ratio(1, b * c), ratio(c, b)],
        ),
        step(
            rng,
            format!("{a} + {c}/{inner_den} = ?"),
            answer.clone(),
            [
                ratio(a + c, inner_den),
                ratio(a * c + inner_den, c),
                ratio(inner_den, numerator),
            ],
        ),
    ];
    let final_choices = make_choices(
        rng,
        answer.clone(),
        [
            ratio(a * b + 1, b),
            ratio(a * inner_den + 1, inner_den),
            ratio(inner_den, numerator),
        ],
        4,
    );

    GeneratedQuestion {
        question: format!(
            "Express {a} + 1/({b} + 1/{c}) as a fraction in lowest terms."
        ),
        answer: answer.clone().into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Continued Fractions",
            format!(
                "Work from the bottom up: {b} + 1/{c} = {inner_den}/{c}, its reciprocal is {c}/{inner_den}, and {a} + {c}/{inner_den} = {answer}"
            ),
            vec![
                format!("{b} + 1/{c} = {inner_den}/{c}"),
                format!("1 ÷ ({inner_den}/{c}) = {c}/{inner_den}"),
                format!("{a} + {c}/{inner_den} = {answer}"),
            ],
            &["a + 1/(b + 1/c) = a + c/(bc + 1)"],
        ),
        flashcard: card(
            format!("{a} + 1/({b} + 1/{c}) = ?"),
            format!("{answer} — Start with the innermost fraction"),
        ),
    }
}
