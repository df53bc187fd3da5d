//! Equations, ratios, exponents and other symbolic manipulation.

use super::{GeneratedQuestion, card, scaled, sheet, step};
use crate::choices::make_choices;
use crate::pick::{gcd, pick_from, pick_int};
use crate::rng::SeededRng;

pub(super) fn ratio_problem(rng: &mut SeededRng) -> GeneratedQuestion {
    let a: i64 = pick_from(rng, &[2, 3, 4, 5]);
    let others: Vec<i64> = [3, 4, 5, 7].into_iter().filter(|b| *b != a).collect();
    let b = pick_from(rng, &others);
    let multiplier: i64 = pick_from(rng, &[4, 5, 6, 8, 10]);
    let parts = a + b;
    let total = parts * multiplier;
    let part_a = a * multiplier;
    let part_b = b * multiplier;

    let steps = vec![
        step(
            rng,
            format!("Total parts in ratio {a}:{b} = ?"),
            parts,
            [a * b, a - b, a],
        ),
        step(
            rng,
            format!("Value per part = {total} ÷ {parts} = ?"),
            multiplier,
            [multiplier + 1, multiplier - 1, multiplier * 2],
        ),
        step(
            rng,
            format!("Amount A = {a} × {multiplier} = ?"),
            part_a,
            [part_b, total, part_a + 5],
        ),
    ];
    let final_choices = make_choices(
        rng,
        part_a,
        [part_b, total - part_a + 5, multiplier, a],
        5,
    );

    GeneratedQuestion {
        question: format!(
            "The ratio of A to B is {a}:{b}. If the total is {total}, what is the value of A?"
        ),
        answer: part_a.into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Ratio Problems",
            format!(
                "Ratio {a}:{b} means {parts} total parts. Each part = {total}/{parts} = {multiplier}. A = {a}×{multiplier} = {part_a}"
            ),
            vec![
                format!("Total parts = {a} + {b} = {parts}"),
                format!("Value per part = {total} ÷ {parts} = {multiplier}"),
                format!("A = {a} × {multiplier} = {part_a}"),
            ],
            &["Part = (Ratio part / Total parts) × Total"],
        ),
        flashcard: card(
            format!("Ratio {a}:{b}, total {total}. Find A."),
            format!("{part_a} — Each part = {total}/{parts} = {multiplier}"),
        ),
    }
}

pub(super) fn exponent_rules(rng: &mut SeededRng) -> GeneratedQuestion {
    let base: i64 = pick_from(rng, &[2, 3, 5]);
    let e1: i64 = pick_from(rng, &[2, 3, 4]);
    let e2: i64 = pick_from(rng, &[2, 3, 4]);
    let sum = e1 + e2;
    let answer = format!("{base}^{sum}");

    let steps = vec![
        step(
            rng,
            "When multiplying powers with the same base, you ___ the exponents:".to_owned(),
            "add",
            ["multiply", "subtract", "divide"],
        ),
        step(
            rng,
            format!("{e1} + {e2} = ?"),
            sum,
            [e1 * e2, sum + 1, sum - 1],
        ),
    ];
    let final_choices = make_choices(
        rng,
        answer.clone(),
        [
            format!("{base}^{}", e1 * e2),
            format!("{}^{sum}", base * 2),
            format!("{base}^{}", sum - 1),
            format!("{base}^{}", sum + 1),
        ],
        4,
    );

    GeneratedQuestion {
        question: format!("Simplify: {base}^{e1} × {base}^{e2}"),
        answer: answer.clone().into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Exponent Rules: Product",
            format!(
                "When multiplying same bases, add exponents: {base}^{e1} × {base}^{e2} = {answer}"
            ),
            vec![
                "Same base → add exponents".to_owned(),
                format!("{e1} + {e2} = {sum}"),
                format!("Result: {answer}"),
            ],
            &["a^m × a^n = a^(m+n)", "a^m ÷ a^n = a^(m-n)", "(a^m)^n = a^(mn)"],
        ),
        flashcard: card(
            format!("Simplify {base}^{e1} × {base}^{e2}"),
            format!("{answer} — Add exponents when multiplying same base"),
        ),
    }
}

pub(super) fn quadratic_vertex(rng: &mut SeededRng) -> GeneratedQuestion {
    let h: i64 = pick_int(rng, 2, 6);
    let k: i64 = pick_from(rng, &[2, 3, 4, 5, 6, 8]);

    let steps = vec![
        step(
            rng,
            format!("For f(x) = -(x - {h})² + {k}, the squared term -(x - {h})² is largest when it equals:"),
            0_i64,
            [1, h, k],
        ),
        step(
            rng,
            format!("(x - {h})² = 0 when x = ?"),
            h,
            [h + 1, h - 1, k, 0],
        ),
    ];
    let final_choices = make_choices(rng, h, [k, h + k, 0, h - 1], 5);

    GeneratedQuestion {
        question: format!(
            "The function f(x) = -(x - {h})² + {k} reaches its maximum value when x equals:"
        ),
        answer: h.into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Quadratic Vertex Form",
            format!(
                "f(x) = a(x - h)² + k has vertex at (h, k). For -(x - {h})² + {k}, max at x = {h}"
            ),
            vec![
                "Vertex form: a(x-h)² + k".to_owned(),
                format!("h = {h}, k = {k}"),
                format!("Maximum occurs at x = {h}"),
            ],
            &["Vertex at (h, k)", "If a < 0, opens down (max)", "If a > 0, opens up (min)"],
        ),
        flashcard: card(
            format!("Max of f(x) = -(x - {h})² + {k}?"),
            format!("At x = {h} (vertex), max value = {k}"),
        ),
    }
}

pub(super) fn linear_equation(rng: &mut SeededRng) -> GeneratedQuestion {
    let a: i64 = pick_int(rng, 2, 5);
    let x: i64 = pick_int(rng, 3, 8);
    let b: i64 = pick_from(rng, &[5, 7, 10, 12, 15]);
    let result = a * x + b;
    let isolated = result - b;

    let steps = vec![
        step(
            rng,
            format!("Subtract {b} from both sides: {a}x = {result} - {b} = ?"),
            isolated,
            [result + b, result, b],
        ),
        step(
            rng,
            format!("Divide both sides by {a}: x = {isolated} ÷ {a} = ?"),
            x,
            [x + 1, x - 1, x * 2],
        ),
    ];
    let final_choices = make_choices(
        rng,
        x,
        [(x + 2) as f64, (x - 2) as f64, scaled(result, a), a as f64],
        5,
    );

    GeneratedQuestion {
        question: format!("If {a}x + {b} = {result}, what is x?"),
        answer: x.into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Solving Linear Equations",
            format!("{a}x + {b} = {result} → {a}x = {isolated} → x = {x}"),
            vec![
                format!("Subtract {b}: {a}x = {isolated}"),
                format!("Divide by {a}: x = {x}"),
            ],
            &["Isolate the variable", "Inverse operations"],
        ),
        flashcard: card(
            format!("Solve: {a}x + {b} = {result}"),
            format!("x = {x} — Subtract {b}, divide by {a}"),
        ),
    }
}

pub(super) fn consecutive_integers(rng: &mut SeededRng) -> GeneratedQuestion {
    let count: i64 = pick_from(rng, &[3, 4, 5]);
    let first: i64 = pick_from(rng, &[10, 12, 15, 20, 25, 30]);
    let offsets = count * (count - 1) / 2;
    let sum = count * first + offsets;
    let remainder = sum - offsets;

    let steps = vec![
        step(
            rng,
            format!("The sum x + (x+1) + ... + (x+{}) simplifies to:", count - 1),
            format!("{count}x + {offsets}"),
            [
                format!("{count}x"),
                format!("{count}x + {count}"),
                format!("x + {count}"),
                format!("{count}x + {}", count * (count + 1) / 2),
            ],
        ),
        step(
            rng,
            format!("{count}x + {offsets} = {sum} → {count}x = ?"),
            remainder,
            [sum, sum - count, sum + count],
        ),
    ];
    let final_choices = make_choices(rng, first, [first - 1, first + 1, first + count], 4);

    GeneratedQuestion {
        question: format!(
            "The sum of {count} consecutive integers is {sum}. What is the smallest integer?"
        ),
        answer: first.into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Consecutive Integers",
            format!(
                "Let x = smallest. Sum = {count}x + {offsets} = {sum}. x = {remainder}/{count} = {first}"
            ),
            vec![
                format!("Let integers be x, x+1, ..., x+{}", count - 1),
                format!("Sum = {count}x + {offsets}"),
                format!("{count}x = {remainder}"),
                format!("x = {first}"),
            ],
            &["Sum of n consecutive = n×(first) + n(n-1)/2"],
        ),
        flashcard: card(
            format!("{count} consecutive integers sum to {sum}. Smallest?"),
            format!("{first} — Let x be smallest, solve {count}x + {offsets} = {sum}"),
        ),
    }
}

pub(super) fn absolute_value(rng: &mut SeededRng) -> GeneratedQuestion {
    let a: i64 = pick_int(rng, 2, 5);
    let k: i64 = pick_int(rng, 2, 6);
    let result = a * k;
    let answer = format!("{k} or -{k}");

    let steps = vec![
        step(
            rng,
            format!("|{a}x| = {result} means {a}x = {result} or {a}x = ?"),
            -result,
            [result as f64, 0.0, scaled(result, 2)],
        ),
        step(
            rng,
            format!("If {a}x = {result}, then x = ?"),
            k,
            [k + 1, -k, result],
        ),
    ];
    let final_choices = make_choices(
        rng,
        answer.clone(),
        [format!("{k} only"), format!("-{k} only"), "0".to_owned()],
        4,
    );

    GeneratedQuestion {
        question: format!("If |{a}x| = {result}, what are the possible values of x?"),
        answer: answer.clone().into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Absolute Value Equations",
            format!(
                "|{a}x| = {result} splits into {a}x = {result} or {a}x = -{result}, so x = {answer}"
            ),
            vec![
                format!("Case 1: {a}x = {result} → x = {k}"),
                format!("Case 2: {a}x = -{result} → x = -{k}"),
            ],
            &["|u| = c (c > 0) ⇒ u = c or u = -c"],
        ),
        flashcard: card(
            format!("Solve |{a}x| = {result}"),
            format!("x = {answer} — Split into the positive and negative case"),
        ),
    }
}

pub(super) fn system_equations(rng: &mut SeededRng) -> GeneratedQuestion {
    let x: i64 = pick_int(rng, 2, 5);
    let others: Vec<i64> = (1..=4).filter(|y| *y != x).collect();
    let y = pick_from(rng, &others);
    let sum = x + y;
    let diff = x - y;

    let steps = vec![
        step(
            rng,
            "Add the two equations. The y terms cancel: 2x = ?".to_owned(),
            2 * x,
            [2 * y, sum * diff, sum],
        ),
        step(rng, format!("2x = {} → x = ?", 2 * x), x, [y, sum, diff]),
    ];
    let final_choices = make_choices(rng, x, [y, sum, x + 1], 4);

    GeneratedQuestion {
        question: format!("If x + y = {sum} and x - y = {diff}, what is x?"),
        answer: x.into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Systems of Equations: Elimination",
            format!(
                "Adding (x + y = {sum}) and (x - y = {diff}) gives 2x = {}, so x = {x} and y = {y}",
                2 * x
            ),
            vec![
                format!("Add equations: 2x = {sum} + {diff} = {}", 2 * x),
                format!("x = {x}"),
                format!("Back-substitute: y = {sum} - {x} = {y}"),
            ],
            &["Elimination: add or subtract equations to cancel a variable"],
        ),
        flashcard: card(
            format!("x + y = {sum}, x - y = {diff}. Find x."),
            format!("x = {x} — Add the equations: 2x = {}", 2 * x),
        ),
    }
}

pub(super) fn integer_equation(rng: &mut SeededRng) -> GeneratedQuestion {
    let a: i64 = pick_from(rng, &[2, 3, 4, 5]);
    let coprime: Vec<i64> = [3, 5, 7]
        .into_iter()
        .filter(|b| *b != a && gcd(a, *b) == 1)
        .collect();
    let b = pick_from(rng, &coprime);
    let n = pick_int(rng, 30, 70);

    let solutions = (1..n / a + 1)
        .filter(|x| {
            let rest = n - a * x;
            rest > 0 && rest % b == 0
        })
        .count() as i64;
    // a and b are coprime, so some x in 1..=b always satisfies the congruence
    let first_x = (1..=b).find(|x| (n - a * x) % b == 0).unwrap_or(1);

    let steps = vec![
        step(
            rng,
            format!("Rewrite {a}x + {b}y = {n} as {b}y = {n} - {a}x. For y ≥ 1 we need {a}x ≤ ?"),
            n - b,
            [n, n - a, n + b],
        ),
        step(
            rng,
            format!("Smallest positive x making ({n} - {a}x) divisible by {b}:"),
            first_x,
            [first_x + 1, first_x + b, b],
        ),
        step(
            rng,
            "Successive solutions for x differ by:".to_owned(),
            b,
            [a, a + b, 1],
        ),
    ];
    let final_choices = make_choices(
        rng,
        solutions,
        [
            solutions + 1,
            solutions + 2,
            solutions * 2 + 1,
            (solutions - 1).max(0),
        ],
        4,
    );

    GeneratedQuestion {
        question: format!(
            "How many positive integer solutions (x, y) does {a}x + {b}y = {n} have?"
        ),
        answer: solutions.into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Linear Diophantine Equations",
            format!(
                "Find the first x with {b} | ({n} - {a}x), then step x by {b} while y stays positive: {solutions} solution(s)"
            ),
            vec![
                format!("First x = {first_x}"),
                format!("x increases by {b}, y decreases by {a}"),
                format!("Count while y ≥ 1: {solutions}"),
            ],
            &["ax + by = n with gcd(a, b) = 1: x steps by b, y steps by a"],
        ),
        flashcard: card(
            format!("Positive integer solutions of {a}x + {b}y = {n}?"),
            format!("{solutions} — x ≡ {first_x} (mod {b}), y must stay ≥ 1"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_equation_counts_positive_solutions() {
        for seed in 0..100 {
            let mut rng = SeededRng::new(seed);
            let q = integer_equation(&mut rng);
            let (a, b, n) = parse_equation(&q.question);
            let brute = (1..n)
                .flat_map(|x| (1..n).map(move |y| (x, y)))
                .filter(|(x, y)| a * x + b * y == n)
                .count();
            assert_eq!(q.answer.to_string(), brute.to_string(), "{}", q.question);
        }
    }

    fn parse_equation(question: &str) -> (i64, i64, i64) {
        let eq = question.split(" does ").nth(1).unwrap();
        let eq = eq.trim_end_matches(" have?");
        let (lhs, n) = eq.split_once(" = ").unwrap();
        let (ax, by) = lhs.split_once(" + ").unwrap();
        (
            ax.trim_end_matches('x').parse().unwrap(),
            by.trim_end_matches('y').parse().unwrap(),
            n.parse().unwrap(),
        )
    }

    #[test]
    fn absolute_value_answer_lists_both_roots() {
        let mut rng = SeededRng::new(7);
        let q = absolute_value(&mut rng);
        let answer = q.answer.to_string();
        let (pos, neg) = answer.split_once(" or ").unwrap();
        assert_eq!(format!("-{pos}"), neg);
    }
}
