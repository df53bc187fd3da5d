//! Percentages, interest, averages, mixtures, profit and factorials.

use super::{GeneratedQuestion, card, num, scaled, sheet, step, thousands};
use crate::choices::{ChoiceValue, make_choices};
use crate::pick::pick_from;
use crate::rng::SeededRng;

pub(super) fn percentage(rng: &mut SeededRng) -> GeneratedQuestion {
    let percent: i64 = pick_from(rng, &[10, 15, 20, 25, 30, 40, 50, 60, 75]);
    let base: i64 = pick_from(rng, &[80, 100, 120, 160, 200, 240, 300, 400, 500]);
    let decimal = scaled(percent, 100);
    let answer = scaled(percent * base, 100);

    let steps = vec![
        step(
            rng,
            format!("To find {percent}% of a number, convert it to a decimal. {percent}% = ?"),
            decimal,
            [percent as f64, scaled(percent, 10), scaled(percent, 1000)],
        ),
        step(
            rng,
            format!("Multiply {} × {base} = ?", num(decimal)),
            answer,
            [answer + 10.0, answer - 10.0, answer * 2.0, base as f64],
        ),
    ];
    let final_choices = make_choices(
        rng,
        answer,
        [answer + 20.0, answer - 20.0, answer * 2.0, (percent + base) as f64],
        5,
    );

    GeneratedQuestion {
        question: format!("What is {percent}% of {base}?"),
        answer: answer.into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Percentage Calculation",
            format!(
                "To find {percent}% of {base}: convert {percent}% to {}, then multiply by {base}.",
                num(decimal)
            ),
            vec![
                format!("Convert: {percent}% = {percent}/100 = {}", num(decimal)),
                format!("Calculate: {} × {base} = {}", num(decimal), num(answer)),
            ],
            &["X% of N = (X/100) × N"],
        ),
        flashcard: card(
            format!("What is {percent}% of {base}?"),
            format!(
                "{} — Convert to decimal ({}) and multiply by {base}.",
                num(answer),
                num(decimal)
            ),
        ),
    }
}

pub(super) fn simple_interest(rng: &mut SeededRng) -> GeneratedQuestion {
    let principal: i64 = pick_from(rng, &[1000, 2000, 2500, 3000, 4000, 5000]);
    let rate: i64 = pick_from(rng, &[2, 3, 4, 5, 6, 8, 10]);
    let years: i64 = pick_from(rng, &[2, 3, 4, 5]);
    let r = scaled(rate, 100);
    let yearly = principal * rate / 100;
    let interest = yearly * years;

    let steps = vec![
        step(
            rng,
            format!("The simple interest formula is I = P × r × t. What is r for {rate}%?"),
            r,
            [rate as f64, scaled(rate, 10), (rate * 100) as f64],
        ),
        step(
            rng,
            format!("Calculate P × r = ${principal} × {} = ?", num(r)),
            yearly,
            [principal + rate, principal - rate, principal],
        ),
        step(
            rng,
            format!("Multiply by time: ${yearly} × {years} = ?"),
            interest,
            [interest + 100, interest - 50, interest * 2],
        ),
    ];
    let final_choices = make_choices(
        rng,
        interest as f64,
        [
            (interest + principal) as f64,
            principal as f64,
            (interest * 2) as f64,
            scaled(interest, 2),
        ],
        5,
    );

    GeneratedQuestion {
        question: format!(
            "If ${principal} is invested at {rate}% simple annual interest, how much interest is earned after {years} years?"
        ),
        answer: interest.into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Simple Interest",
            format!("I = P × r × t = ${principal} × {} × {years} = ${interest}", num(r)),
            vec![
                format!("P = ${principal}"),
                format!("r = {rate}% = {}", num(r)),
                format!("t = {years} years"),
                format!("I = {principal} × {} × {years} = ${interest}", num(r)),
            ],
            &["I = P × r × t"],
        ),
        flashcard: card(
            format!("Simple interest on ${principal} at {rate}% for {years} years?"),
            format!("${interest} — I = P×r×t = {principal}×{}×{years}", num(r)),
        ),
    }
}

pub(super) fn weighted_average(rng: &mut SeededRng) -> GeneratedQuestion {
    let n1: i64 = pick_from(rng, &[2, 3, 4]);
    let n2: i64 = pick_from(rng, &[1, 2]);
    let n3: i64 = pick_from(rng, &[2, 3, 4]);
    let v1 = pick_from::<i64>(rng, &[12, 14, 15, 16]) * 1000;
    let v2 = pick_from::<i64>(rng, &[16, 17, 18]) * 1000;
    let v3 = pick_from::<i64>(rng, &[17, 18, 19, 20]) * 1000;
    let total = n1 + n2 + n3;
    let sum = n1 * v1 + n2 * v2 + n3 * v3;
    let avg = scaled(sum, total).round() as i64;
    let rounded = scaled(avg, 100).round() as i64 * 100;

    let steps = vec![
        step(
            rng,
            format!(
                "Calculate total salary: {n1}×${} + {n2}×${} + {n3}×${} = ?",
                thousands(v1),
                thousands(v2),
                thousands(v3)
            ),
            sum,
            [sum + 1000, sum - 1000, sum + 5000],
        ),
        step(
            rng,
            format!("Average = ${} ÷ {total} = ? (nearest dollar)", thousands(sum)),
            avg,
            [avg + 500, avg - 500, avg + 1000],
        ),
    ];
    let final_choices = make_choices(
        rng,
        rounded,
        [rounded + 200, rounded - 200, rounded + 500, rounded - 500],
        5,
    );

    GeneratedQuestion {
        question: format!(
            "A bakery has {total} employees: {n1} earn ${}, {n2} earn ${}, and {n3} earn ${}. What is the average salary (rounded to the nearest $100)?",
            thousands(v1),
            thousands(v2),
            thousands(v3)
        ),
        answer: rounded.into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Weighted Average",
            format!(
                "Total salary = ${}, employees = {total}, avg ≈ ${}",
                thousands(sum),
                thousands(rounded)
            ),
            vec![
                format!("Sum: {n1}×{v1} + {n2}×{v2} + {n3}×{v3} = {sum}"),
                format!("Average: {sum} ÷ {total} = {avg}"),
                format!("Rounded: ${rounded}"),
            ],
            &["Average = Total Sum / Count"],
        ),
        flashcard: card(
            format!("{total} employees earning ${v1}/${v2}/${v3}. Average?"),
            format!("≈${} — Total ${} ÷ {total}", thousands(rounded), thousands(sum)),
        ),
    }
}

pub(super) fn mixture(rng: &mut SeededRng) -> GeneratedQuestion {
    let total: i64 = pick_from(rng, &[200, 250, 300, 400]);
    let pct_x: i64 = pick_from(rng, &[10, 12, 15, 20]);
    let pct_y: i64 = pick_from(rng, &[25, 30, 35, 40]);
    let amounts: Vec<i64> = [80, 100, 120, 140, 160]
        .into_iter()
        .filter(|x| *x < total)
        .collect();
    let amt_x = pick_from(rng, &amounts);
    let amt_y = total - amt_x;
    // protein in hundredths of a gram
    let from_x = pct_x * amt_x;
    let from_y = pct_y * amt_y;
    let combined = from_x + from_y;
    let grams = scaled(combined, 100);

    let steps = vec![
        step(
            rng,
            format!("Protein from X = {pct_x}% of {amt_x}g = ?"),
            scaled(from_x, 100),
            [amt_x as f64, pct_x as f64, scaled(from_x, 10)],
        ),
        step(
            rng,
            format!(
                "Food Y = {total} − {amt_x} = {amt_y}g. Protein from Y = {pct_y}% of {amt_y}g = ?"
            ),
            scaled(from_y, 100),
            [amt_y as f64, pct_y as f64, scaled(from_y, 10)],
        ),
    ];
    let final_choices = make_choices(
        rng,
        grams,
        [
            scaled(combined + 500, 100),
            scaled(combined - 500, 100),
            total as f64,
            scaled((pct_x + pct_y) * total, 200),
        ],
        4,
    );

    GeneratedQuestion {
        question: format!(
            "A {total}g mixture contains food X ({pct_x}% protein) and food Y ({pct_y}% protein). If there are {amt_x}g of food X, how many grams of protein are in the mixture?"
        ),
        answer: grams.into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Mixture Problems",
            format!(
                "X: {amt_x}g at {pct_x}% = {}g protein. Y: {amt_y}g at {pct_y}% = {}g protein.",
                num(scaled(from_x, 100)),
                num(scaled(from_y, 100))
            ),
            vec![
                format!(
                    "Protein from X: {} × {amt_x} = {}",
                    num(scaled(pct_x, 100)),
                    num(scaled(from_x, 100))
                ),
                format!(
                    "Protein from Y: {} × {amt_y} = {}",
                    num(scaled(pct_y, 100)),
                    num(scaled(from_y, 100))
                ),
                format!("Total: {}g", num(grams)),
            ],
            &["Total = (%₁ × amt₁) + (%₂ × amt₂)"],
        ),
        flashcard: card(
            format!("{amt_x}g at {pct_x}% + {amt_y}g at {pct_y}%. Total protein?"),
            format!("{}g — Add protein from each component", num(grams)),
        ),
    }
}

pub(super) fn profit_loss(rng: &mut SeededRng) -> GeneratedQuestion {
    let cost: i64 = pick_from(rng, &[50, 80, 100, 120, 150, 200]);
    let profit_pct: i64 = pick_from(rng, &[10, 15, 20, 25, 30, 40]);
    // cents
    let profit_c = cost * profit_pct;
    let sell_c = cost * 100 + profit_c;
    let profit = scaled(profit_c, 100);
    let sell = scaled(sell_c, 100);

    let steps = vec![
        step(
            rng,
            format!("Calculate {profit_pct}% of ${cost}:"),
            profit,
            [scaled(profit_c + 500, 100), cost as f64, profit_pct as f64],
        ),
        step(
            rng,
            format!("Selling price = Cost + Profit = ${cost} + ${} = ?", num(profit)),
            sell,
            [scaled(sell_c + 1000, 100), cost as f64, profit],
        ),
    ];
    let final_choices = make_choices(
        rng,
        sell,
        [
            scaled(sell_c + 2000, 100),
            (cost + profit_pct) as f64,
            (cost * 2) as f64,
        ],
        4,
    );

    GeneratedQuestion {
        question: format!(
            "An item costs ${cost}. If sold at {profit_pct}% profit, what is the selling price?"
        ),
        answer: sell.into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Profit Calculation",
            format!(
                "Cost = ${cost}, Profit = {profit_pct}% = ${}, Selling Price = ${}",
                num(profit),
                num(sell)
            ),
            vec![
                format!(
                    "Profit = {} × ${cost} = ${}",
                    num(scaled(profit_pct, 100)),
                    num(profit)
                ),
                format!("Selling Price = ${cost} + ${} = ${}", num(profit), num(sell)),
            ],
            &["Profit = Cost × Profit%", "SP = Cost + Profit"],
        ),
        flashcard: card(
            format!("${cost} cost, {profit_pct}% profit. Selling price?"),
            format!("${} — Profit = ${}, add to cost", num(sell), num(profit)),
        ),
    }
}

pub(super) fn factorial_basic(rng: &mut SeededRng) -> GeneratedQuestion {
    let n: i64 = pick_from(rng, &[4, 5, 6]);
    let prev = n - 1;
    let factorial: i64 = (2..=n).product();
    let factorial_prev: i64 = (2..=prev).product();

    let steps = vec![
        step(
            rng,
            format!("{n}! = {n} × {prev}!. So {n}!/{prev}! = ?"),
            n,
            [prev, factorial, n + 1],
        ),
        step(
            rng,
            format!(
                "Verify: {n}! = {factorial}, {prev}! = {factorial_prev}. {factorial}/{factorial_prev} = ?"
            ),
            factorial / factorial_prev,
            [n - 1, n + 1, factorial_prev],
        ),
    ];
    let final_choices = make_choices(rng, n, [factorial / n, prev, n * 2], 4);

    GeneratedQuestion {
        question: format!("What is {n}! ÷ {prev}!?"),
        answer: ChoiceValue::from(factorial / factorial_prev),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Factorial Division",
            format!("{n}!/{prev}! = {n} because {n}! = {n} × {prev}!"),
            vec![format!("{n}! = {n} × {prev}!"), format!("{n}!/{prev}! = {n}")],
            &["n!/(n-1)! = n"],
        ),
        flashcard: card(
            format!("{n}! ÷ {prev}! = ?"),
            format!("{n} — n! = n × (n-1)!"),
        ),
    }
}
