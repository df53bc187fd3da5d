//! Integrated-reasoning scenarios built on small business setups.

use super::{GeneratedQuestion, card, sheet, step};
use crate::choices::make_choices;
use crate::pick::{pick_from, pick_int};
use crate::rng::SeededRng;

pub(super) fn employee_count(rng: &mut SeededRng) -> GeneratedQuestion {
    let sales: i64 = pick_from(rng, &[15, 20, 25, 30, 35, 40, 45]);
    let diff: i64 = pick_from(rng, &[4, 6, 8, 10, 12]);
    let engineering = 2 * sales + diff;
    let total = sales + engineering;

    let steps = vec![
        step(
            rng,
            format!(
                "Let S = sales staff. Engineering has {diff} more than twice sales, so E = ?"
            ),
            format!("2S + {diff}"),
            [
                format!("S + {diff}"),
                format!("2S - {diff}"),
                format!("2(S + {diff})"),
            ],
        ),
        step(
            rng,
            format!("S + (2S + {diff}) = {total} simplifies to 3S = ?"),
            total - diff,
            [total, total + diff, total - 2 * diff],
        ),
    ];
    let final_choices = make_choices(rng, sales, [engineering, total / 2, sales + diff], 4);

    GeneratedQuestion {
        question: format!(
            "A company has {total} employees in sales and engineering. Engineering has {diff} more than twice as many employees as sales. How many employees work in sales?"
        ),
        answer: sales.into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Setting Up Linear Systems",
            format!(
                "S + E = {total}, E = 2S + {diff}. Substitute: 3S + {diff} = {total}, S = {sales}"
            ),
            vec![
                format!("E = 2S + {diff}"),
                format!("S + 2S + {diff} = {total}"),
                format!("3S = {}", total - diff),
                format!("S = {sales}, E = {engineering}"),
            ],
            &["Translate each sentence into one equation", "Substitute to eliminate"],
        ),
        flashcard: card(
            format!("{total} staff, engineering = 2 × sales + {diff}. Sales?"),
            format!("{sales} — Solve 3S + {diff} = {total}"),
        ),
    }
}

pub(super) fn bonus_optimization(rng: &mut SeededRng) -> GeneratedQuestion {
    let bonus: i64 = pick_from(rng, &[200, 250, 300, 400, 500]);
    let managers = pick_int(rng, 2, 5);
    let staff = pick_int(rng, 6, 20);
    let leftover: i64 = pick_from(rng, &[0, 50, 100, 150]);
    let manager_share = 2 * bonus * managers;
    let pool = manager_share + bonus * staff + leftover;
    let remaining = pool - manager_share;

    let steps = vec![
        step(
            rng,
            format!(
                "Each of the {managers} managers receives 2 × ${bonus}. Total paid to managers = ?"
            ),
            manager_share,
            [bonus * managers, manager_share + bonus, pool],
        ),
        step(
            rng,
            format!("Pool left for staff = ${pool} - ${manager_share} = ?"),
            remaining,
            [pool, remaining + bonus, manager_share],
        ),
        step(
            rng,
            format!("Staff bonuses that fit in ${remaining} at ${bonus} each (whole bonuses only):"),
            staff,
            [staff + 1, staff - 1, remaining / 100],
        ),
    ];
    let final_choices = make_choices(
        rng,
        staff,
        [(pool - bonus * managers) / bonus, pool / bonus, staff + 1],
        4,
    );

    GeneratedQuestion {
        question: format!(
            "A ${pool} bonus pool pays each of {managers} managers double the staff bonus of ${bonus}. What is the maximum number of staff members who can receive the full ${bonus} bonus?"
        ),
        answer: staff.into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Budget Allocation",
            format!(
                "Managers take 2 × {bonus} × {managers} = ${manager_share}. Remaining ${remaining} ÷ ${bonus} = {staff} full staff bonuses"
            ),
            vec![
                format!("Manager total: ${manager_share}"),
                format!("Remaining: ${pool} - ${manager_share} = ${remaining}"),
                format!("Staff: ⌊{remaining} / {bonus}⌋ = {staff}"),
            ],
            &["Reserve fixed commitments first", "Use floor division for whole units"],
        ),
        flashcard: card(
            format!("${pool} pool, {managers} managers at 2×${bonus}. Max staff at ${bonus}?"),
            format!("{staff} — ⌊({pool} - {manager_share}) / {bonus}⌋"),
        ),
    }
}
