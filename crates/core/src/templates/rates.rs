//! Distance, work and speed problems.

use super::{GeneratedQuestion, card, num, ratio, scaled, sheet, step};
use crate::choices::make_choices;
use crate::pick::pick_from;
use crate::rng::SeededRng;

pub(super) fn distance_rate_time(rng: &mut SeededRng) -> GeneratedQuestion {
    let speed: i64 = pick_from(rng, &[30, 40, 45, 50, 55, 60, 65, 70, 75, 80]);
    let hours: i64 = pick_from(rng, &[2, 3, 4, 5, 6, 8]);
    let distance = speed * hours;

    let steps = vec![
        step(
            rng,
            "The formula for average speed is:".to_owned(),
            "Distance ÷ Time",
            ["Distance × Time", "Time ÷ Distance", "Distance + Time"],
        ),
        step(
            rng,
            format!("Calculate: {distance} miles ÷ {hours} hours = ?"),
            speed,
            [speed + 10, speed - 10, distance, hours],
        ),
    ];
    let final_choices = make_choices(
        rng,
        speed,
        [speed + 5, speed - 5, speed + 15, speed - 15],
        5,
    );

    GeneratedQuestion {
        question: format!(
            "A car travels {distance} miles in {hours} hours. What is the car's average speed in miles per hour?"
        ),
        answer: speed.into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Distance, Rate, and Time",
            format!("Speed = Distance / Time = {distance} / {hours} = {speed} mph"),
            vec![
                format!("Distance = {distance} miles"),
                format!("Time = {hours} hours"),
                format!("Speed = {distance} ÷ {hours} = {speed} mph"),
            ],
            &["Speed = Distance / Time", "Distance = Speed × Time"],
        ),
        flashcard: card(
            format!("A car travels {distance} miles in {hours} hours. What's the speed?"),
            format!("{speed} mph — Speed = Distance / Time = {distance}/{hours}"),
        ),
    }
}

pub(super) fn work_rate(rng: &mut SeededRng) -> GeneratedQuestion {
    let time_a: i64 = pick_from(rng, &[4, 5, 6, 8, 10]);
    let others: Vec<i64> = [3, 4, 5, 6, 8]
        .into_iter()
        .filter(|t| *t != time_a)
        .collect();
    let time_b = pick_from(rng, &others);
    let product = time_a * time_b;
    let sum = time_a + time_b;
    // combined time in tenths of an hour
    let tenths = scaled(product * 10, sum).round() as i64;
    let combined = scaled(tenths, 10);

    let steps = vec![
        step(
            rng,
            format!(
                "A's rate = 1/{time_a} job/hr. B's rate = 1/{time_b} job/hr. Combined rate = ?"
            ),
            format!("1/{time_a} + 1/{time_b}"),
            [
                format!("1/{time_a} − 1/{time_b}"),
                format!("1/{time_a} × 1/{time_b}"),
                format!("{time_a} + {time_b}"),
            ],
        ),
        step(
            rng,
            format!("1/{time_a} + 1/{time_b} = {time_b}/{product} + {time_a}/{product} = ?"),
            ratio(sum, product),
            [ratio(product, sum), ratio(1, sum), ratio(time_a, time_b)],
        ),
    ];
    let final_choices = make_choices(
        rng,
        combined,
        [
            scaled(tenths + 10, 10),
            scaled(tenths - 5, 10),
            sum as f64,
            scaled(sum, 2),
        ],
        4,
    );

    GeneratedQuestion {
        question: format!(
            "Worker A completes a job in {time_a} hours, Worker B in {time_b} hours. Working together, how many hours to complete the job (to the nearest tenth)?"
        ),
        answer: combined.into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Combined Work Rate",
            format!(
                "A: {time_a}h, B: {time_b}h. Together: {product}/{sum} ≈ {}h",
                num(combined)
            ),
            vec![
                format!("Rate A = 1/{time_a}"),
                format!("Rate B = 1/{time_b}"),
                format!("Combined = {}", ratio(sum, product)),
                format!("Time = {product}/{sum} ≈ {}", num(combined)),
            ],
            &["Combined Time = (A×B)/(A+B)"],
        ),
        flashcard: card(
            format!("A: {time_a}h alone, B: {time_b}h alone. Together?"),
            format!("≈{} hours — Use formula (A×B)/(A+B)", num(combined)),
        ),
    }
}

pub(super) fn average_speed_trip(rng: &mut SeededRng) -> GeneratedQuestion {
    let speed1: i64 = pick_from(rng, &[30, 40, 50, 60]);
    let returns: Vec<i64> = [40, 50, 60, 80]
        .into_iter()
        .filter(|s| *s != speed1)
        .collect();
    let speed2 = pick_from(rng, &returns);
    let distance: i64 = pick_from(rng, &[60, 80, 100, 120]);

    // leg times in hundredths of an hour
    let leg1 = scaled(distance * 100, speed1).round() as i64;
    let leg2 = scaled(distance * 100, speed2).round() as i64;
    let avg_tenths = scaled(20 * speed1 * speed2, speed1 + speed2).round() as i64;
    let avg = scaled(avg_tenths, 10);

    let steps = vec![
        step(
            rng,
            format!(
                "Time for first leg = {distance}/{speed1} ≈ {} hours. Time for return = {distance}/{speed2} ≈ ? (hours)",
                num(scaled(leg1, 100))
            ),
            scaled(leg2, 100),
            [scaled(leg1, 100), distance as f64, speed2 as f64],
        ),
        step(
            rng,
            format!(
                "Total distance = 2 × {distance} = {}. Total time ≈ {} + {} = ?",
                2 * distance,
                num(scaled(leg1, 100)),
                num(scaled(leg2, 100))
            ),
            scaled(leg1 + leg2, 100),
            [
                scaled(2 * leg1, 100),
                scaled(distance * 100, (speed1 + speed2) * 100),
                distance as f64,
            ],
        ),
    ];
    let final_choices = make_choices(
        rng,
        avg,
        [
            scaled(speed1 + speed2, 2),
            scaled(avg_tenths + 50, 10),
            scaled(avg_tenths - 50, 10),
        ],
        4,
    );

    GeneratedQuestion {
        question: format!(
            "A car travels {distance} miles at {speed1} mph, then returns the same distance at {speed2} mph. What is the average speed for the round trip (to the nearest tenth)?"
        ),
        answer: avg.into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Average Speed for Round Trip",
            format!(
                "Going {speed1} mph, returning {speed2} mph. Avg ≠ ({speed1}+{speed2})/2! Use: 2×{speed1}×{speed2}/({speed1}+{speed2}) ≈ {}",
                num(avg)
            ),
            vec![
                "Formula: 2×s₁×s₂/(s₁+s₂)".to_owned(),
                format!("= 2×{speed1}×{speed2}/{}", speed1 + speed2),
                format!("≈ {} mph", num(avg)),
            ],
            &["Avg Speed = 2ab/(a+b) for same distance"],
        ),
        flashcard: card(
            format!("{distance}mi at {speed1}mph, return at {speed2}mph. Avg speed?"),
            format!(
                "{} mph — Use harmonic mean: 2×{speed1}×{speed2}/({speed1}+{speed2})",
                num(avg)
            ),
        ),
    }
}

pub(super) fn speed_conversion(rng: &mut SeededRng) -> GeneratedQuestion {
    let kmh: i64 = pick_from(rng, &[36, 54, 72, 90, 108, 126, 144]);
    let ms = kmh * 5 / 18;
    let inverted = scaled(kmh * 18, 5);
    let per_minute = kmh * 50 / 3;

    let steps = vec![
        step(
            rng,
            "1 km/h = 1000 m ÷ 3600 s. As a reduced fraction, 1 km/h equals how many m/s?"
                .to_owned(),
            ratio(1000, 3600),
            [ratio(3600, 1000), ratio(1000, 60), ratio(1, 60)],
        ),
        step(
            rng,
            format!("{kmh} × 5/18 = ?"),
            ms,
            [inverted, per_minute as f64, scaled(kmh, 60)],
        ),
    ];
    let final_choices = make_choices(
        rng,
        ms,
        [inverted, per_minute as f64, (ms * 2) as f64, (ms + 5) as f64],
        5,
    );

    GeneratedQuestion {
        question: format!(
            "A train travels at {kmh} km/h. What is its speed in meters per second?"
        ),
        answer: ms.into(),
        steps,
        final_choices,
        cheatsheet: sheet(
            "Speed Unit Conversion",
            format!("{kmh} km/h × 1000/3600 = {kmh} × 5/18 = {ms} m/s"),
            vec![
                "1 km = 1000 m, 1 h = 3600 s".to_owned(),
                "1 km/h = 5/18 m/s".to_owned(),
                format!("{kmh} × 5/18 = {ms}"),
            ],
            &["km/h → m/s: × 5/18", "m/s → km/h: × 18/5"],
        ),
        flashcard: card(
            format!("{kmh} km/h in m/s?"),
            format!("{ms} m/s — Multiply by 5/18"),
        ),
    }
}
