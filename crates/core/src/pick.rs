//! Parameter pickers drawn from a [`SeededRng`].

use std::fmt;

use crate::rng::SeededRng;

/// Integer in `[min, max]`, inclusive on both ends.
///
/// Returns `min` when the range is empty.
pub fn pick_int(rng: &mut SeededRng, min: i64, max: i64) -> i64 {
    if max < min {
        return min;
    }
    let span = (max - min + 1) as f64;
    (rng.next_f64() * span).floor() as i64 + min
}

/// Uniformly selected element.
///
/// # Panics
///
/// Panics if `items` is empty.
pub fn pick_from<T: Clone>(rng: &mut SeededRng, items: &[T]) -> T {
    let idx = (rng.next_f64() * items.len() as f64).floor() as usize;
    items[idx].clone()
}

/// Fisher–Yates shuffle into a new vector; `items` is left untouched.
#[must_use]
pub fn shuffle<T: Clone>(rng: &mut SeededRng, items: &[T]) -> Vec<T> {
    let mut result = items.to_vec();
    for i in (1..result.len()).rev() {
        let j = (rng.next_f64() * (i + 1) as f64).floor() as usize;
        result.swap(i, j);
    }
    result
}

/// Greatest common divisor on absolute values. `gcd(0, 0) == 0`.
#[must_use]
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// A fraction kept in lowest terms with a positive denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    num: i64,
    den: i64,
}

impl Fraction {
    /// Reduce `num/den`. Returns `None` for a zero denominator.
    #[must_use]
    pub fn reduced(num: i64, den: i64) -> Option<Self> {
        if den == 0 {
            return None;
        }
        let g = gcd(num, den).max(1);
        let sign = if den < 0 { -1 } else { 1 };
        Some(Self {
            num: sign * num / g,
            den: sign * den / g,
        })
    }

    #[must_use]
    pub fn num(&self) -> i64 {
        self.num
    }

    #[must_use]
    pub fn den(&self) -> i64 {
        self.den
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_int_is_inclusive() {
        let mut rng = SeededRng::new(3);
        let mut seen = [false; 4];
        for _ in 0..500 {
            let v = pick_int(&mut rng, 2, 5);
            assert!((2..=5).contains(&v));
            seen[(v - 2) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn pick_int_empty_range_returns_min() {
        let mut rng = SeededRng::new(3);
        assert_eq!(pick_int(&mut rng, 9, 1), 9);
    }

    #[test]
    fn pick_from_covers_all_items() {
        let mut rng = SeededRng::new(11);
        let items = ["a", "b", "c"];
        let mut hits = std::collections::HashSet::new();
        for _ in 0..200 {
            hits.insert(pick_from(&mut rng, &items));
        }
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn shuffle_keeps_input_and_permutes() {
        let items: Vec<u32> = (0..20).collect();
        let mut rng = SeededRng::new(42);
        let shuffled = shuffle(&mut rng, &items);

        assert_eq!(items, (0..20).collect::<Vec<_>>());
        let mut sorted = shuffled.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, items);
        assert_ne!(shuffled, items);
    }

    #[test]
    fn shuffle_is_reproducible() {
        let items = vec!['x', 'y', 'z', 'w'];
        let a = shuffle(&mut SeededRng::new(8), &items);
        let b = shuffle(&mut SeededRng::new(8), &items);
        assert_eq!(a, b);
    }

    #[test]
    fn gcd_uses_absolute_values() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(-12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(gcd(9, 28), 1);
    }

    #[test]
    fn fraction_reduces_and_normalizes_sign() {
        let f = Fraction::reduced(12, -18).unwrap();
        assert_eq!(f.to_string(), "-2/3");
        assert_eq!(Fraction::reduced(15, 35).unwrap().to_string(), "3/7");
        assert!(Fraction::reduced(1, 0).is_none());
    }
}
