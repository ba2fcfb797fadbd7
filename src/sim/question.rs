//! Question generation
//!
//! Produces a prompt, an exact correct answer, and two distinct distractors.
//! Deterministic: all randomness comes from the caller's seeded RNG, so a
//! fixed seed reproduces the same question stream.

use rand::Rng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::fraction::Fraction;
use crate::consts::ANSWER_CHOICES;

/// Question categories, drawn uniformly when none is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Fraction,
    Decimal,
    Percentage,
    Algebra,
    Measurement,
    Geometry,
    Statistics,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Fraction,
        Category::Decimal,
        Category::Percentage,
        Category::Algebra,
        Category::Measurement,
        Category::Geometry,
        Category::Statistics,
    ];
}

/// Difficulty tier: `Dungeon` widens operand ranges and adds harder forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Standard,
    Dungeon,
}

/// An exact answer value.
///
/// Decimals are fixed-point hundredths (`Decimal(725)` is 7.25) so the
/// "round to 2 decimal places" rule and answer comparison are exact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    Decimal(i64),
    Fraction(Fraction),
}

/// Integer division rounding half away from zero; `d` must be positive
fn round_div(n: i64, d: i64) -> i64 {
    debug_assert!(d > 0);
    if n >= 0 { (n + d / 2) / d } else { -((-n + d / 2) / d) }
}

fn format_hundredths(h: i64) -> String {
    let sign = if h < 0 { "-" } else { "" };
    let abs = h.abs();
    let (int, frac) = (abs / 100, abs % 100);
    if frac == 0 {
        format!("{sign}{int}")
    } else if frac % 10 == 0 {
        format!("{sign}{int}.{}", frac / 10)
    } else {
        format!("{sign}{int}.{frac:02}")
    }
}

impl Value {
    /// Canonical rational form (numerator, positive denominator)
    fn as_rational(&self) -> (i64, i64) {
        match *self {
            Value::Int(v) => (v, 1),
            Value::Decimal(h) => (h, 100),
            Value::Fraction(f) => (f.numer(), f.denom()),
        }
    }

    /// Scale by `n/d`, staying exact where possible and rounding decimals
    /// to the nearest hundredth otherwise
    fn mul_ratio(&self, n: i64, d: i64) -> Value {
        match *self {
            Value::Int(v) => {
                if (v * n) % d == 0 {
                    Value::Int(v * n / d)
                } else {
                    Value::Decimal(round_div(v * n * 100, d))
                }
            }
            Value::Decimal(h) => Value::Decimal(round_div(h * n, d)),
            Value::Fraction(f) => Value::Fraction(f * Fraction::new(n, d)),
        }
    }

    /// Offset by a whole number, preserving representation
    fn add_int(&self, k: i64) -> Value {
        match *self {
            Value::Int(v) => Value::Int(v + k),
            Value::Decimal(h) => Value::Decimal(h + k * 100),
            Value::Fraction(f) => Value::Fraction(f + Fraction::from_int(k)),
        }
    }
}

// Numeric equality across representations: Int(2) == Decimal(200), so a
// distractor can never silently duplicate the correct answer on screen.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        let (an, ad) = self.as_rational();
        let (bn, bd) = other.as_rational();
        (an as i128) * (bd as i128) == (bn as i128) * (ad as i128)
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Decimal(h) => write!(f, "{}", format_hundredths(*h)),
            Value::Fraction(r) => write!(f, "{r}"),
        }
    }
}

/// A generated question, immutable once displayed until replaced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub correct: Value,
    /// Display-ordered answer set: the correct value plus 2 distractors
    pub answers: Vec<Value>,
}

impl Question {
    pub fn is_correct(&self, index: usize) -> bool {
        self.answers.get(index).is_some_and(|a| *a == self.correct)
    }

    /// Position of the correct answer in the shuffled set
    pub fn correct_index(&self) -> usize {
        self.answers
            .iter()
            .position(|a| *a == self.correct)
            .unwrap_or(0)
    }
}

/// Generate a question from a uniformly drawn category
pub fn generate(rng: &mut Pcg32, difficulty: Difficulty) -> Question {
    let category = Category::ALL[rng.random_range(0..Category::ALL.len())];
    generate_in(rng, difficulty, category)
}

/// Generate a question in a specific category
pub fn generate_in(rng: &mut Pcg32, difficulty: Difficulty, category: Category) -> Question {
    let (prompt, correct) = match category {
        Category::Fraction => fraction_question(rng, difficulty),
        Category::Decimal => decimal_question(rng, difficulty),
        Category::Percentage => percentage_question(rng, difficulty),
        Category::Algebra => algebra_question(rng, difficulty),
        Category::Measurement => measurement_question(rng, difficulty),
        Category::Geometry => geometry_question(rng, difficulty),
        Category::Statistics => statistics_question(rng, difficulty),
    };

    let mut answers = Vec::with_capacity(ANSWER_CHOICES);
    answers.push(correct);
    answers.extend(distractors_for(rng, &correct));
    answers.shuffle(rng);

    Question {
        prompt,
        correct,
        answers,
    }
}

const OPS: [char; 4] = ['+', '-', '×', '÷'];

fn fraction_question(rng: &mut Pcg32, difficulty: Difficulty) -> (String, Value) {
    let (nlo, nhi, dlo, dhi) = match difficulty {
        Difficulty::Standard => (1, 5, 2, 8),
        Difficulty::Dungeon => (3, 8, 4, 12),
    };
    let a = Fraction::new(rng.random_range(nlo..=nhi), rng.random_range(dlo..=dhi));
    let op = OPS[rng.random_range(0..OPS.len())];
    let mut b = Fraction::new(rng.random_range(nlo..=nhi), rng.random_range(dlo..=dhi));
    if op == '÷' {
        // Zero-divisor guard (numerator ranges start above zero, but the
        // guard must hold even if the ranges change)
        while b.is_zero() {
            b = Fraction::new(rng.random_range(nlo..=nhi), rng.random_range(dlo..=dhi));
        }
    }

    let answer = match op {
        '+' => a + b,
        '-' => a - b,
        '×' => a * b,
        _ => a / b,
    };
    let prompt = match difficulty {
        Difficulty::Standard => format!("{a} {op} {b} = ?"),
        Difficulty::Dungeon => format!("Simplify: {a} {op} {b} = ?"),
    };
    (prompt, Value::Fraction(answer))
}

fn decimal_question(rng: &mut Pcg32, difficulty: Difficulty) -> (String, Value) {
    // Operands in hundredths
    let (alo, ahi, blo, bhi, suffix) = match difficulty {
        Difficulty::Standard => (100, 1000, 100, 500, ""),
        Difficulty::Dungeon => (500, 2000, 200, 1000, " (2 decimal places)"),
    };
    let a: i64 = rng.random_range(alo..=ahi);
    let op = OPS[rng.random_range(0..OPS.len())];
    let mut b: i64 = rng.random_range(blo..=bhi);
    if op == '÷' {
        while b == 0 {
            b = rng.random_range(blo..=bhi);
        }
    }

    let answer = match op {
        '+' => a + b,
        '-' => a - b,
        '×' => round_div(a * b, 100),
        _ => round_div(a * 100, b),
    };
    let prompt = format!(
        "{} {op} {} = ?{suffix}",
        format_hundredths(a),
        format_hundredths(b)
    );
    (prompt, Value::Decimal(answer))
}

fn percentage_question(rng: &mut Pcg32, difficulty: Difficulty) -> (String, Value) {
    let (percent, amount) = match difficulty {
        Difficulty::Standard => (rng.random_range(5..=30) * 5, rng.random_range(10..=200)),
        Difficulty::Dungeon => (rng.random_range(15..=40) * 5, rng.random_range(50..=300)),
    };

    if rng.random_bool(0.5) {
        let prompt = format!("{percent}% of {amount} = ?");
        (prompt, Value::Decimal(amount * percent))
    } else {
        match difficulty {
            Difficulty::Standard => {
                let prompt = format!("{amount} increased by {percent}% = ?");
                (prompt, Value::Decimal(amount * (100 + percent)))
            }
            Difficulty::Dungeon => {
                let prompt =
                    format!("{amount} increased by {percent}% then decreased by {percent}% = ?");
                let hundredths = round_div(amount * (100 + percent) * (100 - percent), 100);
                (prompt, Value::Decimal(hundredths))
            }
        }
    }
}

fn algebra_question(rng: &mut Pcg32, difficulty: Difficulty) -> (String, Value) {
    match difficulty {
        Difficulty::Standard => {
            let x: i64 = rng.random_range(2..=6);
            let coeff: i64 = rng.random_range(2..=5);
            let constant: i64 = rng.random_range(1..=10);
            let prompt = format!("If {coeff}x + {constant} = {}, x = ?", coeff * x + constant);
            (prompt, Value::Int(x))
        }
        Difficulty::Dungeon => {
            let x: i64 = rng.random_range(3..=8);
            let coeff: i64 = rng.random_range(3..=7);
            let constant: i64 = rng.random_range(5..=15);
            if rng.random_bool(0.5) {
                let prompt =
                    format!("Solve for x: {coeff}x + {constant} = {}", coeff * x + constant);
                (prompt, Value::Int(x))
            } else {
                let prompt = format!(
                    "Solve for x: {coeff}(x + {constant}) = {}",
                    coeff * (x + constant + 1)
                );
                (prompt, Value::Int(x + 1))
            }
        }
    }
}

fn measurement_question(rng: &mut Pcg32, difficulty: Difficulty) -> (String, Value) {
    match difficulty {
        Difficulty::Standard => {
            let l: i64 = rng.random_range(5..=15);
            let w: i64 = rng.random_range(3..=10);
            if rng.random_bool(0.5) {
                let prompt = format!("Area of {l}cm × {w}cm rectangle (cm²)?");
                (prompt, Value::Int(l * w))
            } else {
                let prompt = format!("Perimeter of {l}cm × {w}cm rectangle (cm)?");
                (prompt, Value::Int(2 * (l + w)))
            }
        }
        Difficulty::Dungeon => {
            let l: i64 = rng.random_range(8..=20);
            let w: i64 = rng.random_range(5..=15);
            let h: i64 = rng.random_range(4..=10);
            if rng.random_bool(0.5) {
                let prompt = format!("Volume of {l}cm × {w}cm × {h}cm box (cm³)?");
                (prompt, Value::Int(l * w * h))
            } else {
                let prompt = format!("Surface area of {l}cm × {w}cm × {h}cm box (cm²)?");
                (prompt, Value::Int(2 * (l * w + l * h + w * h)))
            }
        }
    }
}

fn geometry_question(rng: &mut Pcg32, difficulty: Difficulty) -> (String, Value) {
    const SHAPES: [(&str, i64); 4] = [
        ("triangle", 180),
        ("square", 360),
        ("pentagon", 540),
        ("hexagon", 720),
    ];
    let count = match difficulty {
        Difficulty::Standard => 3,
        Difficulty::Dungeon => 4,
    };
    let (shape, sum) = SHAPES[rng.random_range(0..count)];
    let prompt = match difficulty {
        Difficulty::Standard => format!("Angles in {shape} sum to ?°"),
        Difficulty::Dungeon => format!("Angles in regular {shape} sum to ?°"),
    };
    (prompt, Value::Int(sum))
}

fn statistics_question(rng: &mut Pcg32, difficulty: Difficulty) -> (String, Value) {
    let (count, lo, hi) = match difficulty {
        Difficulty::Standard => (4usize, 10, 50),
        Difficulty::Dungeon => (5usize, 20, 100),
    };
    let mut nums: Vec<i64> = (0..count).map(|_| rng.random_range(lo..=hi)).collect();
    nums.sort_unstable();
    let listed = nums
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    match difficulty {
        Difficulty::Standard => {
            if rng.random_bool(0.5) {
                let prompt = format!("Range of {listed} = ?");
                (prompt, Value::Int(nums[count - 1] - nums[0]))
            } else {
                let sum: i64 = nums.iter().sum();
                let prompt = format!("Mean of {listed} = ?");
                (prompt, Value::Decimal(round_div(sum * 100, count as i64)))
            }
        }
        Difficulty::Dungeon => {
            if rng.random_bool(0.5) {
                let sum: i64 = nums.iter().sum();
                let prompt = format!("Mean of {listed} = ? (2 decimal places)");
                (prompt, Value::Decimal(round_div(sum * 100, count as i64)))
            } else {
                let prompt = format!("Median of {listed} = ?");
                (prompt, Value::Int(nums[count / 2]))
            }
        }
    }
}

/// Synthesize 2 distractors distinct from the correct answer and from each
/// other. Numeric answers try a fixed multiplicative candidate set first,
/// then fall back to whole-number offsets so generation always terminates
/// (a multiplicative perturbation cannot move a zero answer). Fraction
/// answers add small random fractions, rerolling on collision.
pub(crate) fn distractors_for(rng: &mut Pcg32, correct: &Value) -> Vec<Value> {
    let mut found: Vec<Value> = Vec::with_capacity(ANSWER_CHOICES - 1);

    match correct {
        Value::Fraction(f) => {
            while found.len() < ANSWER_CHOICES - 1 {
                let offset = Fraction::new(rng.random_range(1..=3), rng.random_range(2..=5));
                let cand = Value::Fraction(*f + offset);
                if cand != *correct && !found.contains(&cand) {
                    found.push(cand);
                }
            }
        }
        _ => {
            let mut ratios = [(1i64, 2i64), (4, 5), (6, 5), (3, 2)];
            ratios.shuffle(rng);
            for (n, d) in ratios {
                if found.len() == ANSWER_CHOICES - 1 {
                    break;
                }
                let cand = correct.mul_ratio(n, d);
                if cand != *correct && !found.contains(&cand) {
                    found.push(cand);
                }
            }
            let mut offset = 1;
            while found.len() < ANSWER_CHOICES - 1 {
                let cand = correct.add_int(offset);
                if cand != *correct && !found.contains(&cand) {
                    found.push(cand);
                }
                offset += 1;
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn rng(seed: u64) -> Pcg32 {
        Pcg32::seed_from_u64(seed)
    }

    #[test]
    fn test_answer_set_shape() {
        for seed in 0..100 {
            let q = generate(&mut rng(seed), Difficulty::Standard);
            assert_eq!(q.answers.len(), ANSWER_CHOICES, "{}", q.prompt);
            let matches = q.answers.iter().filter(|a| **a == q.correct).count();
            assert_eq!(matches, 1, "exactly one correct answer: {}", q.prompt);
            for i in 0..q.answers.len() {
                for j in (i + 1)..q.answers.len() {
                    assert_ne!(q.answers[i], q.answers[j], "{}", q.prompt);
                }
            }
        }
    }

    #[test]
    fn test_seeded_determinism() {
        for seed in [0u64, 7, 12345, u64::MAX] {
            let a = generate(&mut rng(seed), Difficulty::Dungeon);
            let b = generate(&mut rng(seed), Difficulty::Dungeon);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_is_correct_and_index() {
        let q = generate(&mut rng(42), Difficulty::Standard);
        let idx = q.correct_index();
        assert!(q.is_correct(idx));
        for i in 0..q.answers.len() {
            if i != idx {
                assert!(!q.is_correct(i));
            }
        }
        // Out-of-range index is never correct
        assert!(!q.is_correct(99));
    }

    #[test]
    fn test_zero_answer_distractors_terminate() {
        // A zero answer defeats every multiplicative perturbation; the
        // additive fallback must still produce two distinct distractors.
        let mut r = rng(1);
        let found = distractors_for(&mut r, &Value::Int(0));
        assert_eq!(found.len(), 2);
        assert_ne!(found[0], Value::Int(0));
        assert_ne!(found[1], Value::Int(0));
        assert_ne!(found[0], found[1]);
    }

    #[test]
    fn test_fraction_answers_exact() {
        for seed in 0..20 {
            let q = generate_in(&mut rng(seed), Difficulty::Standard, Category::Fraction);
            assert!(matches!(q.correct, Value::Fraction(_)), "{}", q.prompt);
        }
    }

    #[test]
    fn test_decimal_division_never_panics() {
        for seed in 0..200 {
            let q = generate_in(&mut rng(seed), Difficulty::Dungeon, Category::Decimal);
            assert!(matches!(q.correct, Value::Decimal(_)), "{}", q.prompt);
        }
    }

    #[test]
    fn test_value_equality_across_representations() {
        assert_eq!(Value::Int(2), Value::Decimal(200));
        assert_eq!(Value::Decimal(50), Value::Fraction(Fraction::new(1, 2)));
        assert_ne!(Value::Int(2), Value::Decimal(201));
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(Value::Int(7).to_string(), "7");
        assert_eq!(Value::Decimal(725).to_string(), "7.25");
        assert_eq!(Value::Decimal(750).to_string(), "7.5");
        assert_eq!(Value::Decimal(700).to_string(), "7");
        assert_eq!(Value::Decimal(-125).to_string(), "-1.25");
        assert_eq!(Value::Fraction(Fraction::new(3, 4)).to_string(), "3/4");
    }

    #[test]
    fn test_round_div_half_away_from_zero() {
        assert_eq!(round_div(5, 2), 3);
        assert_eq!(round_div(-5, 2), -3);
        assert_eq!(round_div(4, 2), 2);
        assert_eq!(round_div(1, 3), 0);
    }

    proptest! {
        #[test]
        fn prop_generated_answers_distinct(seed in any::<u64>()) {
            let q = generate(&mut rng(seed), Difficulty::Dungeon);
            prop_assert_eq!(q.answers.len(), ANSWER_CHOICES);
            for i in 0..q.answers.len() {
                for j in (i + 1)..q.answers.len() {
                    prop_assert_ne!(q.answers[i], q.answers[j]);
                }
            }
            prop_assert!(q.answers.contains(&q.correct));
        }
    }
}
