//! Exact rational arithmetic for fraction questions
//!
//! Fraction answers must be computed and compared exactly; going through
//! floats would make `1/2 + 1/4` display as `0.7500000001` instead of `3/4`.
//! Invariants: denominator > 0, numerator/denominator always in lowest terms.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// A reduced rational number with a positive denominator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fraction {
    num: i64,
    den: i64,
}

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl Fraction {
    /// Build a fraction in lowest terms. Panics on a zero denominator,
    /// which callers must rule out (generator operand ranges start at 1).
    pub fn new(num: i64, den: i64) -> Self {
        assert!(den != 0, "fraction denominator must be nonzero");
        let sign = if den < 0 { -1 } else { 1 };
        let g = gcd(num, den).max(1);
        Self {
            num: sign * num / g,
            den: den.abs() / g,
        }
    }

    pub fn from_int(n: i64) -> Self {
        Self { num: n, den: 1 }
    }

    #[inline]
    pub fn numer(&self) -> i64 {
        self.num
    }

    #[inline]
    pub fn denom(&self) -> i64 {
        self.den
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.num == 0
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        self.den == 1
    }

    /// Reciprocal; panics on zero (division guard lives in the generator)
    pub fn recip(&self) -> Self {
        Self::new(self.den, self.num)
    }
}

impl Add for Fraction {
    type Output = Fraction;
    fn add(self, rhs: Fraction) -> Fraction {
        Fraction::new(self.num * rhs.den + rhs.num * self.den, self.den * rhs.den)
    }
}

impl Sub for Fraction {
    type Output = Fraction;
    fn sub(self, rhs: Fraction) -> Fraction {
        Fraction::new(self.num * rhs.den - rhs.num * self.den, self.den * rhs.den)
    }
}

impl Mul for Fraction {
    type Output = Fraction;
    fn mul(self, rhs: Fraction) -> Fraction {
        Fraction::new(self.num * rhs.num, self.den * rhs.den)
    }
}

impl Div for Fraction {
    type Output = Fraction;
    fn div(self, rhs: Fraction) -> Fraction {
        self * rhs.recip()
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}
