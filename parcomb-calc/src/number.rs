//! # Calculator Numbers
//!
//! [`Number`] is the value computed for every evaluated symbol. Digit
//! literals produce integers; sums, differences and products of integers stay
//! integral, and any division produces a real. Mixed integer/real operands
//! are promoted to real.
//!
//! All operations are checked: integer overflow and division by zero are
//! reported as [`ArithmeticFailure`] rather than wrapping, panicking, or
//! producing an infinity.
//!
//! ```rust
//! # use parcomb_calc::{Number, ArithmeticFailure};
//! let a = Number::Int(7);
//! let b = Number::Int(2);
//! assert_eq!(a.checked_add(b), Ok(Number::Int(9)));
//! assert_eq!(a.checked_div(b), Ok(Number::Real(3.5)));
//! assert_eq!(a.checked_div(Number::Int(0)), Err(ArithmeticFailure::DivisionByZero));
//! ```

use std::fmt;
use thiserror::Error;

/// An arithmetic operation that has no defined result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticFailure {
    #[error("division by zero")]
    DivisionByZero,

    /// Integer result does not fit in `i64`.
    #[error("integer overflow in {lhs} {op} {rhs}")]
    Overflow { lhs: i64, op: char, rhs: i64 },
}

/// An integer or real value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Real(f64),
}

impl Number {
    #[inline]
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Real(x) => x,
        }
    }

    #[inline]
    pub fn is_int(self) -> bool {
        matches!(self, Number::Int(_))
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(n) => n == 0,
            Number::Real(x) => x == 0.0,
        }
    }

    fn int_op(
        self,
        rhs: Number,
        op: char,
        int: fn(i64, i64) -> Option<i64>,
        real: fn(f64, f64) -> f64,
    ) -> Result<Number, ArithmeticFailure> {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => int(a, b)
                .map(Number::Int)
                .ok_or(ArithmeticFailure::Overflow { lhs: a, op, rhs: b }),
            (a, b) => Ok(Number::Real(real(a.as_f64(), b.as_f64()))),
        }
    }

    pub fn checked_add(self, rhs: Number) -> Result<Number, ArithmeticFailure> {
        self.int_op(rhs, '+', i64::checked_add, |a, b| a + b)
    }

    pub fn checked_sub(self, rhs: Number) -> Result<Number, ArithmeticFailure> {
        self.int_op(rhs, '-', i64::checked_sub, |a, b| a - b)
    }

    pub fn checked_mul(self, rhs: Number) -> Result<Number, ArithmeticFailure> {
        self.int_op(rhs, '*', i64::checked_mul, |a, b| a * b)
    }

    /// Real division. Fails on a zero divisor, integer or real.
    pub fn checked_div(self, rhs: Number) -> Result<Number, ArithmeticFailure> {
        if rhs.is_zero() {
            return Err(ArithmeticFailure::DivisionByZero);
        }
        Ok(Number::Real(self.as_f64() / rhs.as_f64()))
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Int(n)
    }
}

impl From<f64> for Number {
    fn from(x: f64) -> Self {
        Number::Real(x)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::Real(x) => write!(f, "{x:?}"),
        }
    }
}
