//! # Calculator Error Type
//!
//! This module defines [`CalcError`], the single failure surface of the
//! calculator. The three conditions a caller usually distinguishes are:
//!
//! - [`CalcError::NoMatch`]: the input does not start with an expression,
//! - [`CalcError::IncompleteConsumption`]: an expression matched but input
//!   was left over (reported only in strict mode, or on request via
//!   [`Evaluation::check_complete`](crate::Evaluation::check_complete)),
//! - [`CalcError::Arithmetic`]: evaluation hit a division by zero or an
//!   integer overflow.
//!
//! Engine and grammar failures are folded in with `#[from]` so `?` works
//! throughout.
use crate::ArithmeticFailure;
use parcomb::{GrammarError, ParseError};
use smartstring::alias::String;
use thiserror::Error;

/// Represents all possible errors that can occur within the calculator.
///
/// # Examples
/// ```rust
/// # use parcomb_calc::{calc, CalcError, ArithmeticFailure};
/// assert!(matches!(calc("*5"), Err(CalcError::NoMatch)));
/// assert!(matches!(
///     calc("1/0"),
///     Err(CalcError::Arithmetic(ArithmeticFailure::DivisionByZero))
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// No expression could be matched at the start of the input.
    #[error("no expression at start of input")]
    NoMatch,

    /// An expression matched but did not cover the whole input.
    #[error("unconsumed input {remaining:?} after byte {consumed}")]
    IncompleteConsumption {
        /// Bytes covered by the expression.
        consumed: usize,
        /// The text that was left over.
        remaining: String,
    },

    /// Evaluation failed; the whole parse is discarded.
    #[error("arithmetic failure: {0}")]
    Arithmetic(#[from] ArithmeticFailure),

    /// The input is longer than [`Config::max_input_len`](crate::Config).
    #[error("input of {len} bytes exceeds limit of {max}")]
    InputTooLong { len: usize, max: usize },

    /// The input nests deeper than [`Config::max_depth`](crate::Config).
    #[error("nesting depth limit {limit} exceeded at byte {pos}")]
    DepthExceeded { limit: usize, pos: usize },

    /// Recognition needed more rule attempts than
    /// [`Config::max_attempts`](crate::Config) allows.
    #[error("rule attempt limit {limit} exceeded at byte {pos}")]
    AttemptsExceeded { limit: usize, pos: usize },

    /// A handler saw a symbol whose shape the grammar cannot produce.
    #[error("malformed {rule} symbol")]
    Malformed { rule: &'static str },

    /// The rule table failed validation.
    #[error("grammar error: {0}")]
    Grammar(#[from] GrammarError),
}

impl From<ParseError<CalcError>> for CalcError {
    fn from(err: ParseError<CalcError>) -> Self {
        match err {
            ParseError::Handler(e) => e,
            ParseError::DepthExceeded { limit, pos } => CalcError::DepthExceeded { limit, pos },
            ParseError::AttemptsExceeded { limit, pos } => {
                CalcError::AttemptsExceeded { limit, pos }
            }
        }
    }
}
