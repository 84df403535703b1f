//! # Calculator Entry Points
//!
//! [`calc`] evaluates the longest expression at the start of the input and,
//! like the original calculator, ignores whatever follows it: `calc("1+2}x")`
//! is `3`. [`calc_strict`] rejects such input with
//! [`CalcError::IncompleteConsumption`]. [`parse`] exposes the full
//! [`Evaluation`] (tree, value, unconsumed suffix, statistics) so callers can
//! make that decision themselves.
//!
//! ```rust
//! # use parcomb_calc::{calc, calc_strict, parse, CalcError, Config, Number};
//! assert_eq!(calc("2*3+4").unwrap(), Number::Int(14));
//! assert_eq!(calc("5+3 trailing").unwrap(), Number::Int(8));
//! assert!(matches!(
//!     calc_strict("5+3 trailing"),
//!     Err(CalcError::IncompleteConsumption { consumed: 3, .. })
//! ));
//!
//! let eval = parse("{1+2}}", &Config::default()).unwrap();
//! assert_eq!(eval.value, Number::Int(3));
//! assert_eq!(eval.remaining(), "}");
//! assert!(!eval.is_complete());
//! ```

use crate::grammar::{CalcSymbol, calc_grammar};
use crate::{CalcError, Number};
use parcomb::{Input, Limits, ParseStats};

/// Options for a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Require the expression to cover the entire input.
    pub strict: bool,
    /// Longest input accepted, in bytes.
    pub max_input_len: usize,
    /// Deepest rule nesting allowed; see [`Limits::max_depth`].
    pub max_depth: usize,
    /// Rule attempts allowed per parse; see [`Limits::max_attempts`].
    pub max_attempts: usize,
}

impl Config {
    pub const DEFAULT_MAX_INPUT_LEN: usize = 1024;

    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict: false,
            max_input_len: Self::DEFAULT_MAX_INPUT_LEN,
            max_depth: Limits::DEFAULT_MAX_DEPTH,
            max_attempts: Limits::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// A successful parse of the start of some input.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<'a> {
    /// Root `expression` symbol.
    pub tree: CalcSymbol,
    /// Value of the root symbol.
    pub value: Number,
    /// Input left after the expression.
    pub rest: Input<'a>,
    pub stats: ParseStats,
}

impl<'a> Evaluation<'a> {
    /// Bytes covered by the expression.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.rest.pos()
    }

    /// The unconsumed suffix.
    #[inline]
    pub fn remaining(&self) -> &'a str {
        self.rest.remaining()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.rest.is_empty()
    }

    /// Fails with [`CalcError::IncompleteConsumption`] if input was left over.
    pub fn check_complete(&self) -> Result<(), CalcError> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(CalcError::IncompleteConsumption {
                consumed: self.consumed(),
                remaining: self.remaining().into(),
            })
        }
    }
}

/// Parses and evaluates the expression at the start of `input`.
pub fn parse<'a>(input: &'a str, config: &Config) -> Result<Evaluation<'a>, CalcError> {
    if input.len() > config.max_input_len {
        return Err(CalcError::InputTooLong {
            len: input.len(),
            max: config.max_input_len,
        });
    }

    let grammar = calc_grammar()?;
    let mut parser = grammar.parser(Limits {
        max_depth: config.max_depth,
        max_attempts: config.max_attempts,
    });
    let outcome = parser.parse(grammar.start(), input)?;
    let Some((tree, rest)) = outcome.into_match() else {
        log::debug!("{input:?}: no match");
        return Err(CalcError::NoMatch);
    };
    let value = tree.result().copied().ok_or(CalcError::Malformed {
        rule: "expression",
    })?;

    let evaluation = Evaluation {
        tree,
        value,
        rest,
        stats: parser.stats(),
    };
    log::debug!(
        "{input:?} = {value}, {} byte(s) unconsumed",
        evaluation.rest.len()
    );
    if config.strict {
        evaluation.check_complete()?;
    }
    Ok(evaluation)
}

/// Evaluates `input`, ignoring anything after the leading expression.
pub fn calc(input: &str) -> Result<Number, CalcError> {
    parse(input, &Config::default()).map(|e| e.value)
}

/// Evaluates `input`, which must consist of exactly one expression.
pub fn calc_strict(input: &str) -> Result<Number, CalcError> {
    parse(input, &Config::strict()).map(|e| e.value)
}
