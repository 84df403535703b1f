//! Engine error types.
//!
//! A failed match is *not* an error: it is reported as
//! [`ParseOutcome::NoMatch`](crate::ParseOutcome::NoMatch) and drives
//! backtracking. The types here cover the conditions that abort a parse
//! outright ([`ParseError`]) and the ones that reject a rule table before it
//! is ever used ([`GrammarError`]).

use smartstring::alias::String;
use thiserror::Error;

/// A condition that aborts the whole parse.
///
/// `E` is the error type returned by the grammar's semantic handlers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError<E> {
    /// A semantic handler failed. No partial result survives.
    #[error("{0}")]
    Handler(E),

    /// Rule nesting went deeper than [`Limits::max_depth`](crate::Limits).
    #[error("recursion depth limit {limit} exceeded at byte {pos}")]
    DepthExceeded {
        /// The configured limit.
        limit: usize,
        /// Input position of the rule attempt that crossed it.
        pos: usize,
    },

    /// The parse made more rule attempts than
    /// [`Limits::max_attempts`](crate::Limits) allows.
    #[error("rule attempt limit {limit} exceeded at byte {pos}")]
    AttemptsExceeded { limit: usize, pos: usize },
}

/// A rule table that cannot be turned into a [`Grammar`](crate::Grammar).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("rule {0} is defined more than once")]
    Duplicate(&'static str),

    #[error("rule {0} is not defined")]
    Missing(&'static str),

    #[error("terminal rule {0} must use a character recognizer")]
    TerminalShape(&'static str),

    #[error("non-terminal rule {0} cannot recognize a bare character")]
    RuleShape(&'static str),

    #[error("rule {0} has an empty sequence or alternation")]
    Empty(&'static str),

    #[error("invalid grammar: {0}")]
    Other(String),
}
