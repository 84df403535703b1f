//! # Calculator Grammar
//!
//! The fixed grammar recognized by the calculator, with the semantic handler
//! attached to each rule:
//!
//! ```text
//! term        ::= '{' expression '}' | digit_literal
//! factor      ::= term plus_minus_op factor | term
//! expression  ::= factor times_divide_op expression | factor
//! ```
//!
//! Both binary levels recurse on the right, so `a - b - c` evaluates as
//! `a - (b - c)` and `a / b / c` as `a / (b / c)`. Likewise `+`/`-` sit
//! *below* `*`/`/`: `2*3+4` is `2*(3+4)`. Alternatives are tried in the order
//! written; the longer production always comes first.

use crate::{CalcError, Number};
use once_cell::sync::Lazy;
use parcomb::{Grammar, Recognizer, Symbol, SymbolKind};

static GRAMMAR: Lazy<Result<CalcGrammar, CalcError>> = Lazy::new(build_grammar);

/// Rule identifiers of the calculator grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalcKind {
    LeftBrace,
    RightBrace,
    DigitLiteral,
    PlusMinusOp,
    TimesDivideOp,
    Term,
    Factor,
    Expression,
}

impl From<CalcKind> for usize {
    fn from(kind: CalcKind) -> usize {
        kind as usize
    }
}

impl SymbolKind for CalcKind {
    const COUNT: usize = 8;

    const ALL: &'static [Self] = &[
        CalcKind::LeftBrace,
        CalcKind::RightBrace,
        CalcKind::DigitLiteral,
        CalcKind::PlusMinusOp,
        CalcKind::TimesDivideOp,
        CalcKind::Term,
        CalcKind::Factor,
        CalcKind::Expression,
    ];

    fn name(self) -> &'static str {
        match self {
            CalcKind::LeftBrace => "left_brace",
            CalcKind::RightBrace => "right_brace",
            CalcKind::DigitLiteral => "digit_literal",
            CalcKind::PlusMinusOp => "plus_minus_op",
            CalcKind::TimesDivideOp => "times_divide_op",
            CalcKind::Term => "term",
            CalcKind::Factor => "factor",
            CalcKind::Expression => "expression",
        }
    }
}

pub type CalcSymbol = Symbol<CalcKind, Number>;
pub type CalcGrammar = Grammar<CalcKind, Number, CalcError>;

fn is_left_brace(c: char) -> bool {
    c == '{'
}

fn is_right_brace(c: char) -> bool {
    c == '}'
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_plus_minus(c: char) -> bool {
    matches!(c, '+' | '-')
}

fn is_times_divide(c: char) -> bool {
    matches!(c, '*' | '/')
}

fn malformed(sym: &CalcSymbol) -> CalcError {
    CalcError::Malformed {
        rule: sym.kind().name(),
    }
}

/// The already computed value of a child symbol.
fn value_of(sym: &CalcSymbol) -> Result<Number, CalcError> {
    sym.result().copied().ok_or_else(|| malformed(sym))
}

fn eval_digit(sym: &CalcSymbol) -> Result<Number, CalcError> {
    let digit = sym
        .terminal_char()
        .and_then(|c| c.to_digit(10))
        .ok_or_else(|| malformed(sym))?;
    Ok(Number::Int(digit.into()))
}

fn eval_term(sym: &CalcSymbol) -> Result<Number, CalcError> {
    match sym.children() {
        // digit_literal
        [literal] => value_of(literal),
        // { expression }
        [_, expr, _] => value_of(expr),
        _ => Err(malformed(sym)),
    }
}

fn eval_factor(sym: &CalcSymbol) -> Result<Number, CalcError> {
    match sym.children() {
        [term] => value_of(term),
        [term, op, factor] => {
            let (lhs, rhs) = (value_of(term)?, value_of(factor)?);
            let value = match op.terminal_char() {
                Some('-') => lhs.checked_sub(rhs),
                _ => lhs.checked_add(rhs),
            };
            Ok(value?)
        }
        _ => Err(malformed(sym)),
    }
}

fn eval_expression(sym: &CalcSymbol) -> Result<Number, CalcError> {
    match sym.children() {
        [factor] => value_of(factor),
        [factor, op, expr] => {
            let (lhs, rhs) = (value_of(factor)?, value_of(expr)?);
            let value = match op.terminal_char() {
                Some('*') => lhs.checked_mul(rhs),
                _ => lhs.checked_div(rhs),
            };
            if let Err(e) = &value {
                log::debug!("{} at {}: {e}", sym.kind().name(), sym.span().display());
            }
            Ok(value?)
        }
        _ => Err(malformed(sym)),
    }
}

/// Builds a fresh calculator grammar.
pub fn build_grammar() -> Result<CalcGrammar, CalcError> {
    use CalcKind::*;

    let grammar: CalcGrammar = Grammar::builder()
        .terminal(LeftBrace, is_left_brace)
        .terminal(RightBrace, is_right_brace)
        .terminal(DigitLiteral, is_digit)
        .terminal(PlusMinusOp, is_plus_minus)
        .terminal(TimesDivideOp, is_times_divide)
        .rule(
            Term,
            Recognizer::Alt(vec![
                Recognizer::Seq(vec![LeftBrace, Expression, RightBrace]),
                Recognizer::Rule(DigitLiteral),
            ]),
        )
        .rule(
            Factor,
            Recognizer::Alt(vec![
                Recognizer::Seq(vec![Term, PlusMinusOp, Factor]),
                Recognizer::Rule(Term),
            ]),
        )
        .rule(
            Expression,
            Recognizer::Alt(vec![
                Recognizer::Seq(vec![Factor, TimesDivideOp, Expression]),
                Recognizer::Rule(Factor),
            ]),
        )
        .handler(DigitLiteral, eval_digit)
        .handler(Term, eval_term)
        .handler(Factor, eval_factor)
        .handler(Expression, eval_expression)
        .build(Expression)?;
    Ok(grammar)
}

/// The shared calculator grammar, built on first use.
pub fn calc_grammar() -> Result<&'static CalcGrammar, CalcError> {
    GRAMMAR.as_ref().map_err(Clone::clone)
}
